// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door controller driven by real tokio timers on a paused clock.

use std::sync::Arc;
use std::time::Duration;

use garage_remote::actuator::SimulatedActuator;
use garage_remote::event::DoorEvent;
use garage_remote::scheduler::TokioScheduler;
use garage_remote::state::DoorStateChange;
use garage_remote::{
    CurrentDoorState, DoorConfig, DoorController, Error, Level, PinId, TargetDoorState,
};
use tokio::time::{Instant, sleep_until};

const PIN: PinId = PinId::new(17);

fn config() -> DoorConfig {
    DoorConfig::new("Garage", PIN)
        .with_remote_press_duration(Duration::from_millis(500))
        .with_door_movement_duration(Duration::from_millis(10_000))
        .with_auto_close_delay(Duration::from_millis(5_000))
}

fn setup(config: DoorConfig) -> (DoorController, Arc<TokioScheduler>, Arc<SimulatedActuator>) {
    let scheduler = Arc::new(TokioScheduler::current().unwrap());
    let actuator = Arc::new(SimulatedActuator::new());
    let door = DoorController::new(config, actuator.clone(), scheduler.clone());
    (door, scheduler, actuator)
}

async fn at(start: Instant, ms: u64) {
    sleep_until(start + Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn full_cycle_follows_the_clock() {
    let (door, scheduler, actuator) = setup(config());
    let start = Instant::now();

    door.set_target_state(TargetDoorState::Open).unwrap();
    assert_eq!(actuator.level(PIN), Some(Level::High));
    assert_eq!(scheduler.pending(), 3);

    at(start, 499).await;
    assert_eq!(actuator.level(PIN), Some(Level::High));
    at(start, 501).await;
    assert_eq!(actuator.level(PIN), Some(Level::Low));

    at(start, 9_999).await;
    assert_eq!(door.current_state(), CurrentDoorState::Opening);
    at(start, 10_001).await;
    assert_eq!(door.current_state(), CurrentDoorState::Open);

    at(start, 15_001).await;
    assert_eq!(door.target_state(), TargetDoorState::Closed);
    assert_eq!(door.current_state(), CurrentDoorState::Closing);

    at(start, 25_001).await;
    assert_eq!(door.current_state(), CurrentDoorState::Closed);
    assert_eq!(door.pending_timers(), 0);
    assert_eq!(scheduler.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn preemption_aborts_the_old_chain() {
    let (door, scheduler, actuator) = setup(config());
    let start = Instant::now();

    door.set_target_state(TargetDoorState::Open).unwrap();
    at(start, 5_000).await;

    door.set_target_state(TargetDoorState::Closed).unwrap();
    assert_eq!(scheduler.pending(), 2);

    at(start, 14_999).await;
    assert_eq!(door.current_state(), CurrentDoorState::Closing);
    at(start, 15_001).await;
    assert_eq!(door.current_state(), CurrentDoorState::Closed);

    // Well past where the first chain would have auto-closed.
    at(start, 40_000).await;
    assert_eq!(door.current_state(), CurrentDoorState::Closed);
    assert_eq!(door.target_state(), TargetDoorState::Closed);
    assert_eq!(actuator.press_count(PIN), 2);
    assert_eq!(scheduler.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn events_arrive_on_the_receiver() {
    let (door, _scheduler, _actuator) = setup(config().without_auto_close());
    let mut rx = door.subscribe();

    door.set_target_state(TargetDoorState::Open).unwrap();

    let mut changes = Vec::new();
    let mut outputs = Vec::new();
    while changes.len() < 3 || outputs.len() < 2 {
        match rx.recv().await.unwrap() {
            DoorEvent::StateChanged { change, .. } => changes.push(change),
            DoorEvent::OutputChanged { level, .. } => outputs.push(level),
        }
    }

    assert_eq!(
        changes,
        vec![
            DoorStateChange::Target(TargetDoorState::Open),
            DoorStateChange::Current(CurrentDoorState::Opening),
            DoorStateChange::Current(CurrentDoorState::Open),
        ]
    );
    assert_eq!(outputs, vec![Level::High, Level::Low]);
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_chain() {
    let (door, scheduler, _actuator) = setup(config());
    let start = Instant::now();

    door.set_target_state(TargetDoorState::Open).unwrap();
    assert_eq!(door.shutdown(), 3);
    assert_eq!(scheduler.pending(), 0);

    at(start, 30_000).await;
    assert_eq!(door.current_state(), CurrentDoorState::Opening);
    assert!(matches!(
        door.set_target_state(TargetDoorState::Closed),
        Err(Error::ShutDown)
    ));
}
