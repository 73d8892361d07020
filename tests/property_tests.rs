// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property tests for arbitrary command sequences.
//!
//! Only the most recent command may influence the door. A timing model of
//! that single command predicts the state at every observation point.

use std::sync::Arc;
use std::time::Duration;

use garage_remote::actuator::SimulatedActuator;
use garage_remote::scheduler::ManualScheduler;
use garage_remote::{
    CurrentDoorState, DoorConfig, DoorController, Level, PinId, TargetDoorState,
};
use proptest::prelude::*;

const PIN: PinId = PinId::new(4);

#[derive(Debug, Clone, Copy)]
struct Timing {
    press: u64,
    movement: u64,
    auto_close: Option<u64>,
}

impl Timing {
    fn config(self) -> DoorConfig {
        let config = DoorConfig::new("Prop", PIN)
            .with_remote_press_duration(Duration::from_millis(self.press))
            .with_door_movement_duration(Duration::from_millis(self.movement));
        match self.auto_close {
            Some(ms) => config.with_auto_close_delay(Duration::from_millis(ms)),
            None => config.without_auto_close(),
        }
    }

    /// Expected `(current, target)` `elapsed` ms after commanding `target`.
    fn expected(
        self,
        target: TargetDoorState,
        elapsed: u64,
    ) -> (CurrentDoorState, TargetDoorState) {
        use CurrentDoorState as C;
        use TargetDoorState as T;

        let m = self.movement;
        match (target, self.auto_close) {
            (T::Closed, _) if elapsed < m => (C::Closing, T::Closed),
            (T::Closed, _) => (C::Closed, T::Closed),
            (T::Open, _) if elapsed < m => (C::Opening, T::Open),
            (T::Open, None) => (C::Open, T::Open),
            (T::Open, Some(a)) if elapsed < m + a => (C::Open, T::Open),
            (T::Open, Some(a)) if elapsed < m + a + m => (C::Closing, T::Closed),
            (T::Open, Some(_)) => (C::Closed, T::Closed),
        }
    }

    /// Timers the chain of a fresh `target` command keeps pending.
    fn chain_len(self, target: TargetDoorState) -> usize {
        if target.is_open() && self.auto_close.is_some() {
            3
        } else {
            2
        }
    }
}

fn arb_timing() -> impl Strategy<Value = Timing> {
    (
        0u64..=2_000,
        0u64..=20_000,
        proptest::option::of(0u64..=20_000),
    )
        .prop_map(|(press, movement, auto_close)| Timing {
            press,
            movement,
            auto_close,
        })
}

fn arb_target() -> impl Strategy<Value = TargetDoorState> {
    prop_oneof![Just(TargetDoorState::Open), Just(TargetDoorState::Closed)]
}

fn arb_commands() -> impl Strategy<Value = Vec<(TargetDoorState, u64)>> {
    proptest::collection::vec((arb_target(), 0u64..=40_000), 1..=12)
}

proptest! {
    /// Superseded chains never leave timers behind and never fire.
    #[test]
    fn only_the_latest_command_counts(
        timing in arb_timing(),
        commands in arb_commands(),
    ) {
        let scheduler = Arc::new(ManualScheduler::new());
        let actuator = Arc::new(SimulatedActuator::new());
        let door = DoorController::new(timing.config(), actuator.clone(), scheduler.clone());

        for (target, gap) in commands {
            door.set_target_state(target).unwrap();
            prop_assert_eq!(door.pending_timers(), timing.chain_len(target));
            prop_assert_eq!(scheduler.pending(), door.pending_timers());
            prop_assert_eq!(actuator.level(PIN), Some(Level::High));

            scheduler.advance(Duration::from_millis(gap));
            prop_assert_eq!(scheduler.pending(), door.pending_timers());

            let (current, expected_target) = timing.expected(target, gap);
            prop_assert_eq!(door.current_state(), current);
            prop_assert_eq!(door.target_state(), expected_target);

            let expected_level = if gap < timing.press { Level::High } else { Level::Low };
            prop_assert_eq!(actuator.level(PIN), Some(expected_level));
        }

        scheduler.run_until_idle();
        prop_assert_eq!(door.pending_timers(), 0);
        prop_assert!(door.state().is_settled());
        prop_assert_eq!(actuator.level(PIN), Some(Level::Low));
    }

    /// Current and target state always agree on direction.
    #[test]
    fn current_follows_target_direction(
        timing in arb_timing(),
        commands in arb_commands(),
    ) {
        let scheduler = Arc::new(ManualScheduler::new());
        let door = DoorController::new(
            timing.config(),
            Arc::new(SimulatedActuator::new()),
            scheduler.clone(),
        );

        for (target, gap) in commands {
            door.set_target_state(target).unwrap();
            scheduler.advance(Duration::from_millis(gap / 2));
            let state = door.state();
            let heading_open = matches!(
                state.current(),
                CurrentDoorState::Opening | CurrentDoorState::Open
            );
            prop_assert_eq!(heading_open, state.target().is_open());
            prop_assert_ne!(state.current(), CurrentDoorState::Stopped);
        }
    }

    /// Each command presses the button exactly once.
    #[test]
    fn one_press_per_command(
        timing in arb_timing(),
        commands in arb_commands(),
    ) {
        let scheduler = Arc::new(ManualScheduler::new());
        let actuator = Arc::new(SimulatedActuator::new());
        let door = DoorController::new(timing.config(), actuator.clone(), scheduler.clone());

        let count = commands.len();
        for (target, gap) in commands {
            door.set_target_state(target).unwrap();
            scheduler.advance(Duration::from_millis(gap));
        }
        scheduler.run_until_idle();

        prop_assert_eq!(actuator.press_count(PIN), count);
    }
}
