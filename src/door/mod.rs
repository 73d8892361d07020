// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The garage door controller.
//!
//! A [`DoorController`] simulates a door driven by a one-button remote. A
//! command presses the button (output high, then low after the press
//! duration) and moves the door through `Opening`/`Closing` to `Open`/
//! `Closed` once the movement duration has elapsed. An opened door closes
//! itself after the configured auto-close delay.
//!
//! ```text
//!  Closed --open--> Opening --movement--> Open
//!  Open --close--> Closing --movement--> Closed
//!  Open --auto-close delay--> Closing --movement--> Closed
//! ```
//!
//! Every command first cancels the whole pending chain of the previous
//! command, so stale transitions never fire. The controller is open-loop:
//! nothing is sensed, the door is assumed to follow the timing.
//!
//! # Concurrency
//!
//! Commands and timer callbacks are serialized: each runs to completion,
//! including notifying subscribers, before the next one starts. State is
//! mutated under a lock and the resulting actuator writes and notifications
//! are applied after that lock is released, so subscribers may call back
//! into the controller. Notifications caused by such a nested command are
//! delivered after the ones already queued, so the last value a subscriber
//! sees is always the door's actual state.

mod timer_set;

use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::{Mutex, ReentrantMutex};
use tracing::{debug, info, trace};

use crate::actuator::Actuator;
use crate::config::DoorConfig;
use crate::error::{Error, Result};
use crate::event::{DoorEvent, DoorId, DoorReceiver, EventBus};
use crate::scheduler::Scheduler;
use crate::state::{DoorState, DoorStateChange};
use crate::subscription::{CallbackRegistry, Subscribable, SubscriptionId};
use crate::types::{CurrentDoorState, Level, PinId, TargetDoorState};

use timer_set::{TimerKey, TimerSet};

/// A scheduled step of a transition chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Drive the output low, ending the button press.
    ReleaseButton,
    /// The door has finished travelling towards the commanded target.
    FinishMovement(TargetDoorState),
    /// The auto-close delay has elapsed on an open door.
    StartAutoClose,
    /// The door has finished closing on its own.
    FinishAutoClose,
}

/// A side effect produced under the state lock, applied after it.
#[derive(Debug, Clone, Copy)]
enum Effect {
    State(DoorStateChange, DoorState),
    Output(Level),
}

/// Mutable state of one door.
struct Machine {
    state: DoorState,
    pending: TimerSet<Step>,
    shut_down: bool,
}

impl Machine {
    fn record(&mut self, effects: &mut Vec<Effect>, change: DoorStateChange) {
        self.state.apply(&change);
        effects.push(Effect::State(change, self.state));
    }
}

/// Effects waiting to be delivered.
///
/// Only the outermost frame drains it; a command issued by a subscriber
/// queues its effects behind the ones still being delivered.
#[derive(Default)]
struct Outbox {
    queue: VecDeque<Effect>,
    draining: bool,
}

struct Shared {
    id: DoorId,
    config: DoorConfig,
    actuator: Arc<dyn Actuator>,
    scheduler: Arc<dyn Scheduler>,
    callbacks: CallbackRegistry,
    events: EventBus,
    /// Serializes commands and timer callbacks, effects included.
    serial: ReentrantMutex<()>,
    machine: Mutex<Machine>,
    outbox: Mutex<Outbox>,
}

impl Shared {
    /// Schedules `step` after `delay` as part of the active chain.
    fn schedule_step(self: &Arc<Self>, machine: &mut Machine, delay: Duration, step: Step) {
        let key = machine.pending.reserve();
        let door: Weak<Self> = Arc::downgrade(self);
        let handle = self.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(door) = door.upgrade() {
                    door.fire(key);
                }
            }),
        );
        machine.pending.insert(key, handle, step);
        trace!(door = %self.config.name, ?step, %handle, ?delay, "Step scheduled");
    }

    fn command(self: &Arc<Self>, requested: TargetDoorState) -> Result<()> {
        let _serial = self.serial.lock();
        let effects = {
            let mut machine = self.machine.lock();
            if machine.shut_down {
                return Err(Error::ShutDown);
            }

            let cancelled = machine.pending.cancel_all(self.scheduler.as_ref());
            if cancelled > 0 {
                debug!(door = %self.config.name, cancelled, "Superseded pending transitions");
            }

            if requested.is_open() {
                info!(door = %self.config.name, "Opening garage door");
            } else {
                info!(door = %self.config.name, "Closing garage door");
            }

            let mut effects = Vec::with_capacity(3);
            machine.record(&mut effects, requested.into());
            machine.record(&mut effects, requested.moving_state().into());

            debug!(door = %self.config.name, pin = %self.config.pin, "Pressing button");
            effects.push(Effect::Output(Level::High));
            self.schedule_step(
                &mut machine,
                self.config.remote_press_duration,
                Step::ReleaseButton,
            );

            self.schedule_step(
                &mut machine,
                self.config.door_movement_duration,
                Step::FinishMovement(requested),
            );

            let auto_close = self
                .config
                .door_auto_close_delay
                .filter(|_| requested.is_open());
            if let Some(delay) = auto_close {
                self.schedule_step(
                    &mut machine,
                    self.config.door_movement_duration + delay,
                    Step::StartAutoClose,
                );
            }
            effects
        };
        self.apply(effects);
        Ok(())
    }

    fn fire(self: &Arc<Self>, key: TimerKey) {
        let _serial = self.serial.lock();
        let effects = {
            let mut machine = self.machine.lock();
            let Some(step) = machine.pending.take(key) else {
                trace!(door = %self.config.name, ?key, "Ignoring cancelled step");
                return;
            };

            let mut effects = Vec::with_capacity(2);
            match step {
                Step::ReleaseButton => {
                    effects.push(Effect::Output(Level::Low));
                    debug!(door = %self.config.name, pin = %self.config.pin, "Button pressed");
                }
                Step::FinishMovement(target) => {
                    machine.record(&mut effects, target.resting_state().into());
                    if target.is_open() {
                        info!(door = %self.config.name, "Garage door opened");
                    } else {
                        info!(door = %self.config.name, "Garage door closed");
                    }
                }
                Step::StartAutoClose => {
                    info!(door = %self.config.name, "Faking auto closing garage door");
                    machine.record(&mut effects, TargetDoorState::Closed.into());
                    machine.record(&mut effects, CurrentDoorState::Closing.into());
                    self.schedule_step(
                        &mut machine,
                        self.config.door_movement_duration,
                        Step::FinishAutoClose,
                    );
                }
                Step::FinishAutoClose => {
                    machine.record(&mut effects, CurrentDoorState::Closed.into());
                    info!(door = %self.config.name, "Auto closing garage door faked");
                }
            }
            effects
        };
        self.apply(effects);
    }

    /// Queues `effects` and delivers the queue unless an outer frame is
    /// already doing so.
    fn apply(&self, effects: Vec<Effect>) {
        {
            let mut outbox = self.outbox.lock();
            outbox.queue.extend(effects);
            if outbox.draining {
                return;
            }
            outbox.draining = true;
        }

        loop {
            let next = {
                let mut outbox = self.outbox.lock();
                let next = outbox.queue.pop_front();
                if next.is_none() {
                    outbox.draining = false;
                }
                next
            };
            match next {
                Some(effect) => self.deliver(effect),
                None => return,
            }
        }
    }

    fn deliver(&self, effect: Effect) {
        match effect {
            Effect::State(change, new_state) => {
                self.callbacks.dispatch(&change);
                self.events.publish(DoorEvent::StateChanged {
                    door_id: self.id,
                    change,
                    new_state,
                });
            }
            Effect::Output(level) => {
                self.actuator.set_output(self.config.pin, level);
                self.callbacks.dispatch_output(self.config.pin, level);
                self.events.publish(DoorEvent::OutputChanged {
                    door_id: self.id,
                    pin: self.config.pin,
                    level,
                });
            }
        }
    }

    fn shutdown(&self) -> usize {
        let mut machine = self.machine.lock();
        machine.shut_down = true;
        machine.pending.cancel_all(self.scheduler.as_ref())
    }
}

/// Controller for one remote-operated garage door.
///
/// Construct one per physical door; instances are fully independent.
/// Dropping the controller cancels its outstanding timers.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use garage_remote::{DoorConfig, DoorController};
/// use garage_remote::actuator::SimulatedActuator;
/// use garage_remote::scheduler::ManualScheduler;
/// use garage_remote::types::{CurrentDoorState, PinId, TargetDoorState};
///
/// let scheduler = Arc::new(ManualScheduler::new());
/// let config = DoorConfig::new("Garage", PinId::new(7))
///     .with_door_movement_duration(Duration::from_secs(10));
/// let door = DoorController::new(config, Arc::new(SimulatedActuator::new()), scheduler.clone());
///
/// door.set_target_state(TargetDoorState::Open)?;
/// assert_eq!(door.current_state(), CurrentDoorState::Opening);
///
/// scheduler.advance(Duration::from_secs(10));
/// assert_eq!(door.current_state(), CurrentDoorState::Open);
/// # Ok::<(), garage_remote::Error>(())
/// ```
pub struct DoorController {
    shared: Arc<Shared>,
}

impl DoorController {
    /// Creates a controller with its own event bus.
    ///
    /// The door is assumed closed. The output pin is driven low.
    pub fn new(
        config: DoorConfig,
        actuator: Arc<dyn Actuator>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self::with_event_bus(config, actuator, scheduler, EventBus::new())
    }

    /// Creates a controller publishing onto a shared event bus.
    ///
    /// Useful when one host task follows several doors.
    pub fn with_event_bus(
        config: DoorConfig,
        actuator: Arc<dyn Actuator>,
        scheduler: Arc<dyn Scheduler>,
        events: EventBus,
    ) -> Self {
        let id = DoorId::new();
        info!(
            door = %config.name,
            %id,
            pin = %config.pin,
            remote_press = ?config.remote_press_duration,
            door_movement = ?config.door_movement_duration,
            auto_close_delay = ?config.door_auto_close_delay,
            "Garage door configured"
        );
        actuator.set_output(config.pin, Level::Low);

        Self {
            shared: Arc::new(Shared {
                id,
                config,
                actuator,
                scheduler,
                callbacks: CallbackRegistry::new(),
                events,
                serial: ReentrantMutex::new(()),
                machine: Mutex::new(Machine {
                    state: DoorState::new(),
                    pending: TimerSet::new(),
                    shut_down: false,
                }),
                outbox: Mutex::new(Outbox::default()),
            }),
        }
    }

    /// Returns this door's identifier.
    #[must_use]
    pub fn id(&self) -> DoorId {
        self.shared.id
    }

    /// Returns the configuration the door was built with.
    #[must_use]
    pub fn config(&self) -> &DoorConfig {
        &self.shared.config
    }

    /// Returns the remote's output pin.
    #[must_use]
    pub fn pin(&self) -> PinId {
        self.shared.config.pin
    }

    /// Returns the simulated door position.
    #[must_use]
    pub fn current_state(&self) -> CurrentDoorState {
        self.shared.machine.lock().state.current()
    }

    /// Returns the last commanded intent.
    #[must_use]
    pub fn target_state(&self) -> TargetDoorState {
        self.shared.machine.lock().state.target()
    }

    /// Returns both states at once.
    #[must_use]
    pub fn state(&self) -> DoorState {
        self.shared.machine.lock().state
    }

    /// Commands the door towards `requested`.
    ///
    /// Cancels everything still pending from earlier commands (including a
    /// scheduled auto-close), then sets the target, starts the movement,
    /// presses the button and schedules the rest of the chain. There is no
    /// short-circuit: commanding the state the door is already in presses
    /// the button again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShutDown`] after [`shutdown`](Self::shutdown).
    pub fn set_target_state(&self, requested: TargetDoorState) -> Result<()> {
        self.shared.command(requested)
    }

    /// Returns the number of scheduled steps that have not fired yet.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.shared.machine.lock().pending.len()
    }

    /// Cancels all pending steps and rejects further commands.
    ///
    /// Returns the number of steps cancelled. Calling it again is harmless.
    pub fn shutdown(&self) -> usize {
        let cancelled = self.shared.shutdown();
        debug!(door = %self.shared.config.name, cancelled, "Door controller shut down");
        cancelled
    }

    /// Returns `true` once [`shutdown`](Self::shutdown) has been called.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shared.machine.lock().shut_down
    }

    /// Returns the bus this door publishes onto.
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.shared.events
    }

    /// Subscribes to this door's events.
    ///
    /// On a shared bus, events of other doors are skipped.
    #[must_use]
    pub fn subscribe(&self) -> DoorReceiver {
        self.shared.events.subscribe_door(self.shared.id)
    }
}

impl Subscribable for DoorController {
    fn on_current_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(CurrentDoorState) + Send + Sync + 'static,
    {
        self.shared.callbacks.on_current_state_changed(callback)
    }

    fn on_target_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(TargetDoorState) + Send + Sync + 'static,
    {
        self.shared.callbacks.on_target_state_changed(callback)
    }

    fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DoorStateChange) + Send + Sync + 'static,
    {
        self.shared.callbacks.on_state_changed(callback)
    }

    fn on_output_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PinId, Level) + Send + Sync + 'static,
    {
        self.shared.callbacks.on_output_changed(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.callbacks.unsubscribe(id)
    }
}

impl Drop for DoorController {
    fn drop(&mut self) {
        self.shared.shutdown();
    }
}

impl std::fmt::Debug for DoorController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoorController")
            .field("id", &self.shared.id)
            .field("name", &self.shared.config.name)
            .field("state", &self.state())
            .field("pending_timers", &self.pending_timers())
            .finish_non_exhaustive()
    }
}
