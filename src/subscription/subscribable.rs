// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for types that emit door notifications.

use crate::state::DoorStateChange;
use crate::subscription::SubscriptionId;
use crate::types::{CurrentDoorState, Level, PinId, TargetDoorState};

/// Trait for types that support door notification subscriptions.
///
/// Callbacks run synchronously, in the order the changes happen. A single
/// command produces a target change followed by a current change, so a
/// host relaying both sees them in that order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use garage_remote::{DoorConfig, DoorController};
/// use garage_remote::actuator::SimulatedActuator;
/// use garage_remote::scheduler::ManualScheduler;
/// use garage_remote::subscription::Subscribable;
/// use garage_remote::types::{PinId, TargetDoorState};
///
/// let door = DoorController::new(
///     DoorConfig::new("Garage", PinId::new(7)),
///     Arc::new(SimulatedActuator::new()),
///     Arc::new(ManualScheduler::new()),
/// );
///
/// let sub_id = door.on_current_state_changed(|state| {
///     println!("Door is now {state}");
/// });
///
/// door.set_target_state(TargetDoorState::Open).unwrap();
/// door.unsubscribe(sub_id);
/// ```
pub trait Subscribable {
    /// Subscribes to current door state changes.
    fn on_current_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(CurrentDoorState) + Send + Sync + 'static;

    /// Subscribes to target door state changes.
    ///
    /// Besides explicit commands, the auto-close sequence moves the target
    /// back to closed.
    fn on_target_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(TargetDoorState) + Send + Sync + 'static;

    /// Subscribes to all state changes.
    fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DoorStateChange) + Send + Sync + 'static;

    /// Subscribes to output pin writes (button press and release).
    fn on_output_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PinId, Level) + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
