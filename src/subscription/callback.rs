// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for door state subscriptions.
//!
//! This module provides the core types for managing subscription callbacks:
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::state::DoorStateChange;
use crate::types::{CurrentDoorState, Level, PinId, TargetDoorState};

/// Unique identifier for a subscription.
///
/// IDs are unique within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new subscription ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type CurrentStateCallback = Arc<dyn Fn(CurrentDoorState) + Send + Sync>;

type TargetStateCallback = Arc<dyn Fn(TargetDoorState) + Send + Sync>;

type StateChangedCallback = Arc<dyn Fn(&DoorStateChange) + Send + Sync>;

type OutputCallback = Arc<dyn Fn(PinId, Level) + Send + Sync>;

/// Registry for door notification callbacks.
///
/// This is the synchronous notification sink the controller reports to.
/// It uses `parking_lot::RwLock` maps so callbacks can be registered from
/// any thread. Dispatch works on a snapshot of the registered callbacks, so
/// a callback may subscribe or unsubscribe without deadlocking.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    current_callbacks: RwLock<HashMap<SubscriptionId, CurrentStateCallback>>,
    target_callbacks: RwLock<HashMap<SubscriptionId, TargetStateCallback>>,
    state_changed_callbacks: RwLock<HashMap<SubscriptionId, StateChangedCallback>>,
    output_callbacks: RwLock<HashMap<SubscriptionId, OutputCallback>>,
}

fn snapshot<T: ?Sized>(map: &RwLock<HashMap<SubscriptionId, Arc<T>>>) -> Vec<Arc<T>> {
    map.read().values().cloned().collect()
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            current_callbacks: RwLock::new(HashMap::new()),
            target_callbacks: RwLock::new(HashMap::new()),
            state_changed_callbacks: RwLock::new(HashMap::new()),
            output_callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback for current door state changes.
    pub fn on_current_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(CurrentDoorState) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.current_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for target door state changes.
    pub fn on_target_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(TargetDoorState) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.target_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for every state change, current or target.
    pub fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DoorStateChange) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.state_changed_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for every write to the remote's output pin.
    pub fn on_output_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PinId, Level) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.output_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Removes a callback.
    ///
    /// Returns `true` if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.current_callbacks.write().remove(&id).is_some()
            || self.target_callbacks.write().remove(&id).is_some()
            || self.state_changed_callbacks.write().remove(&id).is_some()
            || self.output_callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.current_callbacks.write().clear();
        self.target_callbacks.write().clear();
        self.state_changed_callbacks.write().clear();
        self.output_callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch methods
    // =========================================================================

    /// Dispatches a state change.
    ///
    /// Generic `on_state_changed` callbacks run first, then the callbacks
    /// for the specific kind of change.
    pub fn dispatch(&self, change: &DoorStateChange) {
        for callback in snapshot(&self.state_changed_callbacks) {
            callback(change);
        }

        match *change {
            DoorStateChange::Current(state) => {
                for callback in snapshot(&self.current_callbacks) {
                    callback(state);
                }
            }
            DoorStateChange::Target(state) => {
                for callback in snapshot(&self.target_callbacks) {
                    callback(state);
                }
            }
        }
    }

    /// Dispatches an output write.
    pub fn dispatch_output(&self, pin: PinId, level: Level) {
        for callback in snapshot(&self.output_callbacks) {
            callback(pin, level);
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.current_callbacks.read().len()
            + self.target_callbacks.read().len()
            + self.state_changed_callbacks.read().len()
            + self.output_callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
