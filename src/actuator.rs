// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output actuator driving the remote's button.
//!
//! The controller is open-loop: it writes levels and never waits for an
//! acknowledgement. Hardware faults are the actuator's concern and are
//! never reported back to the controller.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::types::{Level, PinId};

/// Drives a single digital output.
///
/// Implementations wrap whatever GPIO access the host has. A button press
/// is a `High` write followed, after the press duration, by a `Low` write.
pub trait Actuator: Send + Sync {
    /// Drives `pin` to `level`.
    fn set_output(&self, pin: PinId, level: Level);
}

/// In-memory pin bank used when no hardware is attached.
///
/// Every write is logged and recorded, which also makes it the actuator of
/// choice in tests.
///
/// # Examples
///
/// ```
/// use garage_remote::actuator::{Actuator, SimulatedActuator};
/// use garage_remote::types::{Level, PinId};
///
/// let actuator = SimulatedActuator::new();
/// let pin = PinId::new(7);
///
/// actuator.set_output(pin, Level::High);
/// assert_eq!(actuator.level(pin), Some(Level::High));
/// assert_eq!(actuator.history(), vec![(pin, Level::High)]);
/// ```
#[derive(Debug, Default)]
pub struct SimulatedActuator {
    inner: Mutex<PinBank>,
}

#[derive(Debug, Default)]
struct PinBank {
    levels: HashMap<PinId, Level>,
    history: Vec<(PinId, Level)>,
}

impl SimulatedActuator {
    /// Creates an actuator with no pins driven yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last level written to `pin`, if any.
    #[must_use]
    pub fn level(&self, pin: PinId) -> Option<Level> {
        self.inner.lock().levels.get(&pin).copied()
    }

    /// Returns every write in the order it happened.
    #[must_use]
    pub fn history(&self) -> Vec<(PinId, Level)> {
        self.inner.lock().history.clone()
    }

    /// Returns how many complete presses (`High` writes) `pin` has seen.
    #[must_use]
    pub fn press_count(&self, pin: PinId) -> usize {
        self.inner
            .lock()
            .history
            .iter()
            .filter(|(p, level)| *p == pin && level.is_high())
            .count()
    }

    /// Forgets the recorded history, keeping the current levels.
    pub fn clear_history(&self) {
        self.inner.lock().history.clear();
    }
}

impl Actuator for SimulatedActuator {
    fn set_output(&self, pin: PinId, level: Level) {
        tracing::trace!(%pin, %level, "Simulated output write");
        let mut bank = self.inner.lock();
        bank.levels.insert(pin, level);
        bank.history.push((pin, level));
    }
}
