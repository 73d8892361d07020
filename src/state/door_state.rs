// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door state snapshot.

use crate::types::{CurrentDoorState, TargetDoorState};

use super::DoorStateChange;

/// Current and target state of one door.
///
/// A fresh door is assumed closed with a closed target; nothing is sensed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct DoorState {
    current: CurrentDoorState,
    target: TargetDoorState,
}

impl DoorState {
    /// Creates the initial closed/closed state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the simulated door position.
    #[must_use]
    pub const fn current(&self) -> CurrentDoorState {
        self.current
    }

    /// Returns the commanded intent.
    #[must_use]
    pub const fn target(&self) -> TargetDoorState {
        self.target
    }

    /// Returns `true` once the door has reached its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.current == self.target.resting_state()
    }

    /// Applies a change.
    ///
    /// Returns `true` if the value actually changed.
    pub fn apply(&mut self, change: &DoorStateChange) -> bool {
        match *change {
            DoorStateChange::Current(state) => {
                let changed = self.current != state;
                self.current = state;
                changed
            }
            DoorStateChange::Target(state) => {
                let changed = self.target != state;
                self.target = state;
                changed
            }
        }
    }
}
