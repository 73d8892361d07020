// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door event types.

use crate::state::{DoorState, DoorStateChange};
use crate::types::{Level, PinId};

use super::DoorId;

/// Events published by a door controller.
///
/// Every synchronous notification is mirrored as an event, so an async host
/// can relay door changes from its own task.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DoorEvent {
    /// The door's current or target state changed.
    StateChanged {
        /// The door that changed.
        door_id: DoorId,
        /// The specific change.
        change: DoorStateChange,
        /// The complete state after the change.
        new_state: DoorState,
    },

    /// The remote's output pin was written.
    OutputChanged {
        /// The door whose remote was driven.
        door_id: DoorId,
        /// The pin that was written.
        pin: PinId,
        /// The level written.
        level: Level,
    },
}

impl DoorEvent {
    /// Returns the door ID associated with this event.
    #[must_use]
    pub fn door_id(&self) -> DoorId {
        match self {
            Self::StateChanged { door_id, .. } | Self::OutputChanged { door_id, .. } => *door_id,
        }
    }

    /// Returns the state change, if this is a state event.
    #[must_use]
    pub fn state_change(&self) -> Option<DoorStateChange> {
        match self {
            Self::StateChanged { change, .. } => Some(*change),
            Self::OutputChanged { .. } => None,
        }
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CurrentDoorState;

    #[test]
    fn accessors() {
        let door_id = DoorId::new();
        let change = DoorStateChange::Current(CurrentDoorState::Opening);
        let event = DoorEvent::StateChanged {
            door_id,
            change,
            new_state: DoorState::new(),
        };

        assert_eq!(event.door_id(), door_id);
        assert_eq!(event.state_change(), Some(change));
        assert!(event.is_state_change());

        let output = DoorEvent::OutputChanged {
            door_id,
            pin: PinId::new(3),
            level: Level::High,
        };
        assert_eq!(output.state_change(), None);
        assert!(!output.is_state_change());
    }
}
