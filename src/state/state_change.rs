// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.

use std::fmt;

use crate::types::{CurrentDoorState, TargetDoorState};

/// A change to one half of a door's state.
///
/// # Examples
///
/// ```
/// use garage_remote::state::DoorStateChange;
/// use garage_remote::types::CurrentDoorState;
///
/// let change = DoorStateChange::Current(CurrentDoorState::Opening);
/// assert!(change.is_current());
/// assert_eq!(change.to_string(), "current=OPENING");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DoorStateChange {
    /// The simulated door position changed.
    Current(CurrentDoorState),
    /// The commanded intent changed.
    Target(TargetDoorState),
}

impl DoorStateChange {
    /// Returns `true` for a current-state change.
    #[must_use]
    pub const fn is_current(&self) -> bool {
        matches!(self, Self::Current(_))
    }

    /// Returns `true` for a target-state change.
    #[must_use]
    pub const fn is_target(&self) -> bool {
        matches!(self, Self::Target(_))
    }
}

impl From<CurrentDoorState> for DoorStateChange {
    fn from(state: CurrentDoorState) -> Self {
        Self::Current(state)
    }
}

impl From<TargetDoorState> for DoorStateChange {
    fn from(state: TargetDoorState) -> Self {
        Self::Target(state)
    }
}

impl fmt::Display for DoorStateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current(state) => write!(f, "current={state}"),
            Self::Target(state) => write!(f, "target={state}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_conversions() {
        assert_eq!(
            DoorStateChange::from(CurrentDoorState::Open),
            DoorStateChange::Current(CurrentDoorState::Open)
        );
        assert_eq!(
            DoorStateChange::from(TargetDoorState::Closed),
            DoorStateChange::Target(TargetDoorState::Closed)
        );
    }

    #[test]
    fn kind_predicates() {
        let target = DoorStateChange::Target(TargetDoorState::Open);
        assert!(target.is_target());
        assert!(!target.is_current());
    }

    #[test]
    fn serializes_externally_tagged() {
        let json = serde_json::to_string(&DoorStateChange::Target(TargetDoorState::Open)).unwrap();
        assert_eq!(json, r#"{"Target":"Open"}"#);
    }
}
