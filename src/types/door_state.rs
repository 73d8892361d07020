// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door position and door intent.
//!
//! Numeric codes follow the garage door opener characteristic exposed by
//! smart-home hosts, so values can be relayed without translation.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// The simulated physical position of the door.
///
/// # Examples
///
/// ```
/// use garage_remote::types::CurrentDoorState;
///
/// assert_eq!(CurrentDoorState::Closing.as_num(), 3);
/// assert_eq!("opening".parse::<CurrentDoorState>().unwrap(), CurrentDoorState::Opening);
/// assert!(CurrentDoorState::Opening.is_moving());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum CurrentDoorState {
    /// The door is fully open.
    Open,
    /// The door is fully closed.
    #[default]
    Closed,
    /// The door is travelling up.
    Opening,
    /// The door is travelling down.
    Closing,
    /// The door halted mid-travel.
    ///
    /// Reserved for manual-stop support; the controller never produces it.
    Stopped,
}

impl CurrentDoorState {
    /// Returns the state name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Opening => "OPENING",
            Self::Closing => "CLOSING",
            Self::Stopped => "STOPPED",
        }
    }

    /// Returns the characteristic value.
    #[must_use]
    pub const fn as_num(&self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Closed => 1,
            Self::Opening => 2,
            Self::Closing => 3,
            Self::Stopped => 4,
        }
    }

    /// Returns `true` while the door is travelling.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

impl fmt::Display for CurrentDoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CurrentDoorState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OPEN" | "0" => Ok(Self::Open),
            "CLOSED" | "1" => Ok(Self::Closed),
            "OPENING" | "2" => Ok(Self::Opening),
            "CLOSING" | "3" => Ok(Self::Closing),
            "STOPPED" | "4" => Ok(Self::Stopped),
            _ => Err(ValueError::InvalidCurrentState(s.to_string())),
        }
    }
}

impl TryFrom<u8> for CurrentDoorState {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Open),
            1 => Ok(Self::Closed),
            2 => Ok(Self::Opening),
            3 => Ok(Self::Closing),
            4 => Ok(Self::Stopped),
            _ => Err(ValueError::InvalidCurrentState(value.to_string())),
        }
    }
}

/// The last commanded intent for the door.
///
/// # Examples
///
/// ```
/// use garage_remote::types::{CurrentDoorState, TargetDoorState};
///
/// let target = TargetDoorState::try_from(0).unwrap();
/// assert_eq!(target, TargetDoorState::Open);
/// assert_eq!(target.moving_state(), CurrentDoorState::Opening);
/// assert_eq!(target.resting_state(), CurrentDoorState::Open);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum TargetDoorState {
    /// The door should open.
    Open,
    /// The door should close.
    #[default]
    Closed,
}

impl TargetDoorState {
    /// Returns the state name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }

    /// Returns the characteristic value.
    #[must_use]
    pub const fn as_num(&self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Closed => 1,
        }
    }

    /// Returns `true` for [`TargetDoorState::Open`].
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// The current state reported while travelling towards this target.
    #[must_use]
    pub const fn moving_state(&self) -> CurrentDoorState {
        match self {
            Self::Open => CurrentDoorState::Opening,
            Self::Closed => CurrentDoorState::Closing,
        }
    }

    /// The current state reported once this target has been reached.
    #[must_use]
    pub const fn resting_state(&self) -> CurrentDoorState {
        match self {
            Self::Open => CurrentDoorState::Open,
            Self::Closed => CurrentDoorState::Closed,
        }
    }
}

impl fmt::Display for TargetDoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TargetDoorState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OPEN" | "0" => Ok(Self::Open),
            "CLOSED" | "CLOSE" | "1" => Ok(Self::Closed),
            _ => Err(ValueError::InvalidTargetState(s.to_string())),
        }
    }
}

impl TryFrom<u8> for TargetDoorState {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Open),
            1 => Ok(Self::Closed),
            _ => Err(ValueError::InvalidTargetState(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_state_codes() {
        assert_eq!(CurrentDoorState::Open.as_num(), 0);
        assert_eq!(CurrentDoorState::Closed.as_num(), 1);
        assert_eq!(CurrentDoorState::Opening.as_num(), 2);
        assert_eq!(CurrentDoorState::Closing.as_num(), 3);
        assert_eq!(CurrentDoorState::Stopped.as_num(), 4);
    }

    #[test]
    fn current_state_from_num_matches_as_num() {
        for code in 0..=4u8 {
            let state = CurrentDoorState::try_from(code).unwrap();
            assert_eq!(state.as_num(), code);
        }
        assert!(CurrentDoorState::try_from(5).is_err());
    }

    #[test]
    fn current_state_from_str() {
        assert_eq!(
            "closing".parse::<CurrentDoorState>().unwrap(),
            CurrentDoorState::Closing
        );
        assert_eq!(
            "4".parse::<CurrentDoorState>().unwrap(),
            CurrentDoorState::Stopped
        );
        assert!(matches!(
            "ajar".parse::<CurrentDoorState>(),
            Err(ValueError::InvalidCurrentState(_))
        ));
    }

    #[test]
    fn only_travel_states_are_moving() {
        assert!(CurrentDoorState::Opening.is_moving());
        assert!(CurrentDoorState::Closing.is_moving());
        assert!(!CurrentDoorState::Open.is_moving());
        assert!(!CurrentDoorState::Closed.is_moving());
        assert!(!CurrentDoorState::Stopped.is_moving());
    }

    #[test]
    fn target_state_from_str() {
        assert_eq!(
            "Open".parse::<TargetDoorState>().unwrap(),
            TargetDoorState::Open
        );
        assert_eq!(
            "close".parse::<TargetDoorState>().unwrap(),
            TargetDoorState::Closed
        );
        assert_eq!(
            "1".parse::<TargetDoorState>().unwrap(),
            TargetDoorState::Closed
        );
        assert!("2".parse::<TargetDoorState>().is_err());
    }

    #[test]
    fn target_state_try_from_rejects_unknown_codes() {
        assert_eq!(
            TargetDoorState::try_from(7),
            Err(ValueError::InvalidTargetState("7".to_string()))
        );
    }

    #[test]
    fn target_state_maps_to_current_states() {
        assert_eq!(
            TargetDoorState::Closed.moving_state(),
            CurrentDoorState::Closing
        );
        assert_eq!(
            TargetDoorState::Closed.resting_state(),
            CurrentDoorState::Closed
        );
        assert_eq!(
            TargetDoorState::Open.moving_state(),
            CurrentDoorState::Opening
        );
        assert_eq!(TargetDoorState::Open.resting_state(), CurrentDoorState::Open);
    }

    #[test]
    fn defaults_are_closed() {
        assert_eq!(CurrentDoorState::default(), CurrentDoorState::Closed);
        assert_eq!(TargetDoorState::default(), TargetDoorState::Closed);
    }

    #[test]
    fn display_uses_names() {
        assert_eq!(CurrentDoorState::Opening.to_string(), "OPENING");
        assert_eq!(TargetDoorState::Open.to_string(), "OPEN");
    }
}
