// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output pin addressing and levels.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Identifier of the GPIO output wired to the remote's button.
///
/// # Examples
///
/// ```
/// use garage_remote::types::PinId;
///
/// let pin = PinId::new(17);
/// assert_eq!(pin.value(), 17);
/// assert_eq!(pin.to_string(), "GPIO17");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct PinId(u8);

impl PinId {
    /// Creates a pin identifier.
    #[must_use]
    pub const fn new(pin: u8) -> Self {
        Self(pin)
    }

    /// Returns the raw pin number.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

impl From<u8> for PinId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// Logic level of an output pin.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum Level {
    /// Output driven low (button released).
    #[default]
    Low,
    /// Output driven high (button held).
    High,
}

impl Level {
    /// Returns the level name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::High => "HIGH",
        }
    }

    /// Returns `true` for [`Level::High`].
    #[must_use]
    pub const fn is_high(&self) -> bool {
        matches!(self, Self::High)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOW" | "0" | "FALSE" => Ok(Self::Low),
            "HIGH" | "1" | "TRUE" => Ok(Self::High),
            _ => Err(ValueError::InvalidLevel(s.to_string())),
        }
    }
}

impl From<bool> for Level {
    fn from(value: bool) -> Self {
        if value { Self::High } else { Self::Low }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_display() {
        assert_eq!(PinId::new(4).to_string(), "GPIO4");
    }

    #[test]
    fn pin_deserializes_from_bare_number() {
        let pin: PinId = serde_json::from_str("22").unwrap();
        assert_eq!(pin, PinId::new(22));
    }

    #[test]
    fn level_from_str() {
        assert_eq!("high".parse::<Level>().unwrap(), Level::High);
        assert_eq!("0".parse::<Level>().unwrap(), Level::Low);
        assert!(matches!(
            "floating".parse::<Level>(),
            Err(ValueError::InvalidLevel(_))
        ));
    }

    #[test]
    fn level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(!Level::default().is_high());
    }
}
