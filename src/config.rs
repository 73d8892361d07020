// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory configuration for a garage door remote.
//!
//! Hosts usually hand the accessory a JSON object such as:
//!
//! ```json
//! {
//!     "accessory": "Garage Door Remote",
//!     "name": "Garage",
//!     "gpio": 7,
//!     "remote_press_duration": 500,
//!     "door_movement_duration": 10000,
//!     "door_auto_close_delay": 5000
//! }
//! ```
//!
//! All durations are in milliseconds. Omitting `door_auto_close_delay`
//! (or setting it to `null`) disables the auto-close sequence.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::PinId;

/// Default time the remote's button is held down.
pub const DEFAULT_REMOTE_PRESS_DURATION: Duration = Duration::from_millis(500);

/// Default time the door needs to travel fully open or fully closed.
pub const DEFAULT_DOOR_MOVEMENT_DURATION: Duration = Duration::from_millis(10_000);

/// Configuration for one garage door.
///
/// The configuration is immutable once handed to a
/// [`DoorController`](crate::DoorController).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use garage_remote::DoorConfig;
/// use garage_remote::types::PinId;
///
/// let config = DoorConfig::new("Garage", PinId::new(7))
///     .with_remote_press_duration(Duration::from_millis(300))
///     .with_auto_close_delay(Duration::from_secs(60));
///
/// assert_eq!(config.pin, PinId::new(7));
/// assert_eq!(config.door_auto_close_delay, Some(Duration::from_secs(60)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDoorConfig", into = "RawDoorConfig")]
pub struct DoorConfig {
    /// Display name of the accessory.
    pub name: String,
    /// Output pin wired to the remote's button.
    pub pin: PinId,
    /// How long the button is held for one press.
    pub remote_press_duration: Duration,
    /// How long the door takes to open or close completely.
    pub door_movement_duration: Duration,
    /// How long the door stays open before closing on its own.
    pub door_auto_close_delay: Option<Duration>,
}

impl DoorConfig {
    /// Creates a configuration with default timings and auto-close disabled.
    #[must_use]
    pub fn new(name: impl Into<String>, pin: PinId) -> Self {
        Self {
            name: name.into(),
            pin,
            remote_press_duration: DEFAULT_REMOTE_PRESS_DURATION,
            door_movement_duration: DEFAULT_DOOR_MOVEMENT_DURATION,
            door_auto_close_delay: None,
        }
    }

    /// Parses and validates a JSON accessory configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document is malformed, a
    /// required field is missing, or a duration is not a non-negative
    /// integer; returns [`ConfigError::MissingField`] if the name is empty.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if the name is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::MissingField("name"));
        }
        Ok(())
    }

    /// Sets how long the button is held for one press.
    #[must_use]
    pub fn with_remote_press_duration(mut self, duration: Duration) -> Self {
        self.remote_press_duration = duration;
        self
    }

    /// Sets how long the door takes to travel.
    #[must_use]
    pub fn with_door_movement_duration(mut self, duration: Duration) -> Self {
        self.door_movement_duration = duration;
        self
    }

    /// Enables auto-close after the given delay.
    #[must_use]
    pub fn with_auto_close_delay(mut self, delay: Duration) -> Self {
        self.door_auto_close_delay = Some(delay);
        self
    }

    /// Disables auto-close.
    #[must_use]
    pub fn without_auto_close(mut self) -> Self {
        self.door_auto_close_delay = None;
        self
    }
}

/// On-the-wire shape of [`DoorConfig`], with millisecond integers.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawDoorConfig {
    name: String,
    gpio: PinId,
    #[serde(default = "default_remote_press_ms")]
    remote_press_duration: u64,
    #[serde(default = "default_door_movement_ms")]
    door_movement_duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    door_auto_close_delay: Option<u64>,
}

#[allow(clippy::cast_possible_truncation)]
fn default_remote_press_ms() -> u64 {
    DEFAULT_REMOTE_PRESS_DURATION.as_millis() as u64
}

#[allow(clippy::cast_possible_truncation)]
fn default_door_movement_ms() -> u64 {
    DEFAULT_DOOR_MOVEMENT_DURATION.as_millis() as u64
}

impl From<RawDoorConfig> for DoorConfig {
    fn from(raw: RawDoorConfig) -> Self {
        Self {
            name: raw.name,
            pin: raw.gpio,
            remote_press_duration: Duration::from_millis(raw.remote_press_duration),
            door_movement_duration: Duration::from_millis(raw.door_movement_duration),
            door_auto_close_delay: raw.door_auto_close_delay.map(Duration::from_millis),
        }
    }
}

impl From<DoorConfig> for RawDoorConfig {
    #[allow(clippy::cast_possible_truncation)]
    fn from(config: DoorConfig) -> Self {
        Self {
            name: config.name,
            gpio: config.pin,
            remote_press_duration: config.remote_press_duration.as_millis() as u64,
            door_movement_duration: config.door_movement_duration.as_millis() as u64,
            door_auto_close_delay: config
                .door_auto_close_delay
                .map(|delay| delay.as_millis() as u64),
        }
    }
}
