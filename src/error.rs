// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the garage door remote.
//!
//! The door controller itself almost never fails: configuration problems are
//! caught when the host builds a [`DoorConfig`](crate::DoorConfig), invalid
//! state values are rejected while parsing, and a missing timer runtime is
//! reported when the scheduler is constructed.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The accessory configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A door state value could not be interpreted.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The timer backend is unavailable.
    #[error("scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// The controller has been shut down and no longer accepts commands.
    #[error("door controller has been shut down")]
    ShutDown,
}

/// Errors raised while validating or parsing door state values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// An unknown current door state name or code.
    #[error("invalid current door state: {0}")]
    InvalidCurrentState(String),

    /// An unknown target door state name or code.
    #[error("invalid target door state: {0}")]
    InvalidTargetState(String),

    /// An unknown output level.
    #[error("invalid output level: {0}")]
    InvalidLevel(String),
}

/// Errors related to the accessory configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is empty.
    #[error("missing field in configuration: {0}")]
    MissingField(&'static str),
}

/// Errors related to the timer backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// No tokio runtime is available to drive timers.
    #[error("no tokio runtime available: {0}")]
    NoRuntime(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
