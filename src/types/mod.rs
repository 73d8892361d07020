// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for garage door control.
//!
//! # Types
//!
//! - [`CurrentDoorState`] - Simulated door position (open/closed/opening/closing/stopped)
//! - [`TargetDoorState`] - Commanded intent (open/closed)
//! - [`PinId`] - GPIO output wired to the remote's button
//! - [`Level`] - High/low output level

mod door_state;
mod pin;

pub use door_state::{CurrentDoorState, TargetDoorState};
pub use pin::{Level, PinId};
