// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door state tracking types.
//!
//! [`DoorState`] is a snapshot of a door's current and target state, while
//! [`DoorStateChange`] is a single mutation of one of them. Changes are what
//! the controller hands to subscribers.
//!
//! # Examples
//!
//! ```
//! use garage_remote::state::{DoorState, DoorStateChange};
//! use garage_remote::types::{CurrentDoorState, TargetDoorState};
//!
//! let mut state = DoorState::new();
//!
//! let changed = state.apply(&DoorStateChange::Target(TargetDoorState::Open));
//! assert!(changed);
//! assert_eq!(state.target(), TargetDoorState::Open);
//! assert_eq!(state.current(), CurrentDoorState::Closed);
//! ```

mod door_state;
mod state_change;

pub use door_state::DoorState;
pub use state_change::DoorStateChange;
