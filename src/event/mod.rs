// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for door state changes.
//!
//! The [`EventBus`] uses tokio's broadcast channel so that any number of
//! async tasks can follow one or more doors.
//!
//! # Examples
//!
//! ```
//! use garage_remote::event::{DoorEvent, DoorId, EventBus};
//! use garage_remote::types::{Level, PinId};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(DoorEvent::OutputChanged {
//!     door_id: DoorId::new(),
//!     pin: PinId::new(7),
//!     level: Level::High,
//! });
//! assert!(rx.try_recv().is_ok());
//! ```

mod door_event;
mod door_id;
mod event_bus;

pub use door_event::DoorEvent;
pub use door_id::DoorId;
pub use event_bus::{DoorReceiver, EventBus};
