// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Garage Remote - a simulated remote-controlled garage door opener.
//!
//! Pressing the virtual remote button pulses an output pin and toggles the
//! door between open and closed, passing through realistic opening and
//! closing states. An opened door can close itself after a delay.
//!
//! The crate holds the door state machine. The host supplies:
//!
//! - an [`Actuator`](actuator::Actuator) that drives the output pin
//! - a [`Scheduler`](scheduler::Scheduler) that runs delayed, cancellable callbacks
//! - subscribers for the notifications the door emits
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use garage_remote::{DoorConfig, DoorController, Subscribable};
//! use garage_remote::actuator::SimulatedActuator;
//! use garage_remote::scheduler::TokioScheduler;
//! use garage_remote::types::TargetDoorState;
//!
//! #[tokio::main]
//! async fn main() -> garage_remote::Result<()> {
//!     let config = DoorConfig::from_json(
//!         r#"{"name": "Garage", "gpio": 7, "door_auto_close_delay": 300000}"#,
//!     )?;
//!
//!     let door = DoorController::new(
//!         config,
//!         Arc::new(SimulatedActuator::new()),
//!         Arc::new(TokioScheduler::current()?),
//!     );
//!
//!     door.on_current_state_changed(|state| println!("Door is now {state}"));
//!     door.set_target_state(TargetDoorState::Open)?;
//!     Ok(())
//! }
//! ```
//!
//! # Simulated Time
//!
//! With a [`ManualScheduler`](scheduler::ManualScheduler) the whole cycle
//! runs without waiting:
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use garage_remote::{DoorConfig, DoorController};
//! use garage_remote::actuator::SimulatedActuator;
//! use garage_remote::scheduler::ManualScheduler;
//! use garage_remote::types::{CurrentDoorState, PinId, TargetDoorState};
//!
//! let scheduler = Arc::new(ManualScheduler::new());
//! let config = DoorConfig::new("Garage", PinId::new(7))
//!     .with_door_movement_duration(Duration::from_secs(10))
//!     .with_auto_close_delay(Duration::from_secs(5));
//! let door = DoorController::new(config, Arc::new(SimulatedActuator::new()), scheduler.clone());
//!
//! door.set_target_state(TargetDoorState::Open).unwrap();
//! scheduler.advance(Duration::from_secs(15));
//! assert_eq!(door.current_state(), CurrentDoorState::Closing);
//! assert_eq!(door.target_state(), TargetDoorState::Closed);
//!
//! scheduler.advance(Duration::from_secs(10));
//! assert_eq!(door.current_state(), CurrentDoorState::Closed);
//! ```

pub mod actuator;
mod config;
mod door;
pub mod error;
pub mod event;
pub mod scheduler;
pub mod state;
pub mod subscription;
pub mod types;

pub use config::{DEFAULT_DOOR_MOVEMENT_DURATION, DEFAULT_REMOTE_PRESS_DURATION, DoorConfig};
pub use door::DoorController;
pub use error::{ConfigError, Error, Result, SchedulerError, ValueError};
pub use subscription::{CallbackRegistry, Subscribable, SubscriptionId};
pub use types::{CurrentDoorState, Level, PinId, TargetDoorState};
