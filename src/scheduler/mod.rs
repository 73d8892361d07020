// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Delayed, cancellable callbacks.
//!
//! The door controller never sleeps. Every transition is a callback handed
//! to a [`Scheduler`], which runs it once the delay has elapsed unless the
//! returned [`TimerHandle`] is cancelled first.
//!
//! Two schedulers ship with the crate:
//!
//! - [`TokioScheduler`] - one tokio task per timer, for real deployments
//! - [`ManualScheduler`] - a virtual clock advanced by hand, for simulations
//!   and deterministic tests
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::time::Duration;
//! use garage_remote::scheduler::{ManualScheduler, Scheduler};
//!
//! let scheduler = ManualScheduler::new();
//! let fired = Arc::new(AtomicBool::new(false));
//!
//! let flag = Arc::clone(&fired);
//! scheduler.schedule(
//!     Duration::from_millis(100),
//!     Box::new(move || flag.store(true, Ordering::SeqCst)),
//! );
//!
//! scheduler.advance(Duration::from_millis(99));
//! assert!(!fired.load(Ordering::SeqCst));
//! scheduler.advance(Duration::from_millis(1));
//! assert!(fired.load(Ordering::SeqCst));
//! ```

mod manual;
mod runtime;

use std::fmt;
use std::time::Duration;

pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;

/// A callback to run once its timer elapses.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Identifies one scheduled callback.
///
/// Handles are unique within the scheduler that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Creates a handle from a scheduler-assigned identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// Runs callbacks after a delay.
///
/// Callbacks may schedule further callbacks. Timers fire in deadline order;
/// the order of timers sharing a deadline is unspecified.
pub trait Scheduler: Send + Sync {
    /// Runs `task` once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;

    /// Prevents `handle` from firing.
    ///
    /// Cancelling a timer that already fired or was already cancelled is a
    /// no-op.
    fn cancel(&self, handle: TimerHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_handle_display() {
        assert_eq!(TimerHandle::new(42).to_string(), "Timer(42)");
        assert_eq!(TimerHandle::new(42).value(), 42);
    }
}
