// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Virtual-clock scheduler.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use parking_lot::Mutex;

use super::{Scheduler, Task, TimerHandle};

/// A scheduler whose clock only moves when told to.
///
/// Time starts at zero. [`advance`](Self::advance) moves the clock forward
/// and runs every timer whose deadline is reached, one at a time and in
/// deadline order (ties in submission order). Timers scheduled by a
/// callback during an advance run in the same advance if their deadline
/// falls inside the window.
///
/// Callbacks run on the caller's thread with no internal lock held, so they
/// may schedule and cancel freely.
#[derive(Default)]
pub struct ManualScheduler {
    inner: Mutex<Timeline>,
}

#[derive(Default)]
struct Timeline {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, TimerHandle), Task>,
    deadlines: HashMap<TimerHandle, Duration>,
}

impl Timeline {
    /// Removes and returns the earliest timer due at or before `limit`.
    fn pop_due(&mut self, limit: Duration) -> Option<(Duration, Task)> {
        let (&(deadline, handle), _) = self.queue.first_key_value()?;
        if deadline > limit {
            return None;
        }
        let task = self.queue.remove(&(deadline, handle))?;
        self.deadlines.remove(&handle);
        Some((deadline, task))
    }
}

impl ManualScheduler {
    /// Creates a scheduler with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.lock().now
    }

    /// Returns the number of timers that have neither fired nor been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.lock().queue.len()
    }

    /// Returns the deadline of the next timer to fire, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner
            .lock()
            .queue
            .first_key_value()
            .map(|(&(deadline, _), _)| deadline)
    }

    /// Moves the clock forward by `by`, running every timer that comes due.
    ///
    /// Returns the number of callbacks run.
    pub fn advance(&self, by: Duration) -> usize {
        let limit = self.inner.lock().now + by;
        self.advance_to(limit)
    }

    /// Moves the clock forward to `instant`, running every timer that comes due.
    ///
    /// An instant in the past only runs timers that are already due.
    pub fn advance_to(&self, instant: Duration) -> usize {
        let mut fired = 0;
        loop {
            let due = {
                let mut timeline = self.inner.lock();
                let limit = instant.max(timeline.now);
                match timeline.pop_due(limit) {
                    Some((deadline, task)) => {
                        timeline.now = deadline.max(timeline.now);
                        Some(task)
                    }
                    None => {
                        timeline.now = limit;
                        None
                    }
                }
            };
            match due {
                Some(task) => {
                    task();
                    fired += 1;
                }
                None => return fired,
            }
        }
    }

    /// Runs timers until none are left, moving the clock as needed.
    ///
    /// Returns the number of callbacks run.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.next_deadline() {
            fired += self.advance_to(deadline);
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let mut timeline = self.inner.lock();
        timeline.next_id += 1;
        let handle = TimerHandle::new(timeline.next_id);
        let deadline = timeline.now + delay;
        timeline.queue.insert((deadline, handle), task);
        timeline.deadlines.insert(handle, deadline);
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut timeline = self.inner.lock();
        if let Some(deadline) = timeline.deadlines.remove(&handle) {
            timeline.queue.remove(&(deadline, handle));
        }
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let timeline = self.inner.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &timeline.now)
            .field("pending", &timeline.queue.len())
            .finish()
    }
}
