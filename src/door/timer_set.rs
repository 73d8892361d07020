// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The set of timers belonging to the active transition chain.

use std::collections::HashMap;

use crate::scheduler::{Scheduler, TimerHandle};

/// Controller-side identity of a scheduled step.
///
/// Reserved before the timer is handed to the scheduler so the callback can
/// carry it; a callback whose key is no longer in the set was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TimerKey(u64);

/// Live timers of the current command and the step each one runs,
/// cancelled together.
#[derive(Debug)]
pub(crate) struct TimerSet<S> {
    next_key: u64,
    timers: HashMap<TimerKey, (TimerHandle, S)>,
}

impl<S: Copy> TimerSet<S> {
    pub(crate) fn new() -> Self {
        Self {
            next_key: 0,
            timers: HashMap::new(),
        }
    }

    /// Reserves a key for a timer about to be scheduled.
    pub(crate) fn reserve(&mut self) -> TimerKey {
        self.next_key += 1;
        TimerKey(self.next_key)
    }

    pub(crate) fn insert(&mut self, key: TimerKey, handle: TimerHandle, step: S) {
        self.timers.insert(key, (handle, step));
    }

    /// Claims a timer that just fired, returning the step it runs.
    ///
    /// Returns `None` if the timer was cancelled in the meantime.
    pub(crate) fn take(&mut self, key: TimerKey) -> Option<S> {
        self.timers.remove(&key).map(|(_, step)| step)
    }

    /// Cancels every live timer and empties the set.
    ///
    /// Returns the number of timers cancelled.
    pub(crate) fn cancel_all(&mut self, scheduler: &dyn Scheduler) -> usize {
        let timers = std::mem::take(&mut self.timers);
        let count = timers.len();
        for (handle, _) in timers.into_values() {
            scheduler.cancel(handle);
        }
        count
    }

    pub(crate) fn len(&self) -> usize {
        self.timers.len()
    }

    #[cfg(test)]
    pub(crate) fn steps(&self) -> Vec<S> {
        self.timers.values().map(|&(_, step)| step).collect()
    }
}
