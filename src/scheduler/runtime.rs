// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scheduler backed by the tokio timer wheel.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::{Scheduler, Task, TimerHandle};
use crate::error::SchedulerError;

type TaskMap = Arc<Mutex<HashMap<TimerHandle, JoinHandle<()>>>>;

/// Spawns one tokio task per timer.
///
/// Cancelling aborts the task. A task that already woke up and is running
/// its callback cannot be stopped, so callers that need exact cancellation
/// must also guard their callbacks (the door controller does).
///
/// # Examples
///
/// ```
/// use garage_remote::scheduler::TokioScheduler;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> garage_remote::Result<()> {
/// let scheduler = TokioScheduler::current()?;
/// assert_eq!(scheduler.pending(), 0);
/// # Ok(())
/// # }
/// ```
pub struct TokioScheduler {
    runtime: Handle,
    next_id: AtomicU64,
    tasks: TaskMap,
}

impl TokioScheduler {
    /// Creates a scheduler on the runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::NoRuntime`] when called outside a tokio
    /// runtime.
    pub fn current() -> Result<Self, SchedulerError> {
        let runtime =
            Handle::try_current().map_err(|e| SchedulerError::NoRuntime(e.to_string()))?;
        Ok(Self::with_handle(runtime))
    }

    /// Creates a scheduler that spawns onto the given runtime.
    #[must_use]
    pub fn with_handle(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: AtomicU64::new(1),
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the number of timers that have neither fired nor been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let tasks = Arc::clone(&self.tasks);

        // Held across the spawn so the task cannot deregister before it is
        // registered.
        let mut registered = self.tasks.lock();
        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            tasks.lock().remove(&handle);
            task();
        });
        registered.insert(handle, join);

        tracing::trace!(%handle, ?delay, "Timer scheduled");
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Some(join) = self.tasks.lock().remove(&handle) {
            join.abort();
            tracing::trace!(%handle, "Timer cancelled");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, join) in self.tasks.lock().drain() {
            join.abort();
        }
    }
}

impl std::fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn current_fails_outside_runtime() {
        let result = TokioScheduler::current();
        assert!(matches!(result, Err(SchedulerError::NoRuntime(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let scheduler = TokioScheduler::current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        scheduler.schedule(
            Duration::from_millis(500),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        assert_eq!(scheduler.pending(), 1);

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let scheduler = TokioScheduler::current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        let handle = scheduler.schedule(
            Duration::from_millis(100),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        scheduler.cancel(handle);
        // Idempotent.
        scheduler.cancel(handle);
        assert_eq!(scheduler.pending(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_fire_is_noop() {
        let scheduler = TokioScheduler::current().unwrap();
        let handle = scheduler.schedule(Duration::ZERO, Box::new(|| {}));

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(scheduler.pending(), 0);
        scheduler.cancel(handle);
    }
}
