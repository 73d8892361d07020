// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast channel carrying door events, shared by one or more doors.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use super::{DoorEvent, DoorId};

/// Room for a few full door cycles before a slow reader lags.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Fan-out of [`DoorEvent`]s from any number of doors.
///
/// Publishing never blocks, so timer callbacks can publish directly. A
/// reader that falls more than the capacity behind gets
/// [`RecvError::Lagged`] and continues with the oldest retained event.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DoorEvent>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Receives the events of every door on this bus.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DoorEvent> {
        self.sender.subscribe()
    }

    /// Receives only the events of `door_id`.
    #[must_use]
    pub fn subscribe_door(&self, door_id: DoorId) -> DoorReceiver {
        DoorReceiver {
            door_id,
            inner: self.sender.subscribe(),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn publish(&self, event: DoorEvent) {
        // Nobody listening.
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver for the events of a single door on a possibly shared bus.
#[derive(Debug)]
pub struct DoorReceiver {
    door_id: DoorId,
    inner: broadcast::Receiver<DoorEvent>,
}

impl DoorReceiver {
    /// The door whose events are received.
    #[must_use]
    pub fn door_id(&self) -> DoorId {
        self.door_id
    }

    /// Waits for the next event of this door.
    ///
    /// # Errors
    ///
    /// Returns [`RecvError::Lagged`] if events were dropped, or
    /// [`RecvError::Closed`] once every sender is gone.
    pub async fn recv(&mut self) -> Result<DoorEvent, RecvError> {
        loop {
            let event = self.inner.recv().await?;
            if event.door_id() == self.door_id {
                return Ok(event);
            }
        }
    }

    /// Returns the next queued event of this door without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`TryRecvError::Empty`] when none of this door's events are
    /// queued, otherwise as [`broadcast::Receiver::try_recv`].
    pub fn try_recv(&mut self) -> Result<DoorEvent, TryRecvError> {
        loop {
            let event = self.inner.try_recv()?;
            if event.door_id() == self.door_id {
                return Ok(event);
            }
        }
    }
}
