// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting light events.

use tokio::sync::broadcast;

use super::LightEvent;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Event bus for broadcasting light events to multiple subscribers.
///
/// The `EventBus` uses tokio's broadcast channel to allow multiple
/// subscribers to receive the same events. Each subscriber gets their
/// own copy of each event.
///
/// # Capacity
///
/// The event bus has a fixed capacity (default 256). If the channel fills
/// up because a subscriber is slow, older events may be dropped for that
/// subscriber (they will receive a `RecvError::Lagged` error). A listener
/// that lagged should query every light it shows; the controller answers
/// queries for lights it no longer knows with `Destroyed`.
///
/// # Non-async listeners
///
/// The receiver returned by [`subscribe`](Self::subscribe) can be drained
/// from a UI thread with `try_recv` on every frame, or with
/// `blocking_recv` from a dedicated thread.
///
/// # Examples
///
/// ```
/// use keylight_lib::event::{EventBus, LightEvent};
/// use keylight_lib::types::Serial;
///
/// let bus = EventBus::new();
///
/// // Create a subscriber
/// let mut rx = bus.subscribe();
///
/// // Publish an event
/// bus.publish(LightEvent::destroyed(Serial::new("BW33J1A02345")));
/// assert!(rx.try_recv().unwrap().is_destroyed());
///
/// // Multiple subscribers can exist
/// let _rx2 = bus.subscribe();
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<LightEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus buffering up to `capacity` events per subscriber.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender, capacity }
    }

    /// Subscribes to light events.
    ///
    /// Returns a receiver that will receive all events published after
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LightEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Returns the per-subscriber buffer size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers the event was queued for; 0 when
    /// nobody listens, in which case the event is discarded.
    pub fn publish(&self, event: LightEvent) -> usize {
        let serial = event.serial().clone();
        let kind = event.kind();
        let delivered = self.sender.send(event).unwrap_or(0);
        tracing::trace!(%serial, kind, delivered, "Published light event");
        delivered
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
