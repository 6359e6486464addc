//! Panel-wide notifications.
//!
//! Any part of the editor can publish a [`Notification`]; every subscriber
//! gets its own [`crossbeam_channel`] receiver and drains it on its next
//! frame. A publisher can exclude itself so that, for example, a slot opening
//! its selector closes every *other* popup but not its own.

use crossbeam_channel::{Receiver, Sender, TryIter};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Editor-wide events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// A patch was loaded; engine state may have changed under the GUI.
    PatchUpdated,
    /// Close any transient popup (selectors, browsers).
    KillPopups,
}

/// Identifies a subscriber so it can publish without hearing itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Receiving end handed to each subscriber.
pub struct Subscription {
    id: SubscriberId,
    rx: Receiver<Notification>,
}

impl Subscription {
    /// This subscriber's id.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Drain pending notifications without blocking.
    pub fn drain(&self) -> TryIter<'_, Notification> {
        self.rx.try_iter()
    }
}

/// Fan-out of notifications to every live subscriber.
#[derive(Default)]
pub struct NotificationBus {
    subscribers: Mutex<Vec<(SubscriberId, Sender<Notification>)>>,
    next_id: AtomicU64,
}

impl NotificationBus {
    /// Empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> Subscription {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.lock().push((id, tx));
        Subscription { id, rx }
    }

    /// Deliver to every subscriber. Returns how many received it.
    pub fn publish(&self, notification: Notification) -> usize {
        self.send(None, notification)
    }

    /// Deliver to every subscriber except `origin`.
    pub fn publish_from(&self, origin: SubscriberId, notification: Notification) -> usize {
        self.send(Some(origin), notification)
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    fn send(&self, origin: Option<SubscriberId>, notification: Notification) -> usize {
        let mut delivered = 0;
        // Dropped subscriptions disconnect their sender; forget them here.
        self.subscribers.lock().retain(|(id, tx)| {
            if Some(*id) == origin {
                return true;
            }
            let sent = tx.send(notification).is_ok();
            delivered += usize::from(sent);
            sent
        });
        tracing::trace!(?notification, delivered, "notification published");
        delivered
    }
}
