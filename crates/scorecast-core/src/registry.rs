//! The set of currently connected observers.
//!
//! Each observer is represented by a [`Subscriber`]: an opaque handle
//! carrying an identifier and a bounded outbound queue. The transport
//! layer holds the receiving half and forwards frames to the wire; the
//! core only ever enqueues.
//!
//! The registry's interior lock makes add/remove/iterate each atomic
//! with respect to one another, so a broadcast never observes a
//! half-applied membership change.

use std::collections::BTreeMap;

use scorecast_types::{Snapshot, SubscriberId};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::DeliveryError;

/// Capacity of each subscriber's outbound snapshot queue.
///
/// Sends never block: a subscriber whose queue is full is dropped by
/// the dispatcher instead of stalling the mutation path or the other
/// subscribers.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 64;

/// Opaque handle for one connected observer.
///
/// Cheap to clone: an id plus the sending half of the outbound queue.
/// Created on connect, owned by the [`SubscriptionRegistry`], destroyed
/// on disconnect.
#[derive(Debug, Clone)]
pub struct Subscriber {
    id: SubscriberId,
    tx: mpsc::Sender<Snapshot>,
}

impl Subscriber {
    /// Create a subscriber with the default queue capacity.
    ///
    /// Returns the handle together with the receiving half the transport
    /// drains to the wire.
    pub fn channel() -> (Self, mpsc::Receiver<Snapshot>) {
        Self::with_capacity(OUTBOUND_QUEUE_CAPACITY)
    }

    /// Create a subscriber with an explicit queue capacity.
    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<Snapshot>) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                id: SubscriberId::new(),
                tx,
            },
            rx,
        )
    }

    /// This subscriber's identity.
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// Enqueue one snapshot without blocking.
    ///
    /// # Errors
    ///
    /// [`DeliveryError::QueueFull`] if the consumer has fallen behind by
    /// the full queue capacity, [`DeliveryError::Disconnected`] if the
    /// receiving half is gone.
    pub fn send(&self, snapshot: Snapshot) -> Result<(), DeliveryError> {
        self.tx.try_send(snapshot).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::QueueFull,
            TrySendError::Closed(_) => DeliveryError::Disconnected,
        })
    }
}

/// Tracks every currently connected observer.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    subscribers: RwLock<BTreeMap<SubscriberId, Subscriber>>,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            subscribers: RwLock::const_new(BTreeMap::new()),
        }
    }

    /// Add a subscriber to the set.
    pub async fn register(&self, subscriber: Subscriber) {
        let mut subscribers = self.subscribers.write().await;
        subscribers.insert(subscriber.id(), subscriber);
    }

    /// Remove a subscriber. Idempotent: removing an id that is already
    /// gone is not an error (the disconnect signal may arrive after the
    /// dispatcher has dropped the subscriber).
    pub async fn unregister(&self, id: &SubscriberId) {
        let mut subscribers = self.subscribers.write().await;
        if subscribers.remove(id).is_some() {
            debug!(subscriber_id = %id, "subscriber unregistered");
        }
    }

    /// Point-in-time copy of every registered subscriber handle.
    pub async fn all(&self) -> Vec<Subscriber> {
        let subscribers = self.subscribers.read().await;
        subscribers.values().cloned().collect()
    }

    /// Number of registered subscribers.
    pub async fn len(&self) -> usize {
        self.subscribers.read().await.len()
    }

    /// Whether no subscribers are registered.
    pub async fn is_empty(&self) -> bool {
        self.subscribers.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_and_unregister() {
        let registry = SubscriptionRegistry::new();
        let (subscriber, _rx) = Subscriber::channel();
        let id = subscriber.id();

        registry.register(subscriber).await;
        assert_eq!(registry.len().await, 1);

        registry.unregister(&id).await;
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn unregister_is_idempotent() {
        let registry = SubscriptionRegistry::new();
        let (subscriber, _rx) = Subscriber::channel();
        let id = subscriber.id();

        registry.register(subscriber).await;
        registry.unregister(&id).await;
        // A second disconnect signal for the same id is a no-op.
        registry.unregister(&id).await;
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn all_is_a_point_in_time_copy() {
        let registry = SubscriptionRegistry::new();
        let (subscriber, _rx) = Subscriber::channel();
        let id = subscriber.id();
        registry.register(subscriber).await;

        let view = registry.all().await;
        registry.unregister(&id).await;

        // The copy taken before the removal still holds the handle.
        assert_eq!(view.len(), 1);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn full_queue_reports_queue_full() {
        let (subscriber, _rx) = Subscriber::with_capacity(1);
        let empty = Snapshot { teams: Vec::new() };
        assert_eq!(subscriber.send(empty.clone()), Ok(()));
        assert_eq!(subscriber.send(empty), Err(DeliveryError::QueueFull));
    }

    #[tokio::test]
    async fn dropped_receiver_reports_disconnected() {
        let (subscriber, rx) = Subscriber::channel();
        drop(rx);
        let empty = Snapshot { teams: Vec::new() };
        assert_eq!(subscriber.send(empty), Err(DeliveryError::Disconnected));
    }
}
