//! Snapshot fan-out to every registered observer.
//!
//! Delivery is fire-and-forget per subscriber: one observer's dead or
//! congested connection never delays the others and never surfaces an
//! error on the mutation path. A failed delivery is logged and the
//! subscriber is dropped from the registry; its transport task observes
//! the closed queue and finishes the disconnect on its own.

use std::sync::Arc;

use scorecast_types::{Snapshot, SubscriberId};
use tracing::{debug, warn};

use crate::registry::SubscriptionRegistry;

/// Pushes each new snapshot to every registered subscriber.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<SubscriptionRegistry>,
}

impl Dispatcher {
    /// Create a dispatcher over the given registry.
    pub const fn new(registry: Arc<SubscriptionRegistry>) -> Self {
        Self { registry }
    }

    /// Deliver one snapshot to every currently registered subscriber.
    ///
    /// Returns the number of subscribers the snapshot was enqueued for.
    /// Subscribers whose queue is full or closed are unregistered;
    /// delivery to the rest always proceeds. Delivery order across
    /// distinct subscribers is unspecified; order of successive
    /// snapshots to a single subscriber follows its FIFO queue.
    pub async fn broadcast(&self, snapshot: &Snapshot) -> usize {
        let subscribers = self.registry.all().await;
        let mut delivered: usize = 0;
        let mut dropped: Vec<SubscriberId> = Vec::new();

        for subscriber in subscribers {
            match subscriber.send(snapshot.clone()) {
                Ok(()) => delivered = delivered.saturating_add(1),
                Err(reason) => {
                    warn!(
                        subscriber_id = %subscriber.id(),
                        %reason,
                        "snapshot delivery failed, dropping subscriber"
                    );
                    dropped.push(subscriber.id());
                }
            }
        }

        for id in &dropped {
            self.registry.unregister(id).await;
        }

        debug!(delivered, dropped = dropped.len(), "snapshot broadcast");
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorecast_types::{Team, TeamId};

    use crate::registry::Subscriber;

    fn snapshot(score: i64) -> Snapshot {
        Snapshot {
            teams: vec![Team::new(TeamId::new(1), String::from("Team Alpha"), score)],
        }
    }

    #[tokio::test]
    async fn broadcast_reaches_every_subscriber() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let dispatcher = Dispatcher::new(Arc::clone(&registry));

        let (sub_a, mut rx_a) = Subscriber::channel();
        let (sub_b, mut rx_b) = Subscriber::channel();
        registry.register(sub_a).await;
        registry.register(sub_b).await;

        let delivered = dispatcher.broadcast(&snapshot(100)).await;
        assert_eq!(delivered, 2);
        assert_eq!(
            rx_a.try_recv().ok().and_then(|s| s.score_of(TeamId::new(1))),
            Some(100)
        );
        assert_eq!(
            rx_b.try_recv().ok().and_then(|s| s.score_of(TeamId::new(1))),
            Some(100)
        );
    }

    #[tokio::test]
    async fn successive_snapshots_arrive_in_order() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let dispatcher = Dispatcher::new(Arc::clone(&registry));

        let (subscriber, mut rx) = Subscriber::channel();
        registry.register(subscriber).await;

        dispatcher.broadcast(&snapshot(110)).await;
        dispatcher.broadcast(&snapshot(120)).await;

        let first = rx.try_recv().ok().and_then(|s| s.score_of(TeamId::new(1)));
        let second = rx.try_recv().ok().and_then(|s| s.score_of(TeamId::new(1)));
        assert_eq!(first, Some(110));
        assert_eq!(second, Some(120));
    }

    #[tokio::test]
    async fn full_queue_drops_only_that_subscriber() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let dispatcher = Dispatcher::new(Arc::clone(&registry));

        let (slow, _slow_rx) = Subscriber::with_capacity(1);
        let (healthy, mut healthy_rx) = Subscriber::channel();
        registry.register(slow).await;
        registry.register(healthy).await;

        // First broadcast fills the slow subscriber's queue of one.
        assert_eq!(dispatcher.broadcast(&snapshot(1)).await, 2);
        // Second broadcast overflows it; the healthy one still receives.
        assert_eq!(dispatcher.broadcast(&snapshot(2)).await, 1);
        assert_eq!(registry.len().await, 1);

        let frames: Vec<Option<i64>> = vec![
            healthy_rx.try_recv().ok().and_then(|s| s.score_of(TeamId::new(1))),
            healthy_rx.try_recv().ok().and_then(|s| s.score_of(TeamId::new(1))),
        ];
        assert_eq!(frames, vec![Some(1), Some(2)]);
    }

    #[tokio::test]
    async fn closed_receiver_is_unregistered() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let dispatcher = Dispatcher::new(Arc::clone(&registry));

        let (subscriber, rx) = Subscriber::channel();
        registry.register(subscriber).await;
        drop(rx);

        assert_eq!(dispatcher.broadcast(&snapshot(1)).await, 0);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn unregistered_subscriber_receives_nothing() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let dispatcher = Dispatcher::new(Arc::clone(&registry));

        let (subscriber, mut rx) = Subscriber::channel();
        let id = subscriber.id();
        registry.register(subscriber).await;
        registry.unregister(&id).await;

        assert_eq!(dispatcher.broadcast(&snapshot(1)).await, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn broadcast_with_no_subscribers_is_a_no_op() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let dispatcher = Dispatcher::new(registry);
        assert_eq!(dispatcher.broadcast(&snapshot(1)).await, 0);
    }
}
