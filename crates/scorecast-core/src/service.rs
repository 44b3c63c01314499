//! The facade the transport layer drives.
//!
//! [`SyncService`] wires the store, gateway, registry, and dispatcher
//! together and exposes the three operations the connection plumbing
//! calls: [`on_connect`](SyncService::on_connect),
//! [`on_mutation_request`](SyncService::on_mutation_request), and
//! [`on_disconnect`](SyncService::on_disconnect). Everything above this
//! facade is framing and rendering; everything below is ignorant of the
//! wire.

use std::sync::Arc;

use scorecast_types::{Snapshot, SubscriberId, Team, TeamId};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::dispatch::Dispatcher;
use crate::error::GatewayError;
use crate::gateway::MutationGateway;
use crate::registry::{Subscriber, SubscriptionRegistry};
use crate::store::ScoreStore;

/// The synchronization core behind one leaderboard.
#[derive(Debug)]
pub struct SyncService {
    store: Arc<RwLock<ScoreStore>>,
    registry: Arc<SubscriptionRegistry>,
    gateway: MutationGateway,
}

impl SyncService {
    /// Build the core around the given seed teams.
    pub fn new(seed: Vec<Team>) -> Self {
        let store = Arc::new(RwLock::new(ScoreStore::from_seed(seed)));
        let registry = Arc::new(SubscriptionRegistry::new());
        let dispatcher = Dispatcher::new(Arc::clone(&registry));
        let gateway = MutationGateway::new(Arc::clone(&store), dispatcher);
        Self {
            store,
            registry,
            gateway,
        }
    }

    /// Register a newly connected observer and immediately send it the
    /// current snapshot, so it never waits for the next mutation.
    ///
    /// Holding the store's read lock across register-and-send excludes
    /// the (write-locked) mutate-and-broadcast section: the new
    /// subscriber receives either an in-flight broadcast or this initial
    /// snapshot, and its first frame can never be older than a frame
    /// already queued behind it.
    pub async fn on_connect(&self, subscriber: Subscriber) {
        let store = self.store.read().await;
        let id = subscriber.id();
        self.registry.register(subscriber.clone()).await;
        if let Err(reason) = subscriber.send(store.get_all()) {
            warn!(
                subscriber_id = %id,
                %reason,
                "initial snapshot delivery failed, dropping subscriber"
            );
            self.registry.unregister(&id).await;
            return;
        }
        debug!(subscriber_id = %id, "observer connected");
    }

    /// Validate and apply an administrator score change, broadcasting
    /// the new snapshot to every observer before returning.
    ///
    /// # Errors
    ///
    /// See [`MutationGateway::request_points`].
    pub async fn on_mutation_request(
        &self,
        team_id: TeamId,
        raw_points: &Value,
    ) -> Result<Snapshot, GatewayError> {
        self.gateway.request_points(team_id, raw_points).await
    }

    /// Unregister a disconnected observer. Idempotent: the dispatcher
    /// may already have dropped it after a failed delivery.
    pub async fn on_disconnect(&self, id: &SubscriberId) {
        self.registry.unregister(id).await;
        debug!(subscriber_id = %id, "observer disconnected");
    }

    /// Current board state, for REST reads and the status page.
    pub async fn snapshot(&self) -> Snapshot {
        self.gateway.snapshot().await
    }

    /// Number of currently connected observers.
    pub async fn subscriber_count(&self) -> usize {
        self.registry.len().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seed() -> Vec<Team> {
        vec![
            Team::new(TeamId::new(1), String::from("Alpha"), 100),
            Team::new(TeamId::new(2), String::from("Beta"), 85),
        ]
    }

    #[tokio::test]
    async fn end_to_end_scenario() {
        let service = SyncService::new(seed());
        let (subscriber, mut rx) = Subscriber::channel();
        service.on_connect(subscriber).await;

        // Initial delivery reflects the seed.
        let first = rx.try_recv().ok();
        assert_eq!(
            first.as_ref().and_then(|s| s.score_of(TeamId::new(1))),
            Some(100)
        );

        // +20 to team 1.
        let after_first = service
            .on_mutation_request(TeamId::new(1), &json!(20))
            .await
            .ok();
        assert_eq!(
            after_first.as_ref().and_then(|s| s.score_of(TeamId::new(1))),
            Some(120)
        );
        assert_eq!(
            after_first.as_ref().and_then(|s| s.score_of(TeamId::new(2))),
            Some(85)
        );

        // -200 to team 2: negative scores are permitted.
        let after_second = service
            .on_mutation_request(TeamId::new(2), &json!(-200))
            .await
            .ok();
        assert_eq!(
            after_second.as_ref().and_then(|s| s.score_of(TeamId::new(2))),
            Some(-115)
        );

        // Empty input is rejected and nothing changes.
        let rejected = service
            .on_mutation_request(TeamId::new(1), &json!(""))
            .await;
        assert!(matches!(rejected, Err(GatewayError::InvalidAmount { .. })));
        let current = service.snapshot().await;
        assert_eq!(current.score_of(TeamId::new(1)), Some(120));
        assert_eq!(current.score_of(TeamId::new(2)), Some(-115));

        // The observer saw the two successful snapshots, in order, and
        // nothing for the rejected request.
        let m1 = rx.try_recv().ok();
        let m2 = rx.try_recv().ok();
        assert_eq!(m1.and_then(|s| s.score_of(TeamId::new(1))), Some(120));
        assert_eq!(m2.and_then(|s| s.score_of(TeamId::new(2))), Some(-115));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn late_observer_first_sees_all_prior_mutations() {
        let service = SyncService::new(seed());
        for _ in 0..3 {
            let _ = service.on_mutation_request(TeamId::new(1), &json!(10)).await;
        }

        let (subscriber, mut rx) = Subscriber::channel();
        service.on_connect(subscriber).await;

        let first = rx.try_recv().ok();
        assert_eq!(first.and_then(|s| s.score_of(TeamId::new(1))), Some(130));
    }

    #[tokio::test]
    async fn disconnect_stops_deliveries() {
        let service = SyncService::new(seed());
        let (subscriber, mut rx) = Subscriber::channel();
        let id = subscriber.id();
        service.on_connect(subscriber).await;
        let _ = rx.try_recv();

        service.on_disconnect(&id).await;
        assert_eq!(service.subscriber_count().await, 0);

        let _ = service.on_mutation_request(TeamId::new(1), &json!(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn concurrent_mutations_and_connects_lose_nothing() {
        let service = Arc::new(SyncService::new(seed()));

        let writer = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                for _ in 0..50 {
                    let _ = service.on_mutation_request(TeamId::new(1), &json!(1)).await;
                }
            })
        };
        let connector = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                for _ in 0..10 {
                    let (subscriber, rx) = Subscriber::channel();
                    let id = subscriber.id();
                    service.on_connect(subscriber).await;
                    drop(rx);
                    service.on_disconnect(&id).await;
                }
            })
        };
        let _ = writer.await;
        let _ = connector.await;

        assert_eq!(service.snapshot().await.score_of(TeamId::new(1)), Some(150));
        assert_eq!(service.subscriber_count().await, 0);
    }
}
