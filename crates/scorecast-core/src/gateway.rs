//! Validation and application of administrator score changes.
//!
//! The gateway is the only writer. A raw points value arrives exactly as
//! the admin panel sent it (number, string, missing, garbage) as a
//! [`serde_json::Value`]; it must resolve to a non-zero `i64` before the
//! store is touched. Zero is rejected because the admin UI submits an
//! empty input as zero, and "no points entered" must not count as a
//! mutation. Negative deltas pass: subtracting points is a normal
//! administrative action and scores may go negative.
//!
//! The store write lock is held across apply **and** broadcast hand-off,
//! so concurrent requests serialize and every subscriber sees snapshots
//! in mutation order.

use std::sync::Arc;

use scorecast_types::{Snapshot, TeamId};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use crate::dispatch::Dispatcher;
use crate::error::GatewayError;
use crate::store::ScoreStore;

/// Validates administrator requests and applies them to the store.
#[derive(Debug)]
pub struct MutationGateway {
    store: Arc<RwLock<ScoreStore>>,
    dispatcher: Dispatcher,
}

impl MutationGateway {
    /// Create a gateway over the given store and dispatcher.
    pub const fn new(store: Arc<RwLock<ScoreStore>>, dispatcher: Dispatcher) -> Self {
        Self { store, dispatcher }
    }

    /// Validate a raw points value, apply it to the team's score, and
    /// hand the resulting snapshot to the dispatcher before returning.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidAmount`] if `raw_points` does not resolve
    /// to a non-zero integer, [`GatewayError::NotFound`] if the team id
    /// is unknown. In both cases the store is untouched and observers
    /// see nothing.
    pub async fn request_points(
        &self,
        team_id: TeamId,
        raw_points: &Value,
    ) -> Result<Snapshot, GatewayError> {
        let delta = parse_delta(raw_points)?;

        // Single-writer section: read-modify-write and the broadcast
        // hand-off happen under one write lock, so a concurrent request
        // can neither lose this update nor reorder snapshots.
        let mut store = self.store.write().await;
        let snapshot = store.apply_delta(team_id, delta)?;
        let delivered = self.dispatcher.broadcast(&snapshot).await;

        info!(%team_id, delta, delivered, "points applied");
        Ok(snapshot)
    }

    /// Current board state. Served under a shared read lock: concurrent
    /// with other reads, never concurrent with a mutation mid-flight.
    pub async fn snapshot(&self) -> Snapshot {
        self.store.read().await.get_all()
    }
}

/// Resolve an untyped points value to a non-zero signed delta.
fn parse_delta(raw: &Value) -> Result<i64, GatewayError> {
    let parsed = match raw {
        Value::Null => return Err(invalid_amount("no points entered")),
        Value::Number(n) => {
            // Admin panels occasionally submit floats; truncate toward
            // zero, so 12.9 counts as 12 and 0.4 as no points.
            #[allow(clippy::cast_possible_truncation)]
            let as_int = n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64));
            as_int.ok_or_else(|| invalid_amount("points out of integer range"))?
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| invalid_amount(&format!("not an integer ({e}): {s:?}")))?,
        other => return Err(invalid_amount(&format!("unsupported points value: {other}"))),
    };

    if parsed == 0 {
        return Err(invalid_amount("zero points"));
    }
    Ok(parsed)
}

fn invalid_amount(reason: &str) -> GatewayError {
    GatewayError::InvalidAmount {
        reason: reason.to_owned(),
    }
}
