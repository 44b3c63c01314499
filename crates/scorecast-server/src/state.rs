//! Shared application state for the Axum server.
//!
//! Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
//! extractor. Handlers reach the synchronization core through it; the
//! start time feeds the status endpoint.

use chrono::{DateTime, Utc};
use scorecast_core::SyncService;

/// State shared by every handler.
#[derive(Debug)]
pub struct AppState {
    /// The synchronization core behind the board.
    pub service: SyncService,
    /// Wall-clock time the server started.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Wrap a service, stamping the start time.
    pub fn new(service: SyncService) -> Self {
        Self {
            service,
            started_at: Utc::now(),
        }
    }

    /// Elapsed whole seconds since the server started.
    pub fn uptime_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        // Negative only if the clock moved; treat as zero.
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }
}
