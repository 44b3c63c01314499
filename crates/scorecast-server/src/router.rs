//! Axum router construction.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS and request tracing middleware.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::admin;
use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- minimal HTML standings page
/// - `GET /ws/leaderboard` -- `WebSocket` snapshot stream
/// - `GET /api/teams` -- current board
/// - `GET /api/leaderboard` -- board ranked by score
/// - `GET /api/status` -- server status
/// - `POST /api/admin/points` -- administrator score change
///
/// With `cors_origin = None` any origin is allowed (development
/// default); a configured origin restricts cross-origin access to the
/// deployed frontend.
pub fn build_router(state: Arc<AppState>, cors_origin: Option<&str>) -> Router {
    let allowed = cors_origin.and_then(|origin| {
        origin
            .parse::<HeaderValue>()
            .map_err(|e| {
                warn!(origin, error = %e, "invalid cors_origin, allowing any origin");
            })
            .ok()
    });
    let cors = allowed.map_or_else(
        || {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        },
        |origin| {
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any)
        },
    );

    Router::new()
        // Standings page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/leaderboard", get(ws::ws_leaderboard))
        // REST API
        .route("/api/teams", get(handlers::list_teams))
        .route("/api/leaderboard", get(handlers::leaderboard))
        .route("/api/status", get(handlers::status))
        // Admin API
        .route("/api/admin/points", post(admin::add_points))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
