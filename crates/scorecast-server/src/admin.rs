//! Administrator REST endpoint for score changes.
//!
//! Separate from the read-only API: this is the single write path into
//! the board. The points value is accepted exactly as submitted
//! (number, numeric string, or junk) and validated by the core, which
//! is what decides that `"abc"`, zero, and a missing value are not
//! mutations.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/admin/points` | Add a signed delta to one team's score |

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use scorecast_types::TeamId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /api/admin/points`.
#[derive(Debug, serde::Deserialize)]
pub struct AddPointsRequest {
    /// Target team. A JSON number or numeric string, canonicalized at
    /// the boundary.
    pub team_id: TeamId,
    /// The points delta, untyped: validated by the mutation gateway.
    /// Absent means "no points entered" and is rejected.
    #[serde(default)]
    pub points: serde_json::Value,
}

/// Apply a signed points delta to one team.
///
/// Returns the full resulting board on success; the same snapshot has
/// already been pushed to every connected observer by the time this
/// response is produced.
pub async fn add_points(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddPointsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state
        .service
        .on_mutation_request(body.team_id, &body.points)
        .await?;

    Ok(Json(serde_json::json!({
        "ok": true,
        "teams": snapshot.teams,
    })))
}
