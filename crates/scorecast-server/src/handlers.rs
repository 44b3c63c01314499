//! Read-side REST handlers and the HTML standings page.
//!
//! All reads go through the core's snapshot accessor, so they are
//! consistent: a snapshot always reflects a whole mutation, never half
//! of one.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML standings page |
//! | `GET` | `/api/teams` | Current board, id order |
//! | `GET` | `/api/leaderboard` | Current board, ranked by score |
//! | `GET` | `/api/status` | Uptime and connection counts |

use std::fmt::Write as _;
use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Json;

use crate::state::AppState;

/// Serve a minimal HTML page showing the current standings and API
/// links. The real frontend is the React leaderboard; this page exists
/// so the service is inspectable from a bare browser.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.service.snapshot().await;
    let observers = state.service.subscriber_count().await;
    let uptime = state.uptime_seconds();

    let mut rows = String::new();
    for (team, rank) in snapshot.ranked().into_iter().zip(1u32..) {
        let _ = write!(
            rows,
            "<tr><td>{rank}</td><td>{name}</td><td>{score}</td></tr>",
            name = team.name,
            score = team.score
        );
    }

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Scorecast</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 720px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        table {{ border-collapse: collapse; margin: 1rem 0; min-width: 320px; }}
        th, td {{
            border: 1px solid #30363d;
            padding: 0.5rem 1rem;
            text-align: left;
        }}
        th {{ background: #161b22; color: #8b949e; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Scorecast</h1>
    <p class="subtitle">Live leaderboard synchronization service</p>

    <p>Status: <span class="status">RUNNING</span> -- {observers} observer(s) connected, up {uptime}s</p>

    <table>
        <tr><th>#</th><th>Team</th><th>Points</th></tr>
        {rows}
    </table>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/teams">/api/teams</a> -- Current board</li>
        <li><a href="/api/leaderboard">/api/leaderboard</a> -- Board ranked by score</li>
        <li><a href="/api/status">/api/status</a> -- Server status</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li style="list-style:none;"><code>ws://host:port/ws/leaderboard</code> -- Live snapshot stream</li>
    </ul>
</body>
</html>"#
    ))
}

/// Return the current board in id order.
pub async fn list_teams(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.service.snapshot().await;
    Json(serde_json::json!({
        "count": snapshot.len(),
        "teams": snapshot.teams,
    }))
}

/// Return the current board ranked by score, highest first.
pub async fn leaderboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.service.snapshot().await;
    let standings: Vec<serde_json::Value> = snapshot
        .ranked()
        .into_iter()
        .zip(1u32..)
        .map(|(team, rank)| {
            serde_json::json!({
                "rank": rank,
                "id": team.id,
                "name": team.name,
                "points": team.score,
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": standings.len(),
        "standings": standings,
    }))
}

/// Return server status: uptime, board size, connected observers.
pub async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.service.snapshot().await;
    let observers = state.service.subscriber_count().await;

    Json(serde_json::json!({
        "teams": snapshot.len(),
        "observers": observers,
        "uptime_seconds": state.uptime_seconds(),
        "started_at": state.started_at.to_rfc3339(),
    }))
}
