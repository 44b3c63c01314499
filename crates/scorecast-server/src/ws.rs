//! `WebSocket` handler for real-time board streaming.
//!
//! Clients connect to `GET /ws/leaderboard`. On upgrade the connection
//! is registered with the core, which immediately queues the current
//! snapshot; afterwards every successful score change queues another.
//! Each queued [`Snapshot`](scorecast_types::Snapshot) is forwarded to
//! the wire as one JSON text frame, full board every time, so clients
//! simply replace their state on receipt.
//!
//! The outbound queue is bounded: if this client stops draining it, the
//! core drops the subscriber and the queue closes, ending the task.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use scorecast_core::Subscriber;
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming board snapshots.
///
/// # Route
///
/// `GET /ws/leaderboard`
pub async fn ws_leaderboard(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Handle the `WebSocket` lifecycle: register with the core, drain the
/// subscriber queue to the wire, and unregister on any exit path.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let (subscriber, mut rx) = Subscriber::channel();
    let subscriber_id = subscriber.id();
    state.service.on_connect(subscriber).await;
    debug!(%subscriber_id, "leaderboard client connected");

    loop {
        tokio::select! {
            // A snapshot queued by the core (initial or broadcast).
            update = rx.recv() => {
                match update {
                    Some(snapshot) => {
                        let json = match serde_json::to_string(&snapshot) {
                            Ok(j) => j,
                            Err(e) => {
                                warn!(%subscriber_id, "failed to serialize snapshot: {e}");
                                continue;
                            }
                        };
                        let msg: Message = Message::Text(json.into());
                        if socket.send(msg).await.is_err() {
                            debug!(%subscriber_id, "leaderboard client disconnected (send failed)");
                            break;
                        }
                    }
                    None => {
                        // The core dropped this subscriber (queue backed
                        // up or disconnect already processed).
                        debug!(%subscriber_id, "outbound queue closed, ending session");
                        break;
                    }
                }
            }
            // Traffic from the client: only close and ping matter.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(%subscriber_id, "leaderboard client disconnected");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let pong = Message::Pong(data);
                        if socket.send(pong).await.is_err() {
                            debug!(%subscriber_id, "leaderboard client disconnected (pong failed)");
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(%subscriber_id, "WebSocket error: {e}");
                        break;
                    }
                    _ => {
                        // Observers are read-only; ignore text/binary.
                    }
                }
            }
        }
    }

    state.service.on_disconnect(&subscriber_id).await;
}
