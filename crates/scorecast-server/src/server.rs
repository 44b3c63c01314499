//! HTTP server lifecycle management.
//!
//! [`start_server`] binds the listener, builds the router, and serves
//! until a shutdown signal arrives. There is no fatal error path after
//! startup: connection-level failures are handled per connection.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::router::build_router;
use crate::state::AppState;

/// Errors that can occur when starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listen address could not be parsed or bound.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

/// Start the HTTP + `WebSocket` server.
///
/// Binds to the configured address and serves requests until `Ctrl-C`.
/// Returns `Ok(())` on clean shutdown.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the address is invalid or the TCP
/// listener cannot bind, [`ServerError::Serve`] on a fatal I/O error.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_router(state, config.cors_origin.as_deref());

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "scorecast server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    info!("scorecast server stopped");
    Ok(())
}

/// Resolve when the process receives `Ctrl-C`.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl-C handler, running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
