//! Scorecast server binary.
//!
//! Wires configuration, the synchronization core, and the Axum
//! transport together:
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `scorecast.yaml` (optional; defaults
//!    seed the classic four-team board)
//! 3. Build the synchronization core from the seed teams
//! 4. Serve HTTP + `WebSocket` until `Ctrl-C`

use std::path::Path;
use std::sync::Arc;

use scorecast_core::SyncService;
use scorecast_server::config::{AppConfig, ConfigError};
use scorecast_server::server::start_server;
use scorecast_server::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration loading or server startup fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("scorecast-server starting");

    let config = load_config()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        teams = config.teams.len(),
        "configuration loaded"
    );

    let service = SyncService::new(config.teams.clone());
    let state = Arc::new(AppState::new(service));

    start_server(&config.server, state).await?;

    info!("scorecast-server shutdown complete");
    Ok(())
}

/// Load configuration from `scorecast.yaml` in the working directory,
/// falling back to defaults when the file is absent.
fn load_config() -> Result<AppConfig, ConfigError> {
    let config_path = Path::new("scorecast.yaml");
    if config_path.exists() {
        AppConfig::from_file(config_path)
    } else {
        info!("config file not found, using defaults");
        let mut config = AppConfig::default();
        config.server.apply_env_overrides();
        Ok(config)
    }
}
