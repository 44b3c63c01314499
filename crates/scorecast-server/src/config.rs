//! Configuration loading for the Scorecast server.
//!
//! The canonical configuration lives in `scorecast.yaml` next to the
//! binary. Every field has a default, so the file is optional; the
//! default seed is the classic four-team board. Deployment knobs can be
//! overridden through the environment:
//!
//! - `SCORECAST_HOST` overrides `server.host`
//! - `SCORECAST_PORT` overrides `server.port`
//! - `CORS_ORIGIN` overrides `server.cors_origin`

use std::path::Path;

use scorecast_types::{Team, TeamId};
use serde::Deserialize;
use tracing::warn;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Teams seeded into the store at startup.
    #[serde(default = "default_teams")]
    pub teams: Vec<Team>,
}

impl AppConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.server.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.server.apply_env_overrides();
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            teams: default_teams(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Exact origin allowed for cross-origin requests. `None` allows
    /// any origin (development default).
    #[serde(default)]
    pub cors_origin: Option<String>,
}

impl ServerConfig {
    /// Apply environment variable overrides for deployment knobs.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SCORECAST_HOST") {
            self.host = val;
        }
        if let Ok(val) = std::env::var("SCORECAST_PORT") {
            match val.parse::<u16>() {
                Ok(port) => self.port = port,
                Err(e) => {
                    warn!(value = val, error = %e, "invalid SCORECAST_PORT, keeping configured port");
                }
            }
        }
        if let Ok(val) = std::env::var("CORS_ORIGIN") {
            self.cors_origin = Some(val);
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: None,
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    5000
}

/// The default seed board.
fn default_teams() -> Vec<Team> {
    vec![
        Team::new(TeamId::new(1), String::from("Team Alpha"), 100),
        Team::new(TeamId::new(2), String::from("Team Beta"), 85),
        Team::new(TeamId::new(3), String::from("Team Gamma"), 120),
        Team::new(TeamId::new(4), String::from("Team Delta"), 50),
    ]
}
