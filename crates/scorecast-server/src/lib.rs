//! Transport boundary for the Scorecast leaderboard service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws/leaderboard`) pushing a full board
//!   snapshot on connect and after every successful score change
//! - **REST endpoints** for reading the board (`/api/teams`,
//!   `/api/leaderboard`, `/api/status`)
//! - **Admin endpoint** (`POST /api/admin/points`) for submitting score
//!   deltas
//! - **Minimal HTML standings page** (`GET /`)
//!
//! # Architecture
//!
//! All state synchronization logic lives in `scorecast-core`; this crate
//! only frames messages, upgrades connections, and renders. Each
//! `WebSocket` connection owns one subscriber handle and drains its
//! bounded outbound queue to the wire; the core drops subscribers whose
//! queues back up, so a stalled client can never stall the board.

pub mod admin;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use config::{AppConfig, ConfigError, ServerConfig};
pub use router::build_router;
pub use server::{start_server, ServerError};
pub use state::AppState;
