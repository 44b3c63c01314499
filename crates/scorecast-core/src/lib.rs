//! Synchronization core for the Scorecast leaderboard service.
//!
//! One authoritative collection of scored teams, mutated by a single
//! administrator and continuously pushed as full snapshots to any number
//! of read-only observers. This crate is transport-agnostic: it knows
//! nothing about `WebSocket` upgrades or HTTP, only about subscribers as
//! bounded outbound queues.
//!
//! # Components
//!
//! - [`store::ScoreStore`] -- canonical team/score map, pure data
//! - [`gateway::MutationGateway`] -- validates and applies score deltas;
//!   the only writer
//! - [`registry::SubscriptionRegistry`] -- the set of connected observers
//! - [`dispatch::Dispatcher`] -- pushes each new snapshot to every
//!   registered observer, isolating per-subscriber failures
//! - [`service::SyncService`] -- the facade the transport layer calls:
//!   `on_connect`, `on_mutation_request`, `on_disconnect`
//!
//! # Consistency
//!
//! Mutations are serialized behind a single write lock that also covers
//! the broadcast hand-off, so every subscriber observes snapshots in
//! mutation order and no concurrent delta is ever lost. Fan-out itself
//! is non-blocking: a slow observer is dropped, never waited on.

pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod registry;
pub mod service;
pub mod store;

// Re-export primary types for convenience.
pub use dispatch::Dispatcher;
pub use error::{DeliveryError, GatewayError, StoreError};
pub use gateway::MutationGateway;
pub use registry::{Subscriber, SubscriptionRegistry, OUTBOUND_QUEUE_CAPACITY};
pub use service::SyncService;
pub use store::ScoreStore;
