//! Ingress relay and push channel server for the EcoEscape game.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Ingress** (`GET /update?status=`) for the solar panel's sensor
//!   board. A status of exactly `ok` fans out to every subscriber.
//! - **`WebSocket` push channel** (`GET /socket`) carrying `energie`
//!   events, plus a per-connection puzzle session driven by client frames
//! - **Health check** (`GET /health`) and a minimal HTML status page (`GET /`)
//!
//! # Architecture
//!
//! Subscribers live in a [`ConnectionRegistry`] guarded by one async
//! mutex. Broadcasts never wait on a subscriber: each has a bounded queue
//! and a full queue drops the event for that subscriber only. Nothing is
//! replayed to late joiners.
//!
//! [`ConnectionRegistry`]: registry::ConnectionRegistry

pub mod connection;
pub mod error;
pub mod handlers;
pub mod ingress;
pub mod registry;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use connection::PuzzleConnection;
pub use error::RelayError;
pub use ingress::IngressRelay;
pub use registry::{BroadcastReport, ConnectionRegistry, Subscription};
pub use router::build_router;
pub use server::{ServerError, spawn_relay, start_server};
pub use state::AppState;
