//! Shared application state for the relay server.
//!
//! [`AppState`] holds the subscriber registry, the ingress relay that
//! broadcasts through it, and the puzzle sizing used for every new
//! connection's session.

use std::sync::Arc;

use ecoescape_core::EscapeConfig;
use ecoescape_core::config::{ChannelConfig, PuzzleConfig};

use crate::ingress::IngressRelay;
use crate::registry::ConnectionRegistry;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Live push-channel subscribers.
    pub registry: Arc<ConnectionRegistry>,
    /// Device report handler.
    pub ingress: IngressRelay,
    /// Sizing for new puzzle sessions.
    pub puzzle: PuzzleConfig,
}

impl AppState {
    /// Create state from the puzzle and channel sections of the config.
    pub fn new(puzzle: PuzzleConfig, channel: &ChannelConfig) -> Self {
        let registry = Arc::new(ConnectionRegistry::new(channel.subscriber_buffer));
        Self {
            ingress: IngressRelay::new(Arc::clone(&registry)),
            registry,
            puzzle,
        }
    }

    /// Create state from a full configuration.
    pub fn from_config(config: &EscapeConfig) -> Self {
        Self::new(config.puzzle.clone(), &config.channel)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PuzzleConfig::default(), &ChannelConfig::default())
    }
}
