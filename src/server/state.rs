//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::chain::ChainClient;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Generic over the chain client so handlers can be exercised against a
/// scripted implementation. All fields are wrapped in Arc for sharing across
/// worker threads.
pub struct AppState<C: ChainClient> {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Chain client used for every run
    pub chain: Arc<C>,
}

impl<C: ChainClient> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            chain: Arc::clone(&self.chain),
        }
    }
}

impl<C: ChainClient> AppState<C> {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, chain: C) -> Self {
        Self {
            config: Arc::new(config),
            chain: Arc::new(chain),
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
