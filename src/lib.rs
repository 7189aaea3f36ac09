//! # mintgate
//!
//! A batch NFT mint gateway. Given a list of private keys, it derives one
//! wallet per key and submits the mint shop's `purchase` call for a fixed
//! range of token ids, one transaction at a time, streaming per-step logs
//! and progress counters to the caller as newline-delimited JSON.
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use mintgate::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config).await?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Embedding the runner
//!
//! The batch engine is usable without the HTTP layer: implement
//! [`ChainClient`] (or use [`EthereumClient`]), feed a [`BatchRunner`] an
//! [`EventSink`], and drain the receiving half of the channel.

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::batch::{BatchRunner, RunState, RunSummary, WorkUnit};
pub use core::chain::{ChainClient, ChainError, EthereumClient, TxRef};
pub use core::events::{EventSink, MintEvent, ProgressSnapshot, StreamClosed};
pub use utils::error::{GatewayError, Result};
pub use utils::validation::PrivateKey;

use tracing::info;

/// A minimal gateway wrapper over configuration and server
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting mintgate on {}", self.config.server().address());

        self.server.start().await?;

        Ok(())
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Gateway build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

/// Build metadata captured by the build script
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: env!("BUILD_TIME"),
        git_hash: env!("GIT_HASH"),
        rust_version: env!("RUST_VERSION"),
    }
}
