//! Configuration models
//!
//! One module per configuration section.

pub mod chain;
pub mod mint;
pub mod server;

pub use chain::ChainConfig;
pub use mint::MintConfig;
pub use server::{CorsConfig, ServerConfig};

use serde::{Deserialize, Serialize};

/// Top-level gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// HTTP server section
    #[serde(default)]
    pub server: ServerConfig,
    /// Chain endpoint section
    #[serde(default)]
    pub chain: ChainConfig,
    /// Mint parameters section
    #[serde(default)]
    pub mint: MintConfig,
}

impl GatewayConfig {
    /// Build a configuration from defaults plus environment overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Apply the deployment environment variables
    ///
    /// Environment values win over file values, matching how the gateway is
    /// deployed: the YAML file carries the layout, the environment carries
    /// the per-network values.
    pub fn apply_env(&mut self) {
        if let Ok(rpc_url) = std::env::var("RPC_URL") {
            self.chain.rpc_url = rpc_url;
        }
        if let Ok(nft_address) = std::env::var("NFT_ADDRESS") {
            self.mint.nft_address = nft_address;
        }
        if let Ok(contract_address) = std::env::var("CONTRACT_ADDRESS") {
            self.mint.contract_address = contract_address;
        }
        if let Ok(price) = std::env::var("PRICE") {
            self.mint.price_eth = price;
        }
    }
}
