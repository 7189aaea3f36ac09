//! Chain endpoint configuration

use crate::config::validation::Validate;
use serde::{Deserialize, Serialize};

/// Chain endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
        }
    }
}

impl Validate for ChainConfig {
    fn validate(&self) -> Result<(), String> {
        if self.rpc_url.is_empty() {
            return Err("RPC URL cannot be empty".to_string());
        }

        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(format!("RPC URL must be an http(s) endpoint: {}", self.rpc_url));
        }

        Ok(())
    }
}

fn default_rpc_url() -> String {
    "https://shape-mainnet.g.alchemy.com/v2/demo".to_string()
}
