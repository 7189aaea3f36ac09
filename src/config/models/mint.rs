//! Mint parameters
//!
//! The purchase call is fixed: which collection, which shop contract, what
//! price, and which token ids each wallet buys. These all live here rather
//! than as constants so one binary serves any deployment of the shop.

use crate::config::validation::Validate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

static ADDRESS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern is a valid regex"));

/// Mint parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintConfig {
    /// NFT collection address passed to the purchase call
    #[serde(default = "default_nft_address")]
    pub nft_address: String,
    /// Mint shop contract address the call is sent to
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
    /// Price per token in ether, as a decimal string
    #[serde(default = "default_price_eth")]
    pub price_eth: String,
    /// First token id each wallet purchases
    #[serde(default = "default_token_id_start")]
    pub token_id_start: u64,
    /// Last token id each wallet purchases, inclusive
    #[serde(default = "default_token_id_end")]
    pub token_id_end: u64,
    /// How long to wait for one transaction to confirm
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            nft_address: default_nft_address(),
            contract_address: default_contract_address(),
            price_eth: default_price_eth(),
            token_id_start: default_token_id_start(),
            token_id_end: default_token_id_end(),
            confirmation_timeout_secs: default_confirmation_timeout_secs(),
        }
    }
}

impl MintConfig {
    /// The token ids each wallet purchases, ascending
    pub fn token_ids(&self) -> RangeInclusive<u64> {
        self.token_id_start..=self.token_id_end
    }

    /// Work units each wallet contributes to a run
    pub fn units_per_wallet(&self) -> u64 {
        self.token_id_end - self.token_id_start + 1
    }
}

impl Validate for MintConfig {
    fn validate(&self) -> Result<(), String> {
        if !ADDRESS_PATTERN.is_match(&self.nft_address) {
            return Err(format!("Invalid NFT address: {}", self.nft_address));
        }

        if !ADDRESS_PATTERN.is_match(&self.contract_address) {
            return Err(format!("Invalid contract address: {}", self.contract_address));
        }

        match self.price_eth.parse::<f64>() {
            Ok(price) if price > 0.0 => {}
            _ => return Err(format!("Invalid price: {}", self.price_eth)),
        }

        if self.token_id_start > self.token_id_end {
            return Err(format!(
                "Token id range is empty: {}..={}",
                self.token_id_start, self.token_id_end
            ));
        }

        if self.confirmation_timeout_secs == 0 {
            return Err("Confirmation timeout cannot be 0".to_string());
        }

        Ok(())
    }
}

fn default_nft_address() -> String {
    "0x6b6F66331D99e5691d340EA1924d8EAae151CE6d".to_string()
}

fn default_contract_address() -> String {
    "0x32953D7ae37B05075b88c34E800aE80C1Cb1B794".to_string()
}

fn default_price_eth() -> String {
    "0.0009".to_string()
}

fn default_token_id_start() -> u64 {
    1
}

fn default_token_id_end() -> u64 {
    4
}

fn default_confirmation_timeout_secs() -> u64 {
    120
}
