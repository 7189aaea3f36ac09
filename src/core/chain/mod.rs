//! Chain client seam
//!
//! The batch runner talks to the chain exclusively through [`ChainClient`].
//! Production uses the ethers-backed [`EthereumClient`]; tests script the
//! trait in memory.

pub mod error;
pub mod ethereum;

pub use error::ChainError;
pub use ethereum::EthereumClient;

use crate::utils::validation::PrivateKey;
use async_trait::async_trait;
use std::fmt;

/// Reference to a broadcast transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRef(String);

impl TxRef {
    /// Wrap a transaction hash
    pub fn new<S: Into<String>>(hash: S) -> Self {
        Self(hash.into())
    }

    /// The transaction hash
    pub fn hash(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Truncated address form for logs and error listings
///
/// Keeps the `0x` prefix plus four leading digits and the last four digits.
/// Full addresses are fine to show; this form just keeps log lines readable.
pub fn display_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

/// Interface between the batch runner and a blockchain
///
/// One implementation per backend. All methods take `&self`; the client is
/// shared behind an `Arc` and must not require exclusive access.
#[async_trait]
pub trait ChainClient: Send + Sync + 'static {
    /// Backend-specific signing identity for one wallet
    type Wallet: Send + Sync;

    /// Derive the signing identity for a private key
    async fn open_wallet(&self, key: &PrivateKey) -> Result<Self::Wallet, ChainError>;

    /// The wallet's public address in `0x` hex form
    fn wallet_address(&self, wallet: &Self::Wallet) -> String;

    /// Sign and broadcast one purchase call, returning the transaction hash
    async fn submit_purchase(
        &self,
        wallet: &Self::Wallet,
        token_id: u64,
    ) -> Result<TxRef, ChainError>;

    /// Wait until the transaction is mined
    ///
    /// A revert, a dropped transaction, or hitting the configured wait bound
    /// is an error.
    async fn await_confirmation(&self, tx: &TxRef) -> Result<(), ChainError>;
}
