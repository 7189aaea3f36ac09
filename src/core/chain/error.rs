//! Chain client error taxonomy

use thiserror::Error;

/// Errors surfaced by a chain client
///
/// The runner classifies these by where they occurred. A `Wallet` error fails
/// every unit of the affected wallet; the other variants fail a single unit.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The signing identity could not be derived from the key
    #[error("Wallet error: {message}")]
    Wallet {
        /// What went wrong
        message: String,
    },

    /// The transaction was rejected before it reached the mempool
    #[error("Submission error: {message}")]
    Submission {
        /// What went wrong
        message: String,
    },

    /// The transaction was broadcast but did not confirm
    #[error("Confirmation error: {message}")]
    Confirmation {
        /// What went wrong
        message: String,
    },

    /// Confirmation did not arrive within the configured window
    #[error("Confirmation timed out after {seconds}s")]
    Timeout {
        /// Configured wait in seconds
        seconds: u64,
    },

    /// The RPC endpoint misbehaved
    #[error("RPC error: {message}")]
    Rpc {
        /// What went wrong
        message: String,
    },
}

impl ChainError {
    /// Create a wallet derivation error
    pub fn wallet<S: Into<String>>(message: S) -> Self {
        Self::Wallet {
            message: message.into(),
        }
    }

    /// Create a submission error
    pub fn submission<S: Into<String>>(message: S) -> Self {
        Self::Submission {
            message: message.into(),
        }
    }

    /// Create a confirmation error
    pub fn confirmation<S: Into<String>>(message: S) -> Self {
        Self::Confirmation {
            message: message.into(),
        }
    }

    /// Create a confirmation timeout error
    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// Create an RPC error
    pub fn rpc<S: Into<String>>(message: S) -> Self {
        Self::Rpc {
            message: message.into(),
        }
    }

    /// Whether this error invalidates the whole wallet rather than one unit
    pub fn is_wallet_level(&self) -> bool {
        matches!(self, Self::Wallet { .. })
    }
}
