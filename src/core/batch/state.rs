//! Run accounting
//!
//! One mint run resolves `wallets x token ids` work units. `RunState` keeps
//! the counters; every mutation returns the snapshot that becomes the next
//! progress event, so counters and events cannot drift apart.

use crate::core::chain::{ChainError, TxRef};
use crate::core::events::ProgressSnapshot;

/// One (wallet, token) submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkUnit {
    /// Position of the wallet in the submitted key list, 0-based
    pub wallet_index: usize,
    /// Token identifier being purchased
    pub token_id: u64,
}

/// Where a failed unit gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Rejected before reaching the mempool
    Submission,
    /// Broadcast but never confirmed
    Confirmation,
}

/// Terminal result of one work unit
#[derive(Debug)]
pub enum UnitOutcome {
    /// Mined successfully
    Confirmed {
        /// The confirmed transaction
        tx: TxRef,
    },
    /// Gave up at `stage` with `error`
    Failed {
        /// Stage that failed
        stage: FailureStage,
        /// Underlying chain error
        error: ChainError,
    },
}

/// Mutable counters for one run
#[derive(Debug, Clone, Copy)]
pub struct RunState {
    processed: u64,
    success: u64,
    failed: u64,
    total: u64,
}

impl RunState {
    /// Start a run over `total` work units
    pub fn new(total: u64) -> Self {
        Self {
            processed: 0,
            success: 0,
            failed: 0,
            total,
        }
    }

    /// Record one confirmed unit
    pub fn record_success(&mut self) -> ProgressSnapshot {
        self.processed += 1;
        self.success += 1;
        self.snapshot()
    }

    /// Record one failed unit
    pub fn record_failure(&mut self) -> ProgressSnapshot {
        self.processed += 1;
        self.failed += 1;
        self.snapshot()
    }

    /// Record a wallet that failed before any of its units were submitted
    ///
    /// All `units` of the wallet resolve as failed in one step.
    pub fn record_wallet_failure(&mut self, units: u64) -> ProgressSnapshot {
        self.processed += units;
        self.failed += units;
        self.snapshot()
    }

    /// Current counter values
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            processed: self.processed,
            success: self.success,
            failed: self.failed,
        }
    }

    /// Units the run was sized for at start
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Whether every unit has resolved
    pub fn is_complete(&self) -> bool {
        self.processed == self.total
    }

    /// Terminal counters for the host
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            processed: self.processed,
            success: self.success,
            failed: self.failed,
        }
    }
}

/// Terminal counters of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Units resolved
    pub processed: u64,
    /// Units confirmed
    pub success: u64,
    /// Units failed
    pub failed: u64,
}
