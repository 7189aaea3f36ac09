//! Event emission for mint runs
//!
//! The runner reports everything it does through a channel of [`MintEvent`]
//! values. The HTTP layer drains the channel and writes one JSON record per
//! line to the response body. A closed channel means the consumer is gone,
//! which the runner treats as cancellation.

pub mod codec;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

/// Counter snapshot taken after a work unit resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Units resolved so far
    pub processed: u64,
    /// Units confirmed on chain
    pub success: u64,
    /// Units that failed at any stage
    pub failed: u64,
}

/// A single record on the event stream
///
/// Serialized as one JSON object per line. `log` records are free-text
/// narration; `progress` records are the authoritative counters. Consumers
/// must not parse log messages for control decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MintEvent {
    /// Free-text narration for the operator
    Log {
        /// Human-readable message
        message: String,
    },
    /// Counter snapshot after a unit resolved
    #[serde(rename_all = "camelCase")]
    Progress {
        /// Units resolved so far
        processed_count: u64,
        /// Units confirmed on chain
        success_count: u64,
        /// Units that failed
        failed_count: u64,
    },
}

impl MintEvent {
    /// Create a log event
    pub fn log<S: Into<String>>(message: S) -> Self {
        Self::Log {
            message: message.into(),
        }
    }

    /// Create a progress event from a counter snapshot
    pub fn progress(snapshot: ProgressSnapshot) -> Self {
        Self::Progress {
            processed_count: snapshot.processed,
            success_count: snapshot.success,
            failed_count: snapshot.failed,
        }
    }
}

/// The consumer side of the event channel went away
#[derive(Debug, Error, PartialEq, Eq)]
#[error("event stream closed by consumer")]
pub struct StreamClosed;

/// Sending half of the event channel
///
/// Cloneable handle the runner emits through. Every send awaits channel
/// capacity, so events reach the consumer in emission order and are never
/// coalesced.
#[derive(Clone)]
pub struct EventSink {
    tx: mpsc::Sender<MintEvent>,
}

impl EventSink {
    /// Create a sink and its receiving half
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<MintEvent>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }

    /// Emit a log event
    pub async fn log<S: Into<String>>(&self, message: S) -> Result<(), StreamClosed> {
        self.tx
            .send(MintEvent::log(message))
            .await
            .map_err(|_| StreamClosed)
    }

    /// Emit a progress event
    pub async fn progress(&self, snapshot: ProgressSnapshot) -> Result<(), StreamClosed> {
        self.tx
            .send(MintEvent::progress(snapshot))
            .await
            .map_err(|_| StreamClosed)
    }

    /// Whether the consumer has dropped the receiving half
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
