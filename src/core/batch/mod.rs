//! Batch mint runner
//!
//! Iterates wallets in input order and token ids ascending, submitting one
//! purchase per (wallet, token) pair with exactly one transaction in flight
//! at a time. Failures are contained at their level: a wallet that cannot be
//! opened bulk-fails its units and the run moves on, a unit that fails on
//! chain is recorded and the next unit runs. Nothing is retried.

pub mod state;

pub use state::{FailureStage, RunState, RunSummary, UnitOutcome, WorkUnit};

use crate::core::chain::{ChainClient, display_address};
use crate::core::events::{EventSink, StreamClosed};
use crate::utils::validation::PrivateKey;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::debug;

/// Drives one mint run against a chain client
pub struct BatchRunner<C: ChainClient> {
    client: Arc<C>,
    token_ids: RangeInclusive<u64>,
}

impl<C: ChainClient> BatchRunner<C> {
    /// Create a runner over the given token id range
    pub fn new(client: Arc<C>, token_ids: RangeInclusive<u64>) -> Self {
        Self { client, token_ids }
    }

    /// Work units each wallet contributes
    pub fn units_per_wallet(&self) -> u64 {
        self.token_ids.end() - self.token_ids.start() + 1
    }

    /// Process every key and stream the outcome through `sink`
    ///
    /// Returns the terminal counters, or [`StreamClosed`] when the consumer
    /// disconnected. Disconnect is checked before every submission, so no
    /// transaction is broadcast for a caller that already went away.
    pub async fn run(
        &self,
        keys: &[PrivateKey],
        sink: &EventSink,
    ) -> Result<RunSummary, StreamClosed> {
        let wallet_count = keys.len();
        let units_per_wallet = self.units_per_wallet();
        let mut run = RunState::new(wallet_count as u64 * units_per_wallet);

        sink.log(format!(
            "Starting minting process: {} wallets, {} submissions",
            wallet_count,
            run.total()
        ))
        .await?;

        for (index, key) in keys.iter().enumerate() {
            if sink.is_closed() {
                return Err(StreamClosed);
            }

            let wallet = match self.client.open_wallet(key).await {
                Ok(wallet) => wallet,
                Err(error) => {
                    sink.log(format!(
                        "Error processing wallet {}/{}: {}",
                        index + 1,
                        wallet_count,
                        error
                    ))
                    .await?;
                    let snapshot = run.record_wallet_failure(units_per_wallet);
                    sink.progress(snapshot).await?;
                    continue;
                }
            };

            let short = display_address(&self.client.wallet_address(&wallet));
            sink.log(format!(
                "Processing wallet {}/{}: {}",
                index + 1,
                wallet_count,
                short
            ))
            .await?;

            for token_id in self.token_ids.clone() {
                if sink.is_closed() {
                    return Err(StreamClosed);
                }

                let unit = WorkUnit {
                    wallet_index: index,
                    token_id,
                };
                let outcome = self.run_unit(&wallet, unit, &short, sink).await?;
                let snapshot = match outcome {
                    UnitOutcome::Confirmed { .. } => run.record_success(),
                    UnitOutcome::Failed { .. } => run.record_failure(),
                };
                sink.progress(snapshot).await?;
            }
        }

        let summary = run.summary();
        debug!(
            processed = summary.processed,
            success = summary.success,
            failed = summary.failed,
            "mint run finished"
        );
        sink.log(format!(
            "Minting process completed. Success: {}, Failed: {}",
            summary.success, summary.failed
        ))
        .await?;

        Ok(summary)
    }

    /// Submit and confirm one unit, narrating each step
    async fn run_unit(
        &self,
        wallet: &C::Wallet,
        unit: WorkUnit,
        short: &str,
        sink: &EventSink,
    ) -> Result<UnitOutcome, StreamClosed> {
        sink.log(format!("Minting token {} for {}", unit.token_id, short))
            .await?;

        let tx = match self.client.submit_purchase(wallet, unit.token_id).await {
            Ok(tx) => tx,
            Err(error) => {
                sink.log(format!(
                    "Failed to mint token {} for {}: {}",
                    unit.token_id, short, error
                ))
                .await?;
                return Ok(UnitOutcome::Failed {
                    stage: FailureStage::Submission,
                    error,
                });
            }
        };

        sink.log(format!("Transaction sent: {}", tx)).await?;

        match self.client.await_confirmation(&tx).await {
            Ok(()) => {
                sink.log(format!(
                    "Successfully minted token {} for {}",
                    unit.token_id, short
                ))
                .await?;
                Ok(UnitOutcome::Confirmed { tx })
            }
            Err(error) => {
                sink.log(format!(
                    "Failed to mint token {} for {}: {}",
                    unit.token_id, short, error
                ))
                .await?;
                Ok(UnitOutcome::Failed {
                    stage: FailureStage::Confirmation,
                    error,
                })
            }
        }
    }
}
