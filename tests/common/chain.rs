//! Scripted chain client
//!
//! Implements the production chain trait entirely in memory. Each wallet and
//! each (wallet, token) unit can be scripted to succeed or fail at a chosen
//! stage, and every submission is recorded for assertions. Wallet indices
//! follow call order, which matches input order because the runner processes
//! wallets strictly sequentially.

use async_trait::async_trait;
use mintgate::core::chain::{ChainClient, ChainError, TxRef};
use mintgate::utils::validation::PrivateKey;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How one (wallet, token) unit behaves
#[derive(Debug, Clone)]
pub enum UnitScript {
    /// Submission and confirmation both succeed
    Confirm,
    /// Submission is rejected with this reason
    RejectSubmission(&'static str),
    /// Submission succeeds, confirmation fails with this reason
    FailConfirmation(&'static str),
    /// Submission succeeds, confirmation hits the wait bound
    TimeOut,
}

/// How one wallet behaves
#[derive(Debug, Clone)]
pub enum WalletScript {
    /// Derivation and every unit succeed
    Succeed,
    /// Derivation fails with this reason
    FailDerivation(&'static str),
    /// Derivation succeeds; listed units follow their script, the rest
    /// confirm
    Units(HashMap<u64, UnitScript>),
}

/// Signing identity handed back by the scripted client
pub struct ScriptedWallet {
    index: usize,
}

/// In-memory chain client following a per-wallet script
pub struct ScriptedChain {
    scripts: Vec<WalletScript>,
    next_wallet: AtomicUsize,
    submissions: Mutex<Vec<(usize, u64)>>,
    pending: Mutex<HashMap<String, UnitScript>>,
}

impl ScriptedChain {
    /// Client following the given scripts, one per expected wallet
    pub fn new(scripts: Vec<WalletScript>) -> Self {
        Self {
            scripts,
            next_wallet: AtomicUsize::new(0),
            submissions: Mutex::new(Vec::new()),
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Client where every wallet and unit succeeds
    pub fn all_succeed(wallets: usize) -> Self {
        Self::new(vec![WalletScript::Succeed; wallets])
    }

    /// Every (wallet index, token id) submission observed, in order
    pub fn submissions(&self) -> Vec<(usize, u64)> {
        self.submissions.lock().unwrap().clone()
    }

    fn unit_script(&self, wallet_index: usize, token_id: u64) -> UnitScript {
        match self.scripts.get(wallet_index) {
            Some(WalletScript::Units(units)) => {
                units.get(&token_id).cloned().unwrap_or(UnitScript::Confirm)
            }
            _ => UnitScript::Confirm,
        }
    }
}

#[async_trait]
impl ChainClient for ScriptedChain {
    type Wallet = ScriptedWallet;

    async fn open_wallet(&self, _key: &PrivateKey) -> Result<Self::Wallet, ChainError> {
        let index = self.next_wallet.fetch_add(1, Ordering::SeqCst);

        match self.scripts.get(index) {
            Some(WalletScript::FailDerivation(reason)) => Err(ChainError::wallet(*reason)),
            _ => Ok(ScriptedWallet { index }),
        }
    }

    fn wallet_address(&self, wallet: &Self::Wallet) -> String {
        format!("0x{:040x}", 0xa11ce000u64 + wallet.index as u64)
    }

    async fn submit_purchase(
        &self,
        wallet: &Self::Wallet,
        token_id: u64,
    ) -> Result<TxRef, ChainError> {
        self.submissions
            .lock()
            .unwrap()
            .push((wallet.index, token_id));

        let script = self.unit_script(wallet.index, token_id);
        if let UnitScript::RejectSubmission(reason) = script {
            return Err(ChainError::submission(reason));
        }

        let hash = format!("0x{:064x}", wallet.index as u64 * 1000 + token_id);
        self.pending.lock().unwrap().insert(hash.clone(), script);
        Ok(TxRef::new(hash))
    }

    async fn await_confirmation(&self, tx: &TxRef) -> Result<(), ChainError> {
        let script = self.pending.lock().unwrap().remove(tx.hash());

        match script {
            Some(UnitScript::Confirm) => Ok(()),
            Some(UnitScript::FailConfirmation(reason)) => Err(ChainError::confirmation(reason)),
            Some(UnitScript::TimeOut) => Err(ChainError::timeout(120)),
            Some(UnitScript::RejectSubmission(_)) | None => {
                Err(ChainError::rpc("unknown transaction"))
            }
        }
    }
}
