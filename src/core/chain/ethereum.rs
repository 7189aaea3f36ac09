//! Ethereum implementation of the chain client
//!
//! Signs and broadcasts the mint shop's `purchase` call through an ethers
//! HTTP provider. One [`EthereumClient`] is shared across a run; each wallet
//! gets its own signer middleware bound to the provider's chain id.

use crate::config::{ChainConfig, MintConfig};
use crate::core::chain::{ChainClient, ChainError, TxRef};
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::PrivateKey;
use async_trait::async_trait;
use ethers::contract::abigen;
use ethers::core::types::{Address, H256, U256, U64};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, PendingTransaction, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::utils::parse_ether;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::info;

abigen!(
    MintShop,
    r#"[
        function purchase(address nftAddress, uint256 tokenId, address recipient, uint256 numberToMint, uint256 presaleNumberCanMint, bytes32[] proof) payable
    ]"#
);

/// Tokens minted per purchase call
const NUMBER_TO_MINT: u64 = 1;
/// Presale allowance claimed per purchase call
const PRESALE_NUMBER_CAN_MINT: u64 = 0;

type MintShopClient = MintShop<SignerMiddleware<Provider<Http>, LocalWallet>>;

/// Signing identity for one wallet during a run
pub struct EthereumWallet {
    contract: MintShopClient,
    address: Address,
}

/// Chain client backed by an ethers HTTP provider
pub struct EthereumClient {
    provider: Provider<Http>,
    chain_id: u64,
    nft_address: Address,
    contract_address: Address,
    price: U256,
    confirmation_timeout: Duration,
}

impl EthereumClient {
    /// Connect to the configured RPC endpoint
    ///
    /// Queries the chain id up front; every wallet derived later is bound to
    /// it so transactions cannot be replayed across networks.
    pub async fn connect(chain: &ChainConfig, mint: &MintConfig) -> Result<Self> {
        let provider = Provider::<Http>::try_from(chain.rpc_url.as_str())
            .map_err(|e| GatewayError::Config(format!("Invalid RPC URL: {}", e)))?;

        let chain_id = provider
            .get_chainid()
            .await
            .map_err(|e| ChainError::rpc(format!("Failed to query chain id: {}", e)))?
            .as_u64();

        let nft_address = mint
            .nft_address
            .parse::<Address>()
            .map_err(|e| GatewayError::Config(format!("Invalid NFT address: {}", e)))?;
        let contract_address = mint
            .contract_address
            .parse::<Address>()
            .map_err(|e| GatewayError::Config(format!("Invalid contract address: {}", e)))?;
        let price = parse_ether(mint.price_eth.as_str())
            .map_err(|e| GatewayError::Config(format!("Invalid price: {}", e)))?;

        info!(chain_id, rpc_url = %chain.rpc_url, "Connected to chain");

        Ok(Self {
            provider,
            chain_id,
            nft_address,
            contract_address,
            price,
            confirmation_timeout: Duration::from_secs(mint.confirmation_timeout_secs),
        })
    }
}

#[async_trait]
impl ChainClient for EthereumClient {
    type Wallet = EthereumWallet;

    async fn open_wallet(&self, key: &PrivateKey) -> std::result::Result<Self::Wallet, ChainError> {
        let signer = key
            .expose()
            .trim_start_matches("0x")
            .parse::<LocalWallet>()
            .map_err(|e| ChainError::wallet(e.to_string()))?
            .with_chain_id(self.chain_id);

        let address = signer.address();
        let client = SignerMiddleware::new(self.provider.clone(), signer);
        let contract = MintShop::new(self.contract_address, Arc::new(client));

        Ok(EthereumWallet { contract, address })
    }

    fn wallet_address(&self, wallet: &Self::Wallet) -> String {
        format!("{:#x}", wallet.address)
    }

    async fn submit_purchase(
        &self,
        wallet: &Self::Wallet,
        token_id: u64,
    ) -> std::result::Result<TxRef, ChainError> {
        let call = wallet
            .contract
            .purchase(
                self.nft_address,
                U256::from(token_id),
                wallet.address,
                U256::from(NUMBER_TO_MINT),
                U256::from(PRESALE_NUMBER_CAN_MINT),
                Vec::new(),
            )
            .value(self.price);

        let pending = call
            .send()
            .await
            .map_err(|e| ChainError::submission(e.to_string()))?;

        Ok(TxRef::new(format!("{:#x}", *pending)))
    }

    async fn await_confirmation(&self, tx: &TxRef) -> std::result::Result<(), ChainError> {
        let hash = tx
            .hash()
            .trim_start_matches("0x")
            .parse::<H256>()
            .map_err(|e| ChainError::confirmation(format!("Invalid transaction hash: {}", e)))?;

        let pending = PendingTransaction::new(hash, &self.provider);
        let receipt = timeout(self.confirmation_timeout, pending)
            .await
            .map_err(|_| ChainError::timeout(self.confirmation_timeout.as_secs()))?
            .map_err(|e| ChainError::rpc(e.to_string()))?;

        match receipt {
            Some(receipt) if receipt.status == Some(U64::from(1)) => Ok(()),
            Some(_) => Err(ChainError::confirmation("Transaction reverted")),
            None => Err(ChainError::confirmation(
                "Transaction dropped before inclusion",
            )),
        }
    }
}
