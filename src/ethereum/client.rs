//! Ethereum RPC clients.
//!
//! A read-only client for queries and simulation, and a signing client that
//! submits transactions. Both sit behind traits so services can run against
//! fakes.

use alloy::{
    primitives::{Address, Bytes, TxHash, U256},
    providers::{DynProvider, Provider, ProviderBuilder, RootProvider},
    rpc::types::Transaction,
    transports::http::reqwest::Url,
};
use async_trait::async_trait;

use crate::{
    error::{AppError, Result},
    ethereum::WalletManager,
    types::TxParams,
};

/// Network fee suggestion for EIP-1559 transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeesPerGas {
    /// Suggested fee cap per gas in wei.
    pub max_fee_per_gas: u128,
    /// Suggested tip per gas in wei.
    pub max_priority_fee_per_gas: u128,
}

/// Read-only chain access.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Estimate the gas a contract call would use.
    async fn estimate_contract_gas(&self, params: &TxParams) -> Result<u64>;

    /// Suggest EIP-1559 fees for the next block.
    async fn estimate_fees_per_gas(&self) -> Result<FeesPerGas>;

    /// Execute a contract call without broadcasting it.
    ///
    /// Fails with [`AppError::SimulationFailed`] when the call would revert.
    async fn simulate_contract(&self, params: &TxParams) -> Result<Bytes>;

    /// Native balance of `address` in wei.
    async fn get_balance(&self, address: Address) -> Result<U256>;

    /// Number of transactions sent from `address` (its next nonce).
    async fn get_transaction_count(&self, address: Address) -> Result<u64>;

    /// Look up a transaction by hash.
    async fn get_transaction_by_hash(&self, hash: TxHash) -> Result<Option<Transaction>>;
}

/// Signing chain access.
#[async_trait]
pub trait ChainWriter: Send + Sync {
    /// Address that signs submitted transactions.
    fn account(&self) -> Address;

    /// Sign and broadcast a contract call, returning its hash.
    async fn write_contract(&self, params: &TxParams) -> Result<TxHash>;
}

fn parse_url(rpc_url: &str) -> Result<Url> {
    rpc_url.parse().map_err(|_| AppError::Config(format!("Invalid RPC URL: {}", rpc_url)))
}

/// Read-only Ethereum RPC client.
#[derive(Clone)]
pub struct EthereumClient {
    /// The underlying provider.
    provider: RootProvider,
    /// RPC URL for logging.
    rpc_url: String,
}

impl EthereumClient {
    /// Create a new Ethereum client.
    ///
    /// Note: This does NOT make any network calls.
    pub fn new(rpc_url: &str) -> Result<Self> {
        let provider = ProviderBuilder::new().connect_http(parse_url(rpc_url)?).root().clone();

        tracing::info!(rpc_url = %rpc_url, "Ethereum client created");

        Ok(Self { provider, rpc_url: rpc_url.to_string() })
    }

    /// RPC URL this client talks to.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[async_trait]
impl ChainReader for EthereumClient {
    async fn estimate_contract_gas(&self, params: &TxParams) -> Result<u64> {
        let gas = self.provider.estimate_gas(params.to_request()).await?;
        Ok(gas)
    }

    async fn estimate_fees_per_gas(&self) -> Result<FeesPerGas> {
        let estimation = self.provider.estimate_eip1559_fees().await?;
        Ok(FeesPerGas {
            max_fee_per_gas: estimation.max_fee_per_gas,
            max_priority_fee_per_gas: estimation.max_priority_fee_per_gas,
        })
    }

    async fn simulate_contract(&self, params: &TxParams) -> Result<Bytes> {
        self.provider.call(params.to_request()).await.map_err(|e| AppError::simulation(&e))
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        let balance = self.provider.get_balance(address).await?;
        Ok(balance)
    }

    async fn get_transaction_count(&self, address: Address) -> Result<u64> {
        let count = self.provider.get_transaction_count(address).await?;
        Ok(count)
    }

    async fn get_transaction_by_hash(&self, hash: TxHash) -> Result<Option<Transaction>> {
        let tx = self.provider.get_transaction_by_hash(hash).await?;
        Ok(tx)
    }
}

/// Signing Ethereum RPC client.
///
/// Fills missing nonce, gas and chain ID fields before signing with the
/// wallet's key.
#[derive(Clone)]
pub struct SigningClient {
    provider: DynProvider,
    account: Address,
}

impl SigningClient {
    /// Create a signing client for `wallet`.
    pub fn new(rpc_url: &str, wallet: &WalletManager) -> Result<Self> {
        let provider = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(parse_url(rpc_url)?)
            .erased();

        tracing::info!(rpc_url = %rpc_url, account = %wallet.address(), "Signing client created");

        Ok(Self { provider, account: wallet.address() })
    }
}

#[async_trait]
impl ChainWriter for SigningClient {
    fn account(&self) -> Address {
        self.account
    }

    async fn write_contract(&self, params: &TxParams) -> Result<TxHash> {
        let pending = self.provider.send_transaction(params.to_request()).await?;
        Ok(*pending.tx_hash())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_client_rejects_invalid_url() {
        match EthereumClient::new("not a url") {
            Err(AppError::Config(msg)) => assert!(msg.contains("Invalid RPC URL")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_client_keeps_rpc_url() {
        let client = EthereumClient::new("http://localhost:8545").unwrap();
        assert_eq!(client.rpc_url(), "http://localhost:8545");
    }

    #[test]
    fn test_signing_client_account() {
        let wallet = WalletManager::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let client = SigningClient::new("http://localhost:8545", &wallet).unwrap();
        assert_eq!(client.account(), wallet.address());
    }
}
