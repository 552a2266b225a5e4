//! Common utilities for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use alloy::{
    primitives::{address, Address, Bytes, TxHash, U256},
    rpc::types::Transaction,
};
use async_trait::async_trait;
use evm_mint_playground::{
    ethereum::{ChainReader, ChainWriter, FeesPerGas, Network},
    services::TransactionService,
    types::TxParams,
    AppError, Config, EvmMintServer, Result,
};

/// First Hardhat/Foundry development account.
pub const TEST_ACCOUNT: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

/// In-memory chain recording every simulated and submitted call.
pub struct FakeChain {
    pub estimated_gas: u64,
    pub fees: FeesPerGas,
    pub balance: U256,
    pub nonce: u64,
    pub simulation_error: Option<String>,
    pub submission_error: Option<String>,
    pub simulated: Mutex<Vec<TxParams>>,
    pub sent: Mutex<Vec<TxParams>>,
}

impl Default for FakeChain {
    fn default() -> Self {
        Self {
            estimated_gas: 21_000,
            fees: FeesPerGas { max_fee_per_gas: 30, max_priority_fee_per_gas: 2 },
            balance: U256::from(10u64).pow(U256::from(18)),
            nonce: 32,
            simulation_error: None,
            submission_error: None,
            simulated: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl FakeChain {
    pub fn simulated(&self) -> Vec<TxParams> {
        self.simulated.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<TxParams> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainReader for FakeChain {
    async fn estimate_contract_gas(&self, _params: &TxParams) -> Result<u64> {
        Ok(self.estimated_gas)
    }

    async fn estimate_fees_per_gas(&self) -> Result<FeesPerGas> {
        Ok(self.fees)
    }

    async fn simulate_contract(&self, params: &TxParams) -> Result<Bytes> {
        self.simulated.lock().unwrap().push(params.clone());
        match &self.simulation_error {
            Some(reason) => Err(AppError::SimulationFailed(reason.clone())),
            None => Ok(Bytes::new()),
        }
    }

    async fn get_balance(&self, _address: Address) -> Result<U256> {
        Ok(self.balance)
    }

    async fn get_transaction_count(&self, _address: Address) -> Result<u64> {
        Ok(self.nonce)
    }

    async fn get_transaction_by_hash(&self, _hash: TxHash) -> Result<Option<Transaction>> {
        Ok(None)
    }
}

#[async_trait]
impl ChainWriter for FakeChain {
    fn account(&self) -> Address {
        TEST_ACCOUNT
    }

    async fn write_contract(&self, params: &TxParams) -> Result<TxHash> {
        if let Some(reason) = &self.submission_error {
            return Err(AppError::Rpc(reason.clone()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(params.clone());
        Ok(TxHash::with_last_byte(sent.len() as u8))
    }
}

/// Transaction service on Polygon Mumbai backed by `chain`.
pub fn fake_service(chain: &Arc<FakeChain>) -> TransactionService {
    TransactionService::new(chain.clone(), chain.clone(), Network::PolygonMumbai).unwrap()
}

/// Server backed by `chain`.
pub fn fake_server(chain: &Arc<FakeChain>) -> EvmMintServer {
    EvmMintServer::with_service(fake_service(chain))
}

/// Helper to create a live server from environment variables.
pub fn create_test_server() -> Option<EvmMintServer> {
    let config = Config::from_env();

    if config.chain.is_empty() || (config.private_key.is_empty() && config.mnemonic.is_empty()) {
        return None;
    }

    EvmMintServer::new(Config { log_level: "warn".to_string(), ..config }).ok()
}

/// Skip test if server cannot be created (missing env vars).
#[macro_export]
macro_rules! skip_if_no_server {
    () => {
        match common::create_test_server() {
            Some(server) => server,
            None => {
                eprintln!("Skipping test: CHAIN and PRIVATE_KEY or MNEMONIC not set");
                return;
            }
        }
    };
}
