//! Configuration management module.
//!
//! Handles loading configuration from environment variables.

use std::env;

use alloy::primitives::{Address, U256};

use crate::{
    error::{AppError, Result},
    ethereum::chains::{select_network, Network},
    services::transactions::DEFAULT_LOW_BALANCE_THRESHOLD,
    types::parse_ether,
};

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    /// Network identifier (`goerli`, `sepolia`, `homestead`, `maticmum`).
    pub chain: String,
    /// Private key for the wallet (hex, `0x` prefix optional). Empty means unset.
    pub private_key: String,
    /// BIP-39 mnemonic used when no private key is set.
    pub mnemonic: String,
    /// JSON-RPC endpoint. Empty means the network's public endpoint.
    pub provider: String,
    /// Example contract override.
    pub contract_address: Option<String>,
    /// Low balance threshold in ether.
    pub low_balance_threshold: String,
    /// Logging level (default: info).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CHAIN`: network identifier
    /// - `PRIVATE_KEY`: private key for the wallet (hex)
    /// - `MNEMONIC`: seed phrase, used when `PRIVATE_KEY` is empty
    /// - `PROVIDER`: JSON-RPC endpoint (default: the network's public RPC)
    /// - `CONTRACT_ADDRESS`: example contract override
    /// - `LOW_BALANCE_THRESHOLD`: ether amount for the balance check (default: 0.3)
    /// - `LOG_LEVEL`: logging level (default: info)
    ///
    /// Values are only read here; [`Config::network`] and friends validate them.
    pub fn from_env() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let var = |name: &str| env::var(name).unwrap_or_default();

        Self {
            chain: var("CHAIN"),
            private_key: var("PRIVATE_KEY"),
            mnemonic: var("MNEMONIC"),
            provider: var("PROVIDER"),
            contract_address: env::var("CONTRACT_ADDRESS").ok().filter(|s| !s.trim().is_empty()),
            low_balance_threshold: env::var("LOW_BALANCE_THRESHOLD")
                .unwrap_or_else(|_| DEFAULT_LOW_BALANCE_THRESHOLD.to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Selected network.
    pub fn network(&self) -> Result<Network> {
        select_network(self.chain.trim())
    }

    /// RPC endpoint: `PROVIDER` when set, otherwise the network default.
    pub fn rpc_url(&self, network: Network) -> String {
        let provider = self.provider.trim();
        if provider.is_empty() {
            network.descriptor().rpc_url.to_string()
        } else {
            provider.to_string()
        }
    }

    /// Private key, if one is configured.
    pub fn private_key(&self) -> Option<&str> {
        Some(self.private_key.trim()).filter(|key| !key.is_empty())
    }

    /// Contract override, if configured.
    pub fn contract_address(&self) -> Result<Option<Address>> {
        self.contract_address
            .as_deref()
            .map(|s| {
                s.trim().parse::<Address>().map_err(|e| {
                    AppError::Config(format!("Invalid CONTRACT_ADDRESS '{}': {}", s, e))
                })
            })
            .transpose()
    }

    /// Low balance threshold in wei.
    pub fn low_balance_threshold(&self) -> Result<U256> {
        parse_ether(&self.low_balance_threshold).map_err(|e| {
            AppError::Config(format!(
                "Invalid LOW_BALANCE_THRESHOLD '{}': {}",
                self.low_balance_threshold, e
            ))
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chain: String::new(),
            private_key: String::new(),
            mnemonic: String::new(),
            provider: String::new(),
            contract_address: None,
            low_balance_threshold: DEFAULT_LOW_BALANCE_THRESHOLD.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("chain", &self.chain)
            .field("private_key", &if self.private_key.is_empty() { "" } else { "<redacted>" })
            .field("mnemonic", &if self.mnemonic.is_empty() { "" } else { "<redacted>" })
            .field("provider", &self.provider)
            .field("contract_address", &self.contract_address)
            .field("low_balance_threshold", &self.low_balance_threshold)
            .field("log_level", &self.log_level)
            .finish()
    }
}
