//! MCP server implementation.

use std::sync::Arc;

use alloy::primitives::{Address, TxHash};
use rmcp::{
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{Implementation, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::Serialize;

use crate::{
    config::Config,
    error::AppError,
    ethereum::{EthereumClient, SigningClient, WalletManager},
    services::TransactionService,
    types::{format_ether, Scenario},
};

/// EVM Mint Playground MCP Server.
///
/// Provides tools for estimating, simulating and submitting mint transactions.
#[derive(Clone)]
pub struct EvmMintServer {
    transaction_service: TransactionService,
    tool_router: ToolRouter<Self>,
}

impl EvmMintServer {
    /// Create a new server from configuration.
    ///
    /// Selects the network, resolves the signing account and builds the
    /// client pair. No network calls are made here.
    pub fn new(config: Config) -> Result<Self, AppError> {
        tracing::info!("Initializing EVM Mint Playground MCP Server");

        let network = config.network()?;
        let rpc_url = config.rpc_url(network);

        let wallet = WalletManager::resolve(config.private_key(), &config.mnemonic)?;

        let reader = Arc::new(EthereumClient::new(&rpc_url)?);
        let writer = Arc::new(SigningClient::new(&rpc_url, &wallet)?);

        let mut transaction_service = TransactionService::new(reader, writer, network)?
            .with_low_balance_threshold(config.low_balance_threshold()?);
        if let Some(contract) = config.contract_address()? {
            transaction_service = transaction_service.with_contract(contract);
        }

        tracing::info!(
            network = %network,
            account = %wallet.address(),
            contract = %transaction_service.contract(),
            "EVM Mint Playground MCP Server initialized successfully"
        );

        Ok(Self::with_service(transaction_service))
    }

    /// Create a server around an existing transaction service.
    pub fn with_service(transaction_service: TransactionService) -> Self {
        Self { transaction_service, tool_router: Self::tool_router() }
    }
}

/// Input parameters for tools that take an optional address.
#[derive(Debug, Clone, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct AddressInput {
    /// Address to query (0x...). Defaults to the signing account.
    #[serde(default)]
    pub address: Option<String>,
}

/// Input parameters for the get_transaction tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct GetTransactionInput {
    /// Transaction hash (0x + 64 hex chars).
    pub hash: String,
}

/// Input parameters for the run_scenario tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct RunScenarioInput {
    /// One of: lower_fee, estimated_fees, used_nonce, secure, gas_price, balance_check.
    pub scenario: String,
    /// Nonce to pin. Required by used_nonce.
    #[serde(default)]
    pub nonce: Option<u64>,
}

/// Parse and validate an Ethereum address from a string.
fn parse_address(s: &str) -> Result<Address, McpError> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(McpError::invalid_params("Address cannot be empty", None));
    }

    if !trimmed.starts_with("0x") && !trimmed.starts_with("0X") {
        return Err(McpError::invalid_params(format!("Address must start with '0x': {}", s), None));
    }

    // 0x + 40 hex chars
    if trimmed.len() != 42 {
        return Err(McpError::invalid_params(
            format!(
                "Address must be 42 characters (0x + 40 hex chars), got {}: {}",
                trimmed.len(),
                s
            ),
            None,
        ));
    }

    trimmed.parse::<Address>().map_err(|e| {
        McpError::invalid_params(format!("Invalid address format '{}': {}", s, e), None)
    })
}

/// Parse a transaction hash from a string.
fn parse_tx_hash(s: &str) -> Result<TxHash, McpError> {
    let trimmed = s.trim();

    // 0x + 64 hex chars
    if !trimmed.starts_with("0x") || trimmed.len() != 66 {
        return Err(McpError::invalid_params(
            format!("Transaction hash must be 0x + 64 hex chars: {}", s),
            None,
        ));
    }

    trimmed.parse::<TxHash>().map_err(|e| {
        McpError::invalid_params(format!("Invalid transaction hash '{}': {}", s, e), None)
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))
}

impl EvmMintServer {
    fn address_or_account(&self, input: &AddressInput) -> Result<Address, McpError> {
        match input.address.as_deref() {
            Some(address) => parse_address(address),
            None => Ok(self.transaction_service.account()),
        }
    }
}

#[tool_router]
impl EvmMintServer {
    /// Estimate gas for the mint call and the network's current EIP-1559 fees.
    #[tool(description = "Estimate gas units for the mint call and the current maxFeePerGas / maxPriorityFeePerGas (wei)")]
    pub async fn get_estimations(&self) -> Result<String, McpError> {
        tracing::info!("get_estimations called");

        let estimate = self
            .transaction_service
            .get_estimations(crate::ethereum::contracts::ContractFunction::Mint)
            .await?;

        to_json(&estimate)
    }

    /// Estimate the mint call and apply the 20% safety margin and 2 gwei tip floor.
    #[tool(description = "Compute margin-adjusted gas limit and fees for the mint call (20% margin, 2 gwei priority fee floor)")]
    pub async fn calculate_margin_fee(&self) -> Result<String, McpError> {
        tracing::info!("calculate_margin_fee called");

        let margin = self.transaction_service.calculate_margin_fee().await?;

        to_json(&serde_json::json!({
            "gas_limit": margin.gas_limit,
            "max_fee_per_gas": margin.max_fee_per_gas.to_string(),
            "max_priority_fee_per_gas": margin.max_priority_fee_per_gas.to_string(),
            "max_tx_fee": margin.max_tx_fee().to_string(),
            "max_tx_fee_eth": format_ether(margin.max_tx_fee()),
        }))
    }

    /// Query the native balance of an address.
    #[tool(description = "Query the native balance of an address (defaults to the signing account)")]
    pub async fn get_balance(
        &self,
        Parameters(input): Parameters<AddressInput>,
    ) -> Result<String, McpError> {
        tracing::info!(address = ?input.address, "get_balance called");

        let address = self.address_or_account(&input)?;
        let balance = self.transaction_service.check_balance(address).await?;

        to_json(&serde_json::json!({
            "address": format!("{address:?}"),
            "balance": format_ether(balance),
            "balance_raw": balance.to_string(),
        }))
    }

    /// Query the next nonce of an address.
    #[tool(description = "Query the transaction count (next nonce) of an address (defaults to the signing account)")]
    pub async fn get_nonce(
        &self,
        Parameters(input): Parameters<AddressInput>,
    ) -> Result<String, McpError> {
        tracing::info!(address = ?input.address, "get_nonce called");

        let address = self.address_or_account(&input)?;
        let nonce = self.transaction_service.get_current_nonce(address).await?;

        to_json(&serde_json::json!({
            "address": format!("{address:?}"),
            "nonce": nonce,
        }))
    }

    /// Look up a transaction by hash.
    #[tool(description = "Look up a transaction by hash")]
    pub async fn get_transaction(
        &self,
        Parameters(input): Parameters<GetTransactionInput>,
    ) -> Result<String, McpError> {
        tracing::info!(hash = %input.hash, "get_transaction called");

        let hash = parse_tx_hash(&input.hash)?;
        let tx = self.transaction_service.get_tx_info(hash).await?;

        to_json(&serde_json::json!({
            "transaction": tx,
            "explorer_url": self.transaction_service.network().descriptor().tx_url(hash),
        }))
    }

    /// Run a simulate-then-send scenario against the example contract.
    ///
    /// Every scenario except balance_check broadcasts a real transaction
    /// when its simulation succeeds.
    #[tool(
        description = "Run a mint scenario: lower_fee, estimated_fees, used_nonce (needs nonce), secure, gas_price, or balance_check (report only). Scenarios other than balance_check broadcast a real transaction."
    )]
    pub async fn run_scenario(
        &self,
        Parameters(input): Parameters<RunScenarioInput>,
    ) -> Result<String, McpError> {
        tracing::info!(scenario = %input.scenario, nonce = ?input.nonce, "run_scenario called");

        let scenario = Scenario::from_name(&input.scenario, input.nonce)?;
        let outcome = self.transaction_service.run_scenario(scenario).await?;

        to_json(&outcome)
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for EvmMintServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "evm-mint-playground".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "EVM Mint Playground on {}. Provides tools for estimating fees, querying \
                 balances and nonces, and simulating then submitting mint transactions.",
                self.transaction_service.network()
            )),
        }
    }
}
