//! Transaction scenarios.
//!
//! Each scenario estimates, builds the call parameters, simulates them through
//! the read client and only then submits through the signing client. A failed
//! simulation ends the scenario before anything is broadcast.

use alloy::{
    primitives::{Address, TxHash, U256},
    rpc::types::Transaction,
};
use std::sync::Arc;

use crate::{
    error::{AppError, Result},
    ethereum::{
        chains::Network,
        client::{ChainReader, ChainWriter},
        contracts::{ContractFunction, WAGMI_MINT_EXAMPLE},
    },
    services::fees::FeeMarginPolicy,
    types::{
        format_ether, parse_ether, BalanceCheck, FeeEstimate, FeeOverride, MarginFees, Scenario,
        ScenarioOutcome, SimulatedCall, TxOverrides, TxParams,
    },
};

/// Tip used by the lower fee scenario, in wei.
pub const LOWER_PRIORITY_FEE: u128 = 1;

/// Fee cap used by the lower fee scenario, in wei.
pub const LOWER_MAX_FEE: u128 = LOWER_PRIORITY_FEE + 14;

/// Legacy gas price used by the gas price scenario, in wei.
pub const LEGACY_GAS_PRICE: u128 = 5;

/// Default low balance threshold, in ether.
pub const DEFAULT_LOW_BALANCE_THRESHOLD: &str = "0.3";

/// Service running mint transactions against one network.
#[derive(Clone)]
pub struct TransactionService {
    reader: Arc<dyn ChainReader>,
    writer: Arc<dyn ChainWriter>,
    network: Network,
    contract: Address,
    function: ContractFunction,
    margin_policy: FeeMarginPolicy,
    low_balance_threshold: U256,
}

impl TransactionService {
    /// Create a service minting on the default example contract.
    pub fn new(
        reader: Arc<dyn ChainReader>,
        writer: Arc<dyn ChainWriter>,
        network: Network,
    ) -> Result<Self> {
        let low_balance_threshold =
            parse_ether(DEFAULT_LOW_BALANCE_THRESHOLD).map_err(AppError::Parse)?;

        Ok(Self {
            reader,
            writer,
            network,
            contract: WAGMI_MINT_EXAMPLE,
            function: ContractFunction::Mint,
            margin_policy: FeeMarginPolicy::default(),
            low_balance_threshold,
        })
    }

    /// Target a different deployment of the example contract.
    pub fn with_contract(mut self, contract: Address) -> Self {
        self.contract = contract;
        self
    }

    /// Replace the low balance threshold (wei).
    pub fn with_low_balance_threshold(mut self, threshold: U256) -> Self {
        self.low_balance_threshold = threshold;
        self
    }

    /// Signing account.
    pub fn account(&self) -> Address {
        self.writer.account()
    }

    /// Selected network.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Contract the scenarios call.
    pub fn contract(&self) -> Address {
        self.contract
    }

    /// Build mint parameters with `overrides`.
    pub fn build_params(&self, overrides: TxOverrides) -> TxParams {
        TxParams::build(self.account(), self.contract, self.function, overrides)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Estimate gas for `function` and the network's current fees.
    pub async fn get_estimations(&self, function: ContractFunction) -> Result<FeeEstimate> {
        let params = TxParams::build(self.account(), self.contract, function, TxOverrides::default());
        let estimated_gas = self.reader.estimate_contract_gas(&params).await?;
        let fees = self.reader.estimate_fees_per_gas().await?;

        let estimate = FeeEstimate {
            estimated_gas,
            max_fee_per_gas: fees.max_fee_per_gas,
            max_priority_fee_per_gas: fees.max_priority_fee_per_gas,
        };

        tracing::info!(
            function = function.name(),
            estimated_gas = estimate.estimated_gas,
            max_fee_per_gas = estimate.max_fee_per_gas,
            max_priority_fee_per_gas = estimate.max_priority_fee_per_gas,
            "Estimations"
        );

        Ok(estimate)
    }

    /// Estimate the mint call and apply the safety margin.
    pub async fn calculate_margin_fee(&self) -> Result<MarginFees> {
        let estimate = self.get_estimations(self.function).await?;
        Ok(self.margin_policy.apply(&estimate))
    }

    /// Native balance of `address`.
    pub async fn check_balance(&self, address: Address) -> Result<U256> {
        let balance = self.reader.get_balance(address).await?;
        tracing::info!(address = %address, balance = %balance, ether = %format_ether(balance), "Balance");
        Ok(balance)
    }

    /// Next nonce of `address`.
    pub async fn get_current_nonce(&self, address: Address) -> Result<u64> {
        let nonce = self.reader.get_transaction_count(address).await?;
        tracing::info!(address = %address, nonce, "Current nonce");
        Ok(nonce)
    }

    /// Look up a submitted transaction.
    pub async fn get_tx_info(&self, hash: TxHash) -> Result<Transaction> {
        let tx = self
            .reader
            .get_transaction_by_hash(hash)
            .await?
            .ok_or(AppError::TransactionNotFound(hash))?;

        tracing::info!(
            hash = %hash,
            explorer = %self.network.descriptor().tx_url(hash),
            "Transaction found"
        );

        Ok(tx)
    }

    // ========================================================================
    // Simulate / send
    // ========================================================================

    /// Dry-run the mint call with `overrides`.
    pub async fn simulate_transaction(&self, overrides: TxOverrides) -> Result<SimulatedCall> {
        let params = self.build_params(overrides);
        let return_data = self.reader.simulate_contract(&params).await?;

        tracing::info!(gas = ?params.gas_limit, "Simulation succeeded");

        Ok(SimulatedCall { params, return_data })
    }

    /// Sign and broadcast the mint call with `overrides`.
    pub async fn send_transaction(&self, overrides: TxOverrides) -> Result<TxHash> {
        let params = self.build_params(overrides);
        let hash = self.writer.write_contract(&params).await?;

        tracing::info!(
            tx_hash = %hash,
            explorer = %self.network.descriptor().tx_url(hash),
            "Transaction submitted"
        );

        Ok(hash)
    }

    async fn simulate_then_send(
        &self,
        scenario: Scenario,
        simulate: TxOverrides,
        send: TxOverrides,
    ) -> Result<TxHash> {
        let result = async {
            self.simulate_transaction(simulate).await?;
            self.send_transaction(send).await
        }
        .await;

        if let Err(err) = &result {
            tracing::error!(scenario = %scenario, error = %err, "Scenario failed");
        }
        result
    }

    // ========================================================================
    // Scenarios
    // ========================================================================

    /// Send with a 1 wei tip and a 15 wei fee cap.
    pub async fn send_tx_with_lower_fee(&self) -> Result<TxHash> {
        let estimate = self.get_estimations(self.function).await?;
        let fees = FeeOverride::dynamic(LOWER_MAX_FEE, LOWER_PRIORITY_FEE);

        self.simulate_then_send(
            Scenario::LowerFee,
            TxOverrides::default().with_gas_limit(estimate.estimated_gas).with_fees(fees),
            TxOverrides::default().with_fees(fees),
        )
        .await
    }

    /// Send with the node's fee estimate.
    pub async fn send_tx_with_estimated_fees(&self) -> Result<TxHash> {
        let estimate = self.get_estimations(self.function).await?;

        self.simulate_then_send(
            Scenario::EstimatedFees,
            TxOverrides::default().with_gas_limit(estimate.estimated_gas).with_fees(estimate.fees()),
            TxOverrides::default().with_fees(estimate.fees()),
        )
        .await
    }

    /// Send with the node's fee estimate and a pinned nonce.
    ///
    /// Reusing an already mined nonce makes the node reject the submission.
    pub async fn send_tx_with_used_nonce(&self, nonce: u64) -> Result<TxHash> {
        let estimate = self.get_estimations(self.function).await?;

        self.simulate_then_send(
            Scenario::UsedNonce(nonce),
            TxOverrides::default()
                .with_gas_limit(estimate.estimated_gas)
                .with_fees(estimate.fees())
                .with_nonce(nonce),
            TxOverrides::default().with_fees(estimate.fees()).with_nonce(nonce),
        )
        .await
    }

    /// Send with margin-adjusted fees and gas limit.
    pub async fn send_secure_tx(&self) -> Result<TxHash> {
        let margin = self.calculate_margin_fee().await?;
        let overrides =
            TxOverrides::default().with_gas_limit(margin.gas_limit).with_fees(margin.fees());

        self.simulate_then_send(Scenario::Secure, overrides, overrides).await
    }

    /// Send a legacy transaction at a fixed gas price.
    pub async fn send_tx_with_gas_price(&self) -> Result<TxHash> {
        let overrides = TxOverrides::default().with_fees(FeeOverride::legacy(LEGACY_GAS_PRICE));

        self.simulate_then_send(Scenario::GasPrice, overrides, overrides).await
    }

    /// Check whether a margin-secured mint would leave the balance under the
    /// low balance threshold. Nothing is sent.
    pub async fn check_balance_before_send_tx(&self) -> Result<BalanceCheck> {
        let margin = self.calculate_margin_fee().await?;
        let balance = self.check_balance(self.account()).await?;

        let check = BalanceCheck::evaluate(
            self.account(),
            balance,
            margin.max_tx_fee(),
            self.low_balance_threshold,
        );

        if check.below_threshold {
            tracing::warn!(
                balance = %format_ether(check.balance),
                threshold = %format_ether(check.threshold),
                "Balance is already below the threshold"
            );
        }
        if check.below_threshold_after_tx {
            tracing::warn!(
                balance = %format_ether(check.balance),
                tx_fee = %format_ether(check.tx_fee),
                threshold = %format_ether(check.threshold),
                "Balance will be below the threshold after the tx"
            );
        }

        Ok(check)
    }

    /// Run a scenario by value.
    pub async fn run_scenario(&self, scenario: Scenario) -> Result<ScenarioOutcome> {
        tracing::info!(scenario = %scenario, network = %self.network, "Running scenario");

        let tx_hash = match scenario {
            Scenario::LowerFee => self.send_tx_with_lower_fee().await?,
            Scenario::EstimatedFees => self.send_tx_with_estimated_fees().await?,
            Scenario::UsedNonce(nonce) => self.send_tx_with_used_nonce(nonce).await?,
            Scenario::Secure => self.send_secure_tx().await?,
            Scenario::GasPrice => self.send_tx_with_gas_price().await?,
            Scenario::BalanceCheck => {
                let balance_check = self.check_balance_before_send_tx().await?;
                return Ok(ScenarioOutcome::Reported {
                    scenario: scenario.to_string(),
                    balance_check,
                });
            }
        };

        Ok(ScenarioOutcome::Submitted {
            scenario: scenario.to_string(),
            tx_hash,
            explorer_url: self.network.descriptor().tx_url(tx_hash),
        })
    }
}
