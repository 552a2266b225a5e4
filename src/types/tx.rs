//! Transaction parameter types.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    rpc::types::TransactionRequest,
};
use serde::Serialize;

use super::units::as_decimal;
use crate::ethereum::contracts::ContractFunction;

/// Fee fields of a submission.
///
/// Legacy and EIP-1559 pricing are mutually exclusive on the wire, so they
/// live in separate variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FeeOverride {
    /// Legacy (type 0) pricing.
    Legacy {
        /// Price per gas in wei.
        #[serde(rename = "gasPrice", serialize_with = "as_decimal::serialize")]
        gas_price: u128,
    },
    /// EIP-1559 (type 2) pricing. Unset fields are filled by the provider.
    Dynamic {
        /// Total fee cap per gas in wei, inclusive of the priority fee.
        #[serde(
            rename = "maxFeePerGas",
            skip_serializing_if = "Option::is_none",
            serialize_with = "as_decimal::serialize_option"
        )]
        max_fee_per_gas: Option<u128>,
        /// Tip per gas in wei.
        #[serde(
            rename = "maxPriorityFeePerGas",
            skip_serializing_if = "Option::is_none",
            serialize_with = "as_decimal::serialize_option"
        )]
        max_priority_fee_per_gas: Option<u128>,
    },
}

impl FeeOverride {
    /// Legacy pricing at a fixed gas price.
    pub fn legacy(gas_price: u128) -> Self {
        FeeOverride::Legacy { gas_price }
    }

    /// EIP-1559 pricing with both caps set.
    pub fn dynamic(max_fee_per_gas: u128, max_priority_fee_per_gas: u128) -> Self {
        FeeOverride::Dynamic {
            max_fee_per_gas: Some(max_fee_per_gas),
            max_priority_fee_per_gas: Some(max_priority_fee_per_gas),
        }
    }
}

/// Optional overrides merged into a contract call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxOverrides {
    /// Gas limit. Setting it skips the provider's own estimation.
    pub gas_limit: Option<u64>,
    /// Fee fields.
    pub fees: Option<FeeOverride>,
    /// Explicit nonce.
    pub nonce: Option<u64>,
}

impl TxOverrides {
    /// Set the gas limit.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Set the fee fields.
    pub fn with_fees(mut self, fees: FeeOverride) -> Self {
        self.fees = Some(fees);
        self
    }

    /// Pin the nonce.
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }
}

/// Parameters of one call on the example contract.
///
/// Serializes with only the supplied overrides present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxParams {
    /// Signing account.
    pub account: Address,
    /// Contract address.
    pub address: Address,
    /// ABI signature of the called function.
    pub abi: &'static str,
    /// Called function name.
    pub function_name: &'static str,
    #[serde(rename = "gas", skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
    #[serde(flatten)]
    pub fees: Option<FeeOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    #[serde(skip)]
    calldata: Bytes,
}

impl TxParams {
    /// Build the parameters for `function`, merging in the supplied overrides.
    pub fn build(
        account: Address,
        contract: Address,
        function: ContractFunction,
        overrides: TxOverrides,
    ) -> Self {
        if let Some(gas_limit) = overrides.gas_limit {
            tracing::info!(gas_limit, "gasLimit used");
        }
        match overrides.fees {
            Some(FeeOverride::Legacy { gas_price }) => {
                tracing::info!(gas_price, "gasPrice used");
            }
            Some(FeeOverride::Dynamic { max_fee_per_gas, max_priority_fee_per_gas }) => {
                if let Some(max_fee) = max_fee_per_gas {
                    tracing::info!(max_fee_per_gas = max_fee, "maxFeePerGas used");
                }
                if let Some(priority) = max_priority_fee_per_gas {
                    tracing::info!(max_priority_fee_per_gas = priority, "maxPriorityFeePerGas used");
                }
            }
            None => {}
        }
        if let Some(nonce) = overrides.nonce {
            tracing::info!(nonce, "nonce used");
        }

        Self {
            account,
            address: contract,
            abi: function.signature(),
            function_name: function.name(),
            gas_limit: overrides.gas_limit,
            fees: overrides.fees,
            nonce: overrides.nonce,
            calldata: function.calldata(),
        }
    }

    /// ABI-encoded calldata.
    pub fn calldata(&self) -> &Bytes {
        &self.calldata
    }

    /// Convert into an RPC transaction request carrying only the set fields.
    pub fn to_request(&self) -> TransactionRequest {
        let mut tx = TransactionRequest::default()
            .with_from(self.account)
            .with_to(self.address)
            .with_input(self.calldata.clone());

        if let Some(gas_limit) = self.gas_limit {
            tx = tx.with_gas_limit(gas_limit);
        }
        match self.fees {
            Some(FeeOverride::Legacy { gas_price }) => {
                tx = tx.with_gas_price(gas_price);
            }
            Some(FeeOverride::Dynamic { max_fee_per_gas, max_priority_fee_per_gas }) => {
                if let Some(max_fee) = max_fee_per_gas {
                    tx = tx.with_max_fee_per_gas(max_fee);
                }
                if let Some(priority) = max_priority_fee_per_gas {
                    tx = tx.with_max_priority_fee_per_gas(priority);
                }
            }
            None => {}
        }
        if let Some(nonce) = self.nonce {
            tx = tx.with_nonce(nonce);
        }
        tx
    }
}
