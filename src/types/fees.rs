//! Fee and gas estimate types.

use alloy::primitives::U256;
use serde::Serialize;

use super::{tx::FeeOverride, units::as_decimal};

/// Raw network estimate for one contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeEstimate {
    /// Estimated gas units.
    pub estimated_gas: u64,
    /// Estimated fee cap per gas in wei.
    #[serde(serialize_with = "as_decimal::serialize")]
    pub max_fee_per_gas: u128,
    /// Estimated tip per gas in wei.
    #[serde(serialize_with = "as_decimal::serialize")]
    pub max_priority_fee_per_gas: u128,
}

impl FeeEstimate {
    /// The estimate's fee fields as an EIP-1559 override.
    pub fn fees(&self) -> FeeOverride {
        FeeOverride::dynamic(self.max_fee_per_gas, self.max_priority_fee_per_gas)
    }
}

/// Submission-ready values derived from a [`FeeEstimate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarginFees {
    /// Gas limit in units.
    pub gas_limit: u64,
    /// Fee cap per gas in wei.
    #[serde(serialize_with = "as_decimal::serialize")]
    pub max_fee_per_gas: u128,
    /// Tip per gas in wei.
    #[serde(serialize_with = "as_decimal::serialize")]
    pub max_priority_fee_per_gas: u128,
}

impl MarginFees {
    /// Worst-case fee of a transaction: `max_fee_per_gas * gas_limit`.
    pub fn max_tx_fee(&self) -> U256 {
        U256::from(self.max_fee_per_gas) * U256::from(self.gas_limit)
    }

    /// The fee fields as an EIP-1559 override.
    pub fn fees(&self) -> FeeOverride {
        FeeOverride::dynamic(self.max_fee_per_gas, self.max_priority_fee_per_gas)
    }
}
