//! Scenario names and results.

use std::fmt;

use alloy::primitives::{Address, Bytes, TxHash, U256};
use serde::Serialize;

use super::{tx::TxParams, units::as_decimal};
use crate::error::{AppError, Result};

/// A named simulate-then-send sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// 1 wei tip and 15 wei fee cap, far below any real base fee.
    LowerFee,
    /// Fees exactly as estimated by the node.
    EstimatedFees,
    /// Estimated fees with a pinned nonce.
    UsedNonce(u64),
    /// Fees and gas limit passed through the safety margin.
    Secure,
    /// Legacy pricing at 5 wei per gas.
    GasPrice,
    /// Report whether the margin fee would push the balance under the threshold.
    BalanceCheck,
}

impl Scenario {
    /// Names accepted by [`Scenario::from_name`].
    pub const NAMES: [&'static str; 6] =
        ["lower_fee", "estimated_fees", "used_nonce", "secure", "gas_price", "balance_check"];

    /// Parse a scenario by name. `used_nonce` requires `nonce`.
    pub fn from_name(name: &str, nonce: Option<u64>) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "lower_fee" => Ok(Scenario::LowerFee),
            "estimated_fees" => Ok(Scenario::EstimatedFees),
            "used_nonce" => nonce.map(Scenario::UsedNonce).ok_or_else(|| {
                AppError::Parse("Scenario 'used_nonce' requires a nonce".to_string())
            }),
            "secure" => Ok(Scenario::Secure),
            "gas_price" => Ok(Scenario::GasPrice),
            "balance_check" => Ok(Scenario::BalanceCheck),
            other => Err(AppError::Parse(format!(
                "Unknown scenario '{}'. Expected one of: {}",
                other,
                Self::NAMES.join(", ")
            ))),
        }
    }

    /// Scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::LowerFee => "lower_fee",
            Scenario::EstimatedFees => "estimated_fees",
            Scenario::UsedNonce(_) => "used_nonce",
            Scenario::Secure => "secure",
            Scenario::GasPrice => "gas_price",
            Scenario::BalanceCheck => "balance_check",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::UsedNonce(nonce) => write!(f, "used_nonce({nonce})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Result of a dry-run call.
#[derive(Debug, Clone, Serialize)]
pub struct SimulatedCall {
    /// Parameters that were simulated.
    pub params: TxParams,
    /// Raw return data of the call.
    pub return_data: Bytes,
}

/// Balance headroom for one margin-secured transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceCheck {
    /// Checked account.
    pub address: Address,
    /// Current balance in wei.
    #[serde(serialize_with = "as_decimal::serialize")]
    pub balance: U256,
    /// Worst-case fee of the transaction in wei.
    #[serde(serialize_with = "as_decimal::serialize")]
    pub tx_fee: U256,
    /// Low balance threshold in wei.
    #[serde(serialize_with = "as_decimal::serialize")]
    pub threshold: U256,
    /// The balance is already under the threshold.
    pub below_threshold: bool,
    /// Paying the fee would leave the balance under the threshold.
    pub below_threshold_after_tx: bool,
}

impl BalanceCheck {
    /// Compare `balance` and `balance - tx_fee` against `threshold`.
    pub fn evaluate(address: Address, balance: U256, tx_fee: U256, threshold: U256) -> Self {
        Self {
            address,
            balance,
            tx_fee,
            threshold,
            below_threshold: balance < threshold,
            // balance - fee < threshold, without underflow
            below_threshold_after_tx: balance < threshold.saturating_add(tx_fee),
        }
    }
}

/// What running a scenario produced.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioOutcome {
    /// A transaction was broadcast.
    Submitted {
        scenario: String,
        tx_hash: TxHash,
        explorer_url: String,
    },
    /// Nothing was sent; a report was produced instead.
    Reported { scenario: String, balance_check: BalanceCheck },
}
