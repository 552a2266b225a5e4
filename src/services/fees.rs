//! Fee margin policy.
//!
//! Turns a raw network estimate into submission-ready values. All arithmetic
//! stays in integer wei: a 1.2x multiplier is applied as `value * 120 / 100`.

use alloy::primitives::U256;

use crate::types::{format_gwei, FeeEstimate, MarginFees};

/// Fixed-point precision of the margin multipliers.
pub const MARGIN_PRECISION: u64 = 100;

/// Default 20% safety margin, expressed in [`MARGIN_PRECISION`] units.
pub const DEFAULT_MARGIN: u64 = 120;

/// Floor for the priority fee: 2 gwei.
pub const DEFAULT_PRIORITY_FEE_FLOOR: u128 = 2_000_000_000;

/// Safety margins applied to a [`FeeEstimate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeMarginPolicy {
    /// Multiplier for the priority fee, in [`MARGIN_PRECISION`] units.
    pub priority_fee_margin: u64,
    /// Multiplier for the max fee, in [`MARGIN_PRECISION`] units.
    pub max_fee_margin: u64,
    /// Multiplier for the gas limit, in [`MARGIN_PRECISION`] units.
    pub gas_limit_margin: u64,
    /// Minimum priority fee in wei.
    pub priority_fee_floor: u128,
}

impl Default for FeeMarginPolicy {
    fn default() -> Self {
        Self {
            priority_fee_margin: DEFAULT_MARGIN,
            max_fee_margin: DEFAULT_MARGIN,
            gas_limit_margin: DEFAULT_MARGIN,
            priority_fee_floor: DEFAULT_PRIORITY_FEE_FLOOR,
        }
    }
}

impl FeeMarginPolicy {
    /// Apply the margins to `estimate`.
    ///
    /// The priority fee is the larger of the inflated estimate and the floor.
    /// The max fee is the larger of the inflated estimate and `priority + 1`,
    /// so it always exceeds the selected priority fee.
    pub fn apply(&self, estimate: &FeeEstimate) -> MarginFees {
        let priority_margin =
            scale(U256::from(estimate.max_priority_fee_per_gas), self.priority_fee_margin)
                .saturating_to::<u128>();
        let priority_default = self.priority_fee_floor;
        // leaves room for the max fee to stay strictly above it
        let max_priority_fee = priority_margin.max(priority_default).min(u128::MAX - 1);

        tracing::info!(
            estimated = estimate.max_priority_fee_per_gas,
            margin = priority_margin,
            default = priority_default,
            selected = max_priority_fee,
            selected_gwei = %format_gwei(max_priority_fee),
            "maxPriorityFeePerGas"
        );

        let fee_default = max_priority_fee + 1;
        let fee_margin =
            scale(U256::from(estimate.max_fee_per_gas), self.max_fee_margin).saturating_to::<u128>();
        let max_fee = fee_margin.max(fee_default);

        tracing::info!(
            estimated = estimate.max_fee_per_gas,
            margin = fee_margin,
            default = fee_default,
            selected = max_fee,
            selected_gwei = %format_gwei(max_fee),
            "maxFeePerGas"
        );

        let gas_limit =
            scale(U256::from(estimate.estimated_gas), self.gas_limit_margin).saturating_to::<u64>();

        tracing::info!(estimated = estimate.estimated_gas, margin = gas_limit, "gasLimit");

        MarginFees { gas_limit, max_fee_per_gas: max_fee, max_priority_fee_per_gas: max_priority_fee }
    }
}

/// Apply the default policy to `estimate`.
pub fn apply_margin(estimate: &FeeEstimate) -> MarginFees {
    FeeMarginPolicy::default().apply(estimate)
}

/// `value * margin / MARGIN_PRECISION`, truncating, without intermediate overflow.
fn scale(value: U256, margin: u64) -> U256 {
    value * U256::from(margin) / U256::from(MARGIN_PRECISION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn estimate(gas: u64, max_fee: u128, priority: u128) -> FeeEstimate {
        FeeEstimate { estimated_gas: gas, max_fee_per_gas: max_fee, max_priority_fee_per_gas: priority }
    }

    #[test]
    fn test_floor_dominates_tiny_estimate() {
        let margin = apply_margin(&estimate(21_000, 30, 2));
        assert_eq!(
            margin,
            MarginFees {
                gas_limit: 25_200,
                max_fee_per_gas: 2_000_000_001,
                max_priority_fee_per_gas: 2_000_000_000,
            }
        );
    }

    #[test]
    fn test_zero_priority_selects_floor() {
        let margin = apply_margin(&estimate(0, 0, 0));
        assert_eq!(margin.max_priority_fee_per_gas, DEFAULT_PRIORITY_FEE_FLOOR);
        assert_eq!(margin.max_fee_per_gas, DEFAULT_PRIORITY_FEE_FLOOR + 1);
        assert_eq!(margin.gas_limit, 0);
    }

    #[test]
    fn test_priority_above_floor_is_inflated() {
        let margin = apply_margin(&estimate(100_000, 0, 10_000_000_000));
        assert_eq!(margin.max_priority_fee_per_gas, 12_000_000_000);
        assert_eq!(margin.max_fee_per_gas, 12_000_000_001);
    }

    #[test]
    fn test_inflation_truncates() {
        let margin = apply_margin(&estimate(1, 0, 100_000_000_001));
        // 100000000001 * 120 / 100 = 120000000001.2
        assert_eq!(margin.max_priority_fee_per_gas, 120_000_000_001);
        // 1 * 120 / 100 = 1.2
        assert_eq!(margin.gas_limit, 1);
    }

    #[test]
    fn test_max_fee_margin_wins_when_larger() {
        let margin = apply_margin(&estimate(50_000, 50_000_000_000, 1_000_000_000));
        assert_eq!(margin.max_priority_fee_per_gas, DEFAULT_PRIORITY_FEE_FLOOR);
        assert_eq!(margin.max_fee_per_gas, 60_000_000_000);
        assert_eq!(margin.gas_limit, 60_000);
    }

    #[test]
    fn test_custom_policy() {
        let policy = FeeMarginPolicy {
            priority_fee_margin: 150,
            max_fee_margin: 200,
            gas_limit_margin: 110,
            priority_fee_floor: 0,
        };
        let margin = policy.apply(&estimate(100, 10, 4));
        assert_eq!(margin.max_priority_fee_per_gas, 6);
        assert_eq!(margin.max_fee_per_gas, 20);
        assert_eq!(margin.gas_limit, 110);
    }

    #[test]
    fn test_extreme_inputs_saturate() {
        let margin = apply_margin(&estimate(u64::MAX, u128::MAX, u128::MAX));
        assert_eq!(margin.gas_limit, u64::MAX);
        assert_eq!(margin.max_priority_fee_per_gas, u128::MAX - 1);
        assert_eq!(margin.max_fee_per_gas, u128::MAX);
    }

    #[test]
    fn test_saturated_priority_keeps_max_fee_above_it() {
        let margin = apply_margin(&estimate(u64::MAX, 0, u128::MAX));
        assert!(margin.max_fee_per_gas > margin.max_priority_fee_per_gas);
        assert_eq!(margin.max_fee_per_gas, u128::MAX);
    }

    proptest! {
        #[test]
        fn prop_margin_guarantees(
            gas in 0u64..=u64::MAX / 2,
            max_fee in 0u128..=u128::MAX / 200,
            priority in 0u128..=u128::MAX / 200,
        ) {
            let margin = apply_margin(&estimate(gas, max_fee, priority));

            let inflated_priority = priority * 120 / 100;
            prop_assert!(margin.max_priority_fee_per_gas >= inflated_priority);
            prop_assert!(margin.max_priority_fee_per_gas >= DEFAULT_PRIORITY_FEE_FLOOR);
            prop_assert_eq!(
                margin.max_priority_fee_per_gas,
                inflated_priority.max(DEFAULT_PRIORITY_FEE_FLOOR)
            );
            prop_assert!(margin.max_fee_per_gas > margin.max_priority_fee_per_gas);
            prop_assert!(margin.gas_limit >= gas);
        }
    }
}
