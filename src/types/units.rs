//! Unit conversion helpers for wei amounts.

use alloy::primitives::U256;

/// Decimals of one ether in wei.
pub const ETHER_DECIMALS: u8 = 18;

/// Decimals of one gwei in wei.
pub const GWEI_DECIMALS: u8 = 9;

/// Format a wei value with decimals to a human-readable string.
pub fn format_units(value: U256, decimals: u8) -> String {
    if value == U256::ZERO {
        return "0".to_string();
    }

    let value_str = value.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return value_str;
    }

    let len = value_str.len();
    let (integer, fraction) = if len <= decimals {
        ("0".to_string(), format!("{}{}", "0".repeat(decimals - len), value_str))
    } else {
        let (integer, fraction) = value_str.split_at(len - decimals);
        (integer.to_string(), fraction.to_string())
    };

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        integer
    } else {
        format!("{integer}.{fraction}")
    }
}

/// Format wei as ether.
pub fn format_ether(wei: U256) -> String {
    format_units(wei, ETHER_DECIMALS)
}

/// Format a per-gas fee in wei as gwei.
pub fn format_gwei(wei: u128) -> String {
    format_units(U256::from(wei), GWEI_DECIMALS)
}

/// Parse a human-readable amount string to wei with decimals.
///
/// Fractions longer than `decimals` are truncated.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, String> {
    let amount = amount.trim();

    if amount.is_empty() {
        return Err("Amount cannot be empty".to_string());
    }
    if amount.starts_with('-') {
        return Err("Amount cannot be negative".to_string());
    }

    let decimals = decimals as usize;
    let (integer, fraction) = match amount.split_once('.') {
        Some((_, fraction)) if fraction.contains('.') => {
            return Err("Invalid amount format".to_string())
        }
        Some((integer, fraction)) => (integer, fraction),
        None => (amount, ""),
    };

    let mut fraction = fraction.to_string();
    if fraction.len() > decimals {
        fraction.truncate(decimals);
    } else {
        fraction.push_str(&"0".repeat(decimals - fraction.len()));
    }

    let parse = |digits: &str, what: &str| -> Result<U256, String> {
        if digits.is_empty() {
            Ok(U256::ZERO)
        } else {
            digits.parse::<U256>().map_err(|e| format!("Invalid {what}: {e}"))
        }
    };

    let too_large = || "Amount too large".to_string();
    let multiplier = U256::from(10).checked_pow(U256::from(decimals)).ok_or_else(too_large)?;
    let integer = parse(integer, "integer part")?;
    let fraction = parse(&fraction, "fraction part")?;
    integer
        .checked_mul(multiplier)
        .and_then(|whole| whole.checked_add(fraction))
        .ok_or_else(too_large)
}

/// Parse an ether amount to wei.
pub fn parse_ether(amount: &str) -> Result<U256, String> {
    parse_units(amount, ETHER_DECIMALS)
}

/// Serialize wei amounts as decimal strings.
///
/// JSON consumers cannot read values above 2^53 losslessly as numbers.
pub mod as_decimal {
    use std::fmt::Display;

    use serde::Serializer;

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn serialize_option<T: Display, S: Serializer>(
        value: &Option<T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_none(),
        }
    }
}
