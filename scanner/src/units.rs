//! Raw token amounts. Explorer balances routinely exceed `u128`, so they
//! are summed as `U256` and only converted to `f64` for ratios.

use std::str::FromStr;

use alloy::primitives::U256;

/// Parse a decimal amount string, treating anything malformed as zero
pub fn parse_raw(value: &str) -> U256 {
    U256::from_str(value.trim()).unwrap_or(U256::ZERO)
}

/// Helper to convert U256 to f64
pub fn u256_to_f64(value: U256) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

/// 10^exp as U256
pub fn pow10(exp: u64) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}
