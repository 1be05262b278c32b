//! Wei to gwei unit conversion.
//!
//! Fee values arrive from RPC in wei, the smallest on-chain unit. Everything
//! the monitor stores and displays is denominated in gwei (1 gwei = 10^9 wei).

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Number of wei per gwei.
pub const WEI_PER_GWEI: u64 = 1_000_000_000;

/// An amount of native currency in wei.
///
/// Newtype over `U256` so raw wei values cannot be confused with gwei display
/// values in calculations.
///
/// # Examples
///
/// ```
/// use gweisense::WeiAmount;
///
/// let fee = WeiAmount::from(5_000_000_000u64); // 5 gwei
/// assert!((fee.to_gwei() - 5.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WeiAmount(U256);

impl WeiAmount {
    /// Zero wei.
    pub const ZERO: Self = Self(U256::ZERO);

    pub const fn new(wei: U256) -> Self {
        Self(wei)
    }

    /// Inner value in wei.
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Convert to gwei for display.
    ///
    /// Lossy beyond f64 precision, which is acceptable for display values;
    /// at least six fractional digits survive for any realistic fee. Zero
    /// converts to exactly `0.0` and the conversion never fails.
    pub fn to_gwei(&self) -> f64 {
        self.0.to_string().parse::<f64>().unwrap_or(0.0) / WEI_PER_GWEI as f64
    }
}

impl From<u64> for WeiAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for WeiAmount {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for WeiAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

/// Convert a raw wei quantity to gwei display units.
pub fn wei_to_gwei(wei: u128) -> f64 {
    WeiAmount::from(wei).to_gwei()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_converts_to_zero() {
        assert_eq!(WeiAmount::ZERO.to_gwei(), 0.0);
        assert_eq!(wei_to_gwei(0), 0.0);
    }

    #[test]
    fn preserves_six_fractional_digits() {
        // 30.123456 gwei
        let wei = WeiAmount::from(30_123_456_000u64);
        assert!((wei.to_gwei() - 30.123_456).abs() < 1e-9);
    }

    #[test]
    fn sub_gwei_values_survive() {
        let wei = WeiAmount::from(1_500u64); // 0.0000015 gwei
        assert!((wei.to_gwei() - 0.000_001_5).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn conversion_divides_by_1e9(wei in 0u128..=u128::from(u64::MAX)) {
            let expected = wei as f64 / 1e9;
            let got = wei_to_gwei(wei);
            let tolerance = (expected * 1e-12).max(1e-12);
            prop_assert!((got - expected).abs() <= tolerance);
        }
    }
}
