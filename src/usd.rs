//! USD price type for fiat conversion.

use serde::{Deserialize, Serialize};

/// A USD-denominated price.
///
/// Prevents confusing fiat prices with the other f64 values (gwei fees,
/// native amounts) the monitor works with.
///
/// # Examples
///
/// ```
/// use gweisense::UsdPrice;
///
/// let price = UsdPrice::new(1800.50);
/// assert_eq!(price.format(2), "$1800.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsdPrice(f64);

impl UsdPrice {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn as_f64(&self) -> f64 {
        self.0
    }

    /// Format as a dollar string with the given precision.
    pub fn format(&self, precision: usize) -> String {
        format!("${:.precision$}", self.0, precision = precision)
    }
}

impl From<f64> for UsdPrice {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_requested_precision() {
        let price = UsdPrice::new(1234.567);
        assert_eq!(price.format(2), "$1234.57");
        assert_eq!(price.format(0), "$1235");
    }
}
