//! Transaction cost estimation.
//!
//! Combines a user-supplied gas limit with the current effective fee and the
//! native token's USD price to produce a cost in native units and fiat.

use serde::{Deserialize, Serialize};

use crate::network::NetworkId;
use crate::units::WEI_PER_GWEI;
use crate::usd::UsdPrice;

/// Common gas limits for typical transaction kinds.
///
/// Mirrors the presets users reach for most often; the monitor also accepts
/// arbitrary limits via [`GasMonitor::set_gas_limit`](crate::GasMonitor::set_gas_limit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GasLimitPreset {
    /// Plain native-token transfer.
    NativeTransfer,
    /// ERC-20 approval.
    Erc20Approval,
    /// DEX swap.
    Swap,
}

impl GasLimitPreset {
    pub const ALL: [GasLimitPreset; 3] = [
        GasLimitPreset::NativeTransfer,
        GasLimitPreset::Erc20Approval,
        GasLimitPreset::Swap,
    ];

    pub fn gas_limit(&self) -> u64 {
        match self {
            GasLimitPreset::NativeTransfer => 21_000,
            GasLimitPreset::Erc20Approval => 45_000,
            GasLimitPreset::Swap => 100_000,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GasLimitPreset::NativeTransfer => "Transfer (21k)",
            GasLimitPreset::Erc20Approval => "ERC20 Approval (45k)",
            GasLimitPreset::Swap => "Swap (100k)",
        }
    }
}

/// Estimated cost of a transaction at the current fee and token price.
///
/// Amounts are stored at full precision; rounding happens only in the
/// display helpers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Cost in whole native-token units (ETH, MATIC, BNB).
    pub native_amount: f64,
    /// Cost in USD.
    pub fiat_amount: f64,
    /// Ticker symbol of the native token, for display.
    pub native_symbol: &'static str,
}

impl CostEstimate {
    /// Compute the estimate for `gas_limit` units of gas at
    /// `effective_fee_gwei` on `network`, priced at `token_price`.
    ///
    /// `gas_limit * fee_gwei` yields a gwei total; dividing by 10^9 undoes
    /// the gwei scaling back to whole-token units.
    pub fn compute(
        network: NetworkId,
        gas_limit: u64,
        effective_fee_gwei: f64,
        token_price: UsdPrice,
    ) -> Self {
        let native_amount = gas_limit as f64 * effective_fee_gwei / WEI_PER_GWEI as f64;
        Self {
            native_amount,
            fiat_amount: native_amount * token_price.as_f64(),
            native_symbol: network.native_symbol(),
        }
    }

    /// Native amount rounded to six fractional digits, e.g. `0.000630 ETH`.
    pub fn native_display(&self) -> String {
        format!("{:.6} {}", self.native_amount, self.native_symbol)
    }

    /// Fiat amount rounded to two fractional digits, e.g. `$1.26`.
    pub fn fiat_display(&self) -> String {
        format!("${:.2}", self.fiat_amount)
    }
}
