//! Data source traits for fee and price acquisition.
//!
//! The monitor drives these two abstractions on every poll cycle. They are
//! independent by design: a price failure must never block a fee snapshot
//! from being published, and vice versa.
//!
//! Both traits are object safe, so the monitor holds `Arc<dyn FeeSource>` /
//! `Arc<dyn PriceSource>` and tests can substitute mocks without touching
//! any network.

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::fees::RawFeeData;
use crate::network::NetworkId;
use crate::usd::UsdPrice;

/// Fetches current fee data for a network.
///
/// Implementations must not retry internally; a failed call is retried by
/// the caller on the next poll cycle or manual refresh.
#[async_trait]
pub trait FeeSource: Send + Sync {
    /// Fetch the current base, priority, and effective fee (in wei) for
    /// `network`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] on transport failure
    /// - [`FetchError::Malformed`] if the response lacks required fields
    async fn fetch_fee_data(&self, network: NetworkId) -> Result<RawFeeData, FetchError>;
}

/// Fetches the current USD price of a network's native token.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the fiat price for `network`'s native token.
    ///
    /// Same failure taxonomy as [`FeeSource::fetch_fee_data`].
    async fn fetch_token_price(&self, network: NetworkId) -> Result<UsdPrice, FetchError>;
}
