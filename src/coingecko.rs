//! CoinGecko-backed price source.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::errors::FetchError;
use crate::network::NetworkId;
use crate::source::PriceSource;
use crate::usd::UsdPrice;

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Response entry of the `simple/price` endpoint: `{ <id>: { "usd": <price> } }`.
#[derive(Debug, Deserialize)]
struct PriceEntry {
    usd: Option<f64>,
}

/// [`PriceSource`] implementation against the CoinGecko simple-price API.
///
/// The network's native token is mapped to its market-data identifier
/// (`ethereum`, `matic-network`, `binancecoin`) and looked up in a single
/// unauthenticated GET per poll.
#[derive(Debug, Clone)]
pub struct CoinGeckoPriceSource {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoPriceSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the source at a different API base, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for CoinGeckoPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for CoinGeckoPriceSource {
    async fn fetch_token_price(&self, network: NetworkId) -> Result<UsdPrice, FetchError> {
        let token_id = network.coingecko_id();
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd",
            self.base_url, token_id
        );
        let operation = format!("token price fetch for {network}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| FetchError::network(operation, e))?;

        // A successful status with an undecodable or incomplete body is a
        // malformed response, not a transport failure.
        let body: HashMap<String, PriceEntry> = response
            .json()
            .await
            .map_err(|_| FetchError::malformed(token_id))?;

        let price = body
            .get(token_id)
            .and_then(|entry| entry.usd)
            .ok_or_else(|| FetchError::malformed(format!("{token_id}.usd")))?;

        debug!(%network, token_id, price, "fetched token price");
        Ok(UsdPrice::new(price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_entry_decodes_simple_price_shape() {
        let body = r#"{"ethereum":{"usd":1987.34}}"#;
        let parsed: HashMap<String, PriceEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed["ethereum"].usd, Some(1987.34));
    }

    #[test]
    fn missing_usd_field_is_detectable() {
        let body = r#"{"ethereum":{}}"#;
        let parsed: HashMap<String, PriceEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed["ethereum"].usd, None);
    }
}
