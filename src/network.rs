//! Supported networks and their endpoint mappings.
//!
//! Each [`NetworkId`] maps to exactly one RPC endpoint template and one
//! market-data token identifier. The set is closed and fixed at compile time.

use alloy_chains::NamedChain;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A network the monitor can poll.
///
/// # Examples
///
/// ```
/// use gweisense::NetworkId;
///
/// assert_eq!(NetworkId::Polygon.coingecko_id(), "matic-network");
/// assert_eq!(NetworkId::Bsc.native_symbol(), "BNB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    Ethereum,
    Polygon,
    Bsc,
}

impl NetworkId {
    /// All supported networks, in display order.
    pub const ALL: [NetworkId; 3] = [NetworkId::Ethereum, NetworkId::Polygon, NetworkId::Bsc];

    /// The chain this network corresponds to.
    pub fn chain(&self) -> NamedChain {
        match self {
            NetworkId::Ethereum => NamedChain::Mainnet,
            NetworkId::Polygon => NamedChain::Polygon,
            NetworkId::Bsc => NamedChain::BinanceSmartChain,
        }
    }

    /// Numeric chain id (1, 137, 56).
    pub fn chain_id(&self) -> u64 {
        self.chain() as u64
    }

    /// Path segment of the Ankr RPC endpoint for this network.
    pub fn rpc_slug(&self) -> &'static str {
        match self {
            NetworkId::Ethereum => "eth",
            NetworkId::Polygon => "polygon",
            NetworkId::Bsc => "bsc",
        }
    }

    /// Full RPC endpoint URL, with the API key appended when one is set.
    ///
    /// Without a key this falls back to the public endpoint, which is rate
    /// limited but functional. An invalid or expired key surfaces later as a
    /// fetch failure, never as a construction error.
    pub fn rpc_url(&self, api_key: Option<&str>) -> String {
        match api_key {
            Some(key) if !key.is_empty() => {
                format!("https://rpc.ankr.com/{}/{}", self.rpc_slug(), key)
            }
            _ => format!("https://rpc.ankr.com/{}", self.rpc_slug()),
        }
    }

    /// Market-data token identifier for this network's native token.
    pub fn coingecko_id(&self) -> &'static str {
        match self {
            NetworkId::Ethereum => "ethereum",
            NetworkId::Polygon => "matic-network",
            NetworkId::Bsc => "binancecoin",
        }
    }

    /// Ticker symbol of the native token, for display.
    pub fn native_symbol(&self) -> &'static str {
        match self {
            NetworkId::Ethereum => "ETH",
            NetworkId::Polygon => "MATIC",
            NetworkId::Bsc => "BNB",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NetworkId::Ethereum => "Ethereum",
            NetworkId::Polygon => "Polygon",
            NetworkId::Bsc => "BNB Smart Chain",
        };
        f.write_str(name)
    }
}
