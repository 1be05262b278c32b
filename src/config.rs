//! Monitor configuration.
//!
//! # Example: Using defaults
//!
//! ```
//! use gweisense::MonitorConfig;
//!
//! // Ethereum, 60-second cadence, unbounded history, no API key
//! let config = MonitorConfig::default();
//! ```
//!
//! # Example: Custom configuration
//!
//! ```
//! use gweisense::{MonitorConfig, MonitorConfigBuilder, NetworkId};
//! use std::time::Duration;
//!
//! let config = MonitorConfigBuilder::with_defaults()
//!     .initial_network(NetworkId::Polygon)
//!     .poll_interval(Duration::from_secs(30))
//!     .history_capacity(720) // keep 12 hours at 60s cadence
//!     .build();
//! ```

use std::time::Duration;

use crate::network::NetworkId;

/// Environment variable holding the RPC API key.
pub const API_KEY_ENV: &str = "ANKR_API_KEY";

/// Default polling cadence.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Configuration for a [`GasMonitor`](crate::GasMonitor) and its poller.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// RPC endpoint API key. Absent keys degrade to public endpoints and,
    /// at worst, fetch failures; they never abort construction.
    pub api_key: Option<String>,

    /// Cadence of the recurring poll task.
    /// Default: 60 seconds
    pub poll_interval: Duration,

    /// Network selected when the monitor starts.
    /// Default: Ethereum
    pub initial_network: NetworkId,

    /// Maximum number of history points to retain, oldest evicted first.
    /// Default: None (unbounded)
    pub history_capacity: Option<usize>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            initial_network: NetworkId::Ethereum,
            history_capacity: None,
        }
    }
}

impl MonitorConfig {
    /// Build a configuration from the environment.
    ///
    /// Reads [`API_KEY_ENV`]; an unset or empty variable leaves the key
    /// absent rather than failing.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty());
        Self {
            api_key,
            ..Self::default()
        }
    }
}

/// Fluent builder for [`MonitorConfig`].
#[derive(Debug, Clone, Default)]
pub struct MonitorConfigBuilder {
    config: MonitorConfig,
}

impl MonitorConfigBuilder {
    /// Start from the default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    pub fn initial_network(mut self, network: NetworkId) -> Self {
        self.config.initial_network = network;
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = Some(capacity);
        self
    }

    pub fn build(self) -> MonitorConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = MonitorConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.initial_network, NetworkId::Ethereum);
        assert!(config.api_key.is_none());
        assert!(config.history_capacity.is_none());
    }

    #[test]
    fn builder_overrides_fields() {
        let config = MonitorConfigBuilder::with_defaults()
            .api_key("key")
            .poll_interval(Duration::from_secs(10))
            .initial_network(NetworkId::Bsc)
            .history_capacity(100)
            .build();
        assert_eq!(config.api_key.as_deref(), Some("key"));
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.initial_network, NetworkId::Bsc);
        assert_eq!(config.history_capacity, Some(100));
    }
}
