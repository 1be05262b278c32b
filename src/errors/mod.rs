//! Error types for the gweisense engine.
//!
//! The taxonomy is deliberately small: a fetch either failed in transport
//! ([`FetchError::Network`]) or came back without the fields we need
//! ([`FetchError::Malformed`]). Both are non-fatal to the engine: they are
//! reported through the event channel and the prior state is left untouched.
//!
//! Unparseable user input (threshold, gas limit) is not an error at all; it
//! is absorbed locally and stored as absent.

/// Errors from a fee or price fetch.
///
/// # Examples
///
/// ```
/// use gweisense::FetchError;
///
/// let error = FetchError::malformed("baseFeePerGas");
/// assert!(error.is_malformed());
/// println!("{error}");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport or connectivity failure.
    ///
    /// Covers connection refusals, DNS failures, timeouts imposed by the
    /// HTTP client, and provider-side errors. Retrying is the caller's
    /// responsibility via the next poll cycle.
    #[error("network failure during {operation}")]
    Network {
        /// Description of the request that failed (e.g. "fee data fetch for Ethereum")
        operation: String,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Response arrived but is missing an expected field.
    #[error("malformed response: missing {field}")]
    Malformed {
        /// The field that was absent
        field: String,
    },
}

impl FetchError {
    /// Helper to create a `Network` error from any error type.
    pub fn network(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        FetchError::Network {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `Malformed` error for a missing field.
    pub fn malformed(field: impl Into<String>) -> Self {
        FetchError::Malformed {
            field: field.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, FetchError::Malformed { .. })
    }
}
