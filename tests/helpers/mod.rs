// Not every test binary exercises every helper.
#![allow(dead_code)]

//! Test helpers for gweisense integration tests.
//!
//! Provides mock fee and price sources so the monitor's polling, threshold,
//! and race behavior can be driven without any network access.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use gweisense::{
    FeeSource, FetchError, NetworkId, PriceSource, RawFeeData, UsdPrice, WeiAmount,
};

/// Build wei-denominated fee data whose effective fee is `gwei` gwei.
pub fn raw_fee(gwei: f64) -> RawFeeData {
    let effective = (gwei * 1e9) as u64;
    RawFeeData {
        base_fee: WeiAmount::from(effective.saturating_sub(2_000_000_000)),
        priority_fee: WeiAmount::from(2_000_000_000u64),
        effective_fee: WeiAmount::from(effective),
    }
}

/// A scripted fetch outcome.
pub enum MockOutcome<T> {
    Ok(T),
    NetworkError,
    MalformedError,
}

impl<T: Clone> MockOutcome<T> {
    fn to_result(&self, operation: &str) -> Result<T, FetchError> {
        match self {
            MockOutcome::Ok(value) => Ok(value.clone()),
            MockOutcome::NetworkError => Err(FetchError::network(
                operation,
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "mock refusal"),
            )),
            MockOutcome::MalformedError => Err(FetchError::malformed("mock field")),
        }
    }
}

struct MockCore<T> {
    script: Mutex<VecDeque<MockOutcome<T>>>,
    fallback: MockOutcome<T>,
    calls: AtomicUsize,
    networks_seen: Mutex<Vec<NetworkId>>,
    gate: Option<Arc<Notify>>,
}

impl<T: Clone> MockCore<T> {
    fn new(fallback: MockOutcome<T>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicUsize::new(0),
            networks_seen: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    async fn fetch(&self, network: NetworkId, operation: &str) -> Result<T, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.networks_seen.lock().unwrap().push(network);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(outcome) => outcome.to_result(operation),
            None => self.fallback.to_result(operation),
        }
    }
}

/// Mock [`FeeSource`] with a scripted response queue.
///
/// Scripted outcomes are consumed in order; once exhausted, every further
/// fetch returns the fallback (a 30 gwei effective fee unless overridden).
/// An optional gate holds each fetch in flight until notified, for
/// re-entrancy and mid-flight network-switch tests.
pub struct MockFeeSource {
    core: MockCore<RawFeeData>,
}

impl MockFeeSource {
    pub fn new() -> Self {
        Self::with_fallback_fee(30.0)
    }

    pub fn with_fallback_fee(gwei: f64) -> Self {
        Self {
            core: MockCore::new(MockOutcome::Ok(raw_fee(gwei))),
        }
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.core.gate = Some(gate);
        self
    }

    pub fn enqueue_fee(&self, gwei: f64) {
        self.core
            .script
            .lock()
            .unwrap()
            .push_back(MockOutcome::Ok(raw_fee(gwei)));
    }

    pub fn enqueue_network_error(&self) {
        self.core
            .script
            .lock()
            .unwrap()
            .push_back(MockOutcome::NetworkError);
    }

    pub fn calls(&self) -> usize {
        self.core.calls.load(Ordering::SeqCst)
    }

    pub fn networks_seen(&self) -> Vec<NetworkId> {
        self.core.networks_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeeSource for MockFeeSource {
    async fn fetch_fee_data(&self, network: NetworkId) -> Result<RawFeeData, FetchError> {
        self.core.fetch(network, "mock fee fetch").await
    }
}

/// Mock [`PriceSource`] with the same scripting as [`MockFeeSource`].
pub struct MockPriceSource {
    core: MockCore<UsdPrice>,
}

impl MockPriceSource {
    pub fn new() -> Self {
        Self::with_fallback_price(2000.0)
    }

    pub fn with_fallback_price(usd: f64) -> Self {
        Self {
            core: MockCore::new(MockOutcome::Ok(UsdPrice::new(usd))),
        }
    }

    pub fn enqueue_network_error(&self) {
        self.core
            .script
            .lock()
            .unwrap()
            .push_back(MockOutcome::NetworkError);
    }

    pub fn calls(&self) -> usize {
        self.core.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn fetch_token_price(&self, network: NetworkId) -> Result<UsdPrice, FetchError> {
        self.core.fetch(network, "mock price fetch").await
    }
}
