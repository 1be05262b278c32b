//! The polling/estimation engine.
//!
//! [`GasMonitor`] owns the current network selection, the latest fee
//! snapshot, the fee history, the user's threshold and gas limit, and drives
//! the fee and price sources on each poll cycle. A UI layer reads state via
//! [`GasMonitor::state`] and listens for [`MonitorEvent`]s via
//! [`GasMonitor::subscribe`]; it never mutates engine state directly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, trace, warn};

use crate::coingecko::CoinGeckoPriceSource;
use crate::config::MonitorConfig;
use crate::errors::FetchError;
use crate::estimate::{CostEstimate, GasLimitPreset};
use crate::fees::{FeeSnapshot, HistoryPoint, HistorySeries, RawFeeData};
use crate::network::NetworkId;
use crate::rpc::RpcFeeSource;
use crate::source::{FeeSource, PriceSource};
use crate::usd::UsdPrice;

/// Which source a failed fetch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailedSource {
    Fee,
    Price,
}

/// Events the engine signals outward.
///
/// The engine never renders anything itself; subscribers decide how to
/// display these (toast, banner, log line).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MonitorEvent {
    /// The effective fee dropped below the user's threshold on this poll.
    ///
    /// Raised once per qualifying poll cycle with no suppression window;
    /// consecutive qualifying cycles re-alert.
    ThresholdCrossed {
        network: NetworkId,
        /// Effective fee in gwei that triggered the alert.
        current_fee: f64,
        /// The user's threshold in gwei.
        threshold: f64,
    },

    /// A fee or price fetch failed; prior state was left untouched.
    FetchFailed {
        source: FailedSource,
        network: NetworkId,
    },
}

/// Read-only snapshot of the engine's state.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorState {
    pub selected_network: NetworkId,
    /// Absent before the first successful poll.
    pub current_fee: Option<FeeSnapshot>,
    pub history: HistorySeries,
    /// Absent before the first successful price fetch.
    pub token_price_usd: Option<UsdPrice>,
    /// User threshold in gwei; absent when unset or unparseable.
    pub threshold_gwei: Option<f64>,
    /// User gas limit; absent when unset or unparseable.
    pub gas_limit: Option<u64>,
    /// Whether a poll cycle is currently in flight.
    pub is_loading: bool,
}

/// Mutable state slices guarded by the monitor's mutex.
///
/// The lock is only ever held for plain field updates, never across an
/// await point.
#[derive(Debug)]
struct Inner {
    selected_network: NetworkId,
    current_fee: Option<FeeSnapshot>,
    history: HistorySeries,
    token_price_usd: Option<UsdPrice>,
    threshold_gwei: Option<f64>,
    gas_limit: Option<u64>,
}

/// The gas-fee monitoring engine.
///
/// # Concurrency
///
/// A single `is_loading` flag gates poll re-entrancy: a `poll()` issued
/// while one is outstanding is dropped, not queued. Within one cycle the fee
/// and price fetches run concurrently and complete in either order; each
/// completion updates only its own slice of state, so the updates commute.
/// The target network is captured when the cycle starts, and a completion
/// whose network no longer matches the selection is discarded, so a poll
/// racing a network switch can never publish stale data against the new
/// network.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use gweisense::{GasMonitor, MonitorConfig, NetworkId};
///
/// let monitor = Arc::new(GasMonitor::with_default_sources(MonitorConfig::from_env()));
/// let mut events = monitor.subscribe();
///
/// monitor.set_threshold("25");
/// monitor.set_gas_limit("21000");
/// monitor.poll().await;
///
/// if let Some(estimate) = monitor.estimate_cost() {
///     println!("{} ({})", estimate.native_display(), estimate.fiat_display());
/// }
/// ```
pub struct GasMonitor {
    fee_source: Arc<dyn FeeSource>,
    price_source: Arc<dyn PriceSource>,
    inner: Mutex<Inner>,
    is_loading: AtomicBool,
    events: broadcast::Sender<MonitorEvent>,
    history_capacity: Option<usize>,
}

impl GasMonitor {
    /// Create a monitor over explicit sources.
    pub fn new(
        config: MonitorConfig,
        fee_source: Arc<dyn FeeSource>,
        price_source: Arc<dyn PriceSource>,
    ) -> Self {
        let history = match config.history_capacity {
            Some(cap) => HistorySeries::with_capacity(cap),
            None => HistorySeries::new(),
        };
        let (events, _) = broadcast::channel(32);
        Self {
            fee_source,
            price_source,
            inner: Mutex::new(Inner {
                selected_network: config.initial_network,
                current_fee: None,
                history,
                token_price_usd: None,
                threshold_gwei: None,
                gas_limit: None,
            }),
            is_loading: AtomicBool::new(false),
            events,
            history_capacity: config.history_capacity,
        }
    }

    /// Create a monitor over the production sources: Ankr RPC for fees,
    /// CoinGecko for prices.
    pub fn with_default_sources(config: MonitorConfig) -> Self {
        let fee_source = Arc::new(RpcFeeSource::new(config.api_key.clone()));
        let price_source = Arc::new(CoinGeckoPriceSource::new());
        Self::new(config, fee_source, price_source)
    }

    /// Subscribe to engine events.
    ///
    /// Each receiver gets every event emitted after subscription; slow
    /// receivers may observe lag on the broadcast channel.
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.events.subscribe()
    }

    /// The currently selected network.
    pub fn selected_network(&self) -> NetworkId {
        self.lock().selected_network
    }

    /// Whether a poll cycle is in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::SeqCst)
    }

    /// Cloned snapshot of the full engine state.
    pub fn state(&self) -> MonitorState {
        let inner = self.lock();
        MonitorState {
            selected_network: inner.selected_network,
            current_fee: inner.current_fee,
            history: inner.history.clone(),
            token_price_usd: inner.token_price_usd,
            threshold_gwei: inner.threshold_gwei,
            gas_limit: inner.gas_limit,
            is_loading: self.is_loading(),
        }
    }

    /// Switch to `network` and poll it immediately.
    ///
    /// Stale data must not be shown against the new network, so the current
    /// fee, history, and token price are reset before the poll. A no-op when
    /// `network` is already selected.
    pub async fn select_network(&self, network: NetworkId) {
        {
            let mut inner = self.lock();
            if inner.selected_network == network {
                return;
            }
            info!(from = %inner.selected_network, to = %network, "switching network");
            inner.selected_network = network;
            inner.current_fee = None;
            inner.token_price_usd = None;
            inner.history = match self.history_capacity {
                Some(cap) => HistorySeries::with_capacity(cap),
                None => HistorySeries::new(),
            };
        }
        self.poll().await;
    }

    /// Set the alert threshold from user input, in gwei.
    ///
    /// Input that does not parse as a positive number stores as absent;
    /// this is never surfaced as an error.
    pub fn set_threshold(&self, input: &str) {
        let parsed = parse_positive_decimal(input);
        self.lock().threshold_gwei = parsed;
        trace!(?parsed, "threshold updated");
    }

    /// Set the gas limit from user input. Same parsing contract as
    /// [`set_threshold`](Self::set_threshold); used only for cost
    /// estimation.
    pub fn set_gas_limit(&self, input: &str) {
        let parsed = parse_positive_integer(input);
        self.lock().gas_limit = parsed;
        trace!(?parsed, "gas limit updated");
    }

    /// Set the gas limit from a preset.
    pub fn set_gas_limit_preset(&self, preset: GasLimitPreset) {
        self.lock().gas_limit = Some(preset.gas_limit());
    }

    /// Run one poll cycle: fetch fee data and token price concurrently and
    /// fold the results into state.
    ///
    /// A no-op when a cycle is already in flight (the request is dropped,
    /// not queued). Failures leave the corresponding state slice untouched
    /// and emit a [`MonitorEvent::FetchFailed`]; the next scheduled tick or
    /// manual refresh retries.
    pub async fn poll(&self) {
        if self.is_loading.swap(true, Ordering::SeqCst) {
            trace!("poll already in flight, dropping request");
            return;
        }

        let network = self.selected_network();
        trace!(%network, "poll cycle started");

        let (fee_result, price_result) = futures::future::join(
            self.fee_source.fetch_fee_data(network),
            self.price_source.fetch_token_price(network),
        )
        .await;

        self.apply_fee_result(network, fee_result);
        self.apply_price_result(network, price_result);

        self.is_loading.store(false, Ordering::SeqCst);
    }

    /// Estimated cost of a transaction at the current state.
    ///
    /// `None` unless the gas limit, a fee snapshot, and a token price are
    /// all present.
    pub fn estimate_cost(&self) -> Option<CostEstimate> {
        let inner = self.lock();
        let gas_limit = inner.gas_limit?;
        let fee = inner.current_fee?;
        let price = inner.token_price_usd?;
        Some(CostEstimate::compute(
            inner.selected_network,
            gas_limit,
            fee.effective_fee,
            price,
        ))
    }

    fn apply_fee_result(&self, network: NetworkId, result: Result<RawFeeData, FetchError>) {
        let event = {
            let mut inner = self.lock();
            if inner.selected_network != network {
                trace!(%network, now = %inner.selected_network, "discarding fee result for unselected network");
                return;
            }
            match result {
                Ok(raw) => {
                    let snapshot = raw.to_snapshot();
                    inner.current_fee = Some(snapshot);
                    inner.history.push(HistoryPoint::now(snapshot.effective_fee));
                    info!(
                        %network,
                        effective_fee = snapshot.effective_fee,
                        "fee snapshot updated"
                    );
                    match inner.threshold_gwei {
                        Some(threshold) if snapshot.effective_fee < threshold => {
                            Some(MonitorEvent::ThresholdCrossed {
                                network,
                                current_fee: snapshot.effective_fee,
                                threshold,
                            })
                        }
                        _ => None,
                    }
                }
                Err(error) => {
                    // Stale-but-present beats blanking the display.
                    warn!(%network, %error, "fee fetch failed, keeping previous snapshot");
                    Some(MonitorEvent::FetchFailed {
                        source: FailedSource::Fee,
                        network,
                    })
                }
            }
        };
        if let Some(event) = event {
            self.emit(event);
        }
    }

    fn apply_price_result(&self, network: NetworkId, result: Result<UsdPrice, FetchError>) {
        let event = {
            let mut inner = self.lock();
            if inner.selected_network != network {
                trace!(%network, now = %inner.selected_network, "discarding price result for unselected network");
                return;
            }
            match result {
                Ok(price) => {
                    inner.token_price_usd = Some(price);
                    info!(%network, price = price.as_f64(), "token price updated");
                    None
                }
                Err(error) => {
                    warn!(%network, %error, "price fetch failed, keeping previous price");
                    Some(MonitorEvent::FetchFailed {
                        source: FailedSource::Price,
                        network,
                    })
                }
            }
        };
        if let Some(event) = event {
            self.emit(event);
        }
    }

    fn emit(&self, event: MonitorEvent) {
        if self.events.send(event).is_err() {
            trace!("no event subscribers");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Lock poisoning only happens if a holder panicked mid-update; the
        // state is still plain data, so continue with it.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Parse user input as a positive decimal, absorbing failures.
fn parse_positive_decimal(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Parse user input as a positive integer, absorbing failures.
fn parse_positive_integer(input: &str) -> Option<u64> {
    input.trim().parse::<u64>().ok().filter(|v| *v > 0)
}
