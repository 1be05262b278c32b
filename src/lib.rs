//! Multi-chain gas fee monitoring engine.
//!
//! gweisense periodically queries fee data for one of several EVM networks,
//! normalizes wei values into gwei, keeps a rolling fee history, estimates
//! transaction costs in native token and USD, and emits an event when the
//! effective fee drops below a user-defined threshold.
//!
//! The crate is the engine only: any UI subscribes to
//! [`MonitorEvent`]s and renders [`MonitorState`] snapshots.

mod coingecko;
mod config;
mod errors;
mod estimate;
mod fees;
mod monitor;
mod network;
mod poller;
mod rpc;
mod source;
mod units;
mod usd;

pub use coingecko::*;
pub use config::*;
pub use errors::*;
pub use estimate::*;
pub use fees::*;
pub use monitor::*;
pub use network::*;
pub use poller::*;
pub use rpc::*;
pub use source::*;
pub use units::*;
pub use usd::*;
