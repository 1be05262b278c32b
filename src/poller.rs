//! Recurring poll task with an explicit start/stop contract.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::monitor::GasMonitor;

/// Spawner for the recurring poll task.
pub struct Poller;

impl Poller {
    /// Start polling `monitor` at `interval`, returning the task's handle.
    ///
    /// The first poll fires immediately, subsequent ones on the cadence. The
    /// task runs until [`PollerHandle::stop`] is called or the handle is
    /// dropped; either way cancellation is guaranteed, including on error
    /// and early-return paths in the caller.
    pub fn spawn(monitor: Arc<GasMonitor>, interval: Duration) -> PollerHandle {
        info!(interval_secs = interval.as_secs(), "starting poll task");
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // A tick delayed by a slow cycle must not cause a burst of
            // catch-up polls afterwards.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                monitor.poll().await;
            }
        });
        PollerHandle { handle }
    }
}

/// Handle to a running poll task. Aborts the task on drop.
pub struct PollerHandle {
    handle: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop the poll task. Idempotent.
    pub fn stop(&self) {
        debug!("stopping poll task");
        self.handle.abort();
    }

    /// Whether the task is still running.
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
