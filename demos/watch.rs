//! Watch live gas fees from the terminal.
//!
//! ```sh
//! ANKR_API_KEY=... cargo run --example watch
//! ```

use std::sync::Arc;
use std::time::Duration;

use gweisense::{GasLimitPreset, GasMonitor, MonitorConfig, NetworkId, Poller};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gweisense=info".into()),
        )
        .init();

    let monitor = Arc::new(GasMonitor::with_default_sources(MonitorConfig::from_env()));
    monitor.set_threshold("25");
    monitor.set_gas_limit_preset(GasLimitPreset::NativeTransfer);

    // Print engine events as they arrive.
    let mut events = monitor.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            println!("event: {event:?}");
        }
    });

    let _poller = Poller::spawn(monitor.clone(), Duration::from_secs(60));

    // Report a few cycles, then switch networks to show the reset.
    for cycle in 0..3u32 {
        tokio::time::sleep(Duration::from_secs(61)).await;
        print_state(&monitor);
        if cycle == 1 {
            println!("-- switching to Polygon --");
            monitor.select_network(NetworkId::Polygon).await;
        }
    }

    Ok(())
}

fn print_state(monitor: &GasMonitor) {
    let state = monitor.state();
    match state.current_fee {
        Some(fee) => println!(
            "{}: base {:.2} / priority {:.2} / effective {:.2} gwei ({} samples)",
            state.selected_network,
            fee.base_fee,
            fee.priority_fee,
            fee.effective_fee,
            state.history.len(),
        ),
        None => println!("{}: no fee data yet", state.selected_network),
    }
    if let Some(estimate) = monitor.estimate_cost() {
        println!(
            "  transfer cost: {} (~{})",
            estimate.native_display(),
            estimate.fiat_display()
        );
    }
}
