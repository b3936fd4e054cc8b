use anyhow::Result;
use statwatch_core::engine::WatchEngine;
use statwatch_core::thresholds::CHECK_INTERVAL;
use tokio::signal;
use tokio::time::interval;
use tracing_subscriber::EnvFilter;

use statwatch_agent::source::{HttpStatsSource, STATS_URL};

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries only the warning lines.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("statwatch=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        url = STATS_URL,
        interval_secs = CHECK_INTERVAL.as_secs(),
        "statwatch-agent starting"
    );

    let mut source = HttpStatsSource::new();
    let mut engine = WatchEngine::new();
    let mut check_interval = interval(CHECK_INTERVAL);

    loop {
        tokio::select! {
            _ = check_interval.tick() => {
                for notice in engine.poll(&mut source).await {
                    println!("{notice}");
                }
            }
            _ = signal::ctrl_c() => {
                tracing::info!("Shutting down gracefully");
                break;
            }
        }
    }

    Ok(())
}
