//! Arbitrage detector - binary entry point.

use std::sync::Arc;

use aud_arb::sink::{CsvSink, Sink, TeeSink};
use aud_arb::{Dispatcher, RuntimeConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("🚀 Starting arbitrage detector...");

    let config = match std::path::PathBuf::from("config.toml").exists() {
        true => RuntimeConfig::load("config.toml")?,
        false => {
            tracing::warn!("no config.toml found, using defaults");
            RuntimeConfig::default()
        }
    };

    let fees = match std::path::PathBuf::from("fees.toml").exists() {
        true => aud_arb::fees::FeeTable::load("fees.toml")?,
        false => {
            tracing::warn!("no fees.toml found, using the safe default taker fee for every exchange");
            aud_arb::fees::FeeTable::default()
        }
    };

    let csv_sink: Arc<CsvSink> = Arc::new(CsvSink::open_dir("out")?);
    let csv_sink_as_sink: Arc<dyn Sink> = csv_sink.clone();
    let broadcast_sink: Arc<dyn Sink> = Arc::new(aud_arb::sink::BroadcastSink::new());
    let sink: Arc<dyn Sink> = Arc::new(TeeSink::new(vec![csv_sink_as_sink, broadcast_sink]));

    let _dispatcher = Dispatcher::new(config.clone(), fees, sink).with_tob_sink(csv_sink);

    tracing::info!(
        min_profit_bps = %config.min_profit_bps_after_fees,
        min_confidence = config.min_confidence,
        "detector configured"
    );

    #[cfg(feature = "live-adapters")]
    {
        tracing::info!("live-adapters feature enabled, but no adapters wired up by default; see aud_arb::adapter::RestPollAdapter");
    }
    #[cfg(not(feature = "live-adapters"))]
    {
        tracing::warn!("built without the live-adapters feature: no market-data source is wired up");
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("🛑 Shutting down...");

    Ok(())
}
