//! Traderbot - Entry Point
//!
//! Serves the signal/order HTTP surface and runs the periodic symbol scan.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Traderbot signal and order-dispatch service
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via TRADERBOT_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize TLS crypto provider (must be before any WS connections)
    traderbot_ws::init_crypto();

    let args = Args::parse();

    traderbot_telemetry::init_logging()?;

    info!("Starting traderbot v{}", env!("CARGO_PKG_VERSION"));

    // CLI arg > TRADERBOT_CONFIG > config/default.toml > built-in defaults
    let config_path = args
        .config
        .or_else(|| std::env::var("TRADERBOT_CONFIG").ok());
    info!(config_path = ?config_path, "Loading configuration");

    let config = traderbot_bot::AppConfig::load(config_path.as_deref())?;
    info!(
        port = config.server.port,
        ws_url = %config.deriv.ws_url,
        scheduler = config.scheduler.enabled,
        "Configuration loaded"
    );

    let app = traderbot_bot::Application::new(config)?;
    app.run().await?;

    Ok(())
}
