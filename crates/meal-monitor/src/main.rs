//! # Meal Monitor Server
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`MEAL_LOG_LEVEL` / `RUST_LOG`, `MEAL_JSON_LOGS`)
//! 2. Load configuration from defaults + `MEAL_*` environment overrides
//! 3. Bind and serve until Ctrl+C

use anyhow::{Context, Result};
use tracing::info;

use meal_monitor::telemetry::{init_tracing, TelemetryConfig};
use meal_monitor::{MonitorConfig, MonitorService, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(&TelemetryConfig::from_env()).context("Failed to initialize logging")?;

    let config = MonitorConfig::from_env().context("Failed to load configuration")?;

    info!(version = VERSION, addr = %config.http_addr(), "Meal monitor starting");

    let service = MonitorService::new(config).context("Invalid configuration")?;
    service.start().await.context("Meal monitor server failed")?;

    Ok(())
}
