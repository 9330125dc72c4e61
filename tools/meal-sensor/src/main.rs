//! meal-sensor: feeds analog samples into the meal detector and reports
//! detected start/end transitions to a meal-monitor server.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::info;

use meal_sensor::sensor::{DetectorConfig, EventSink, HttpReporter, MealDetector};
use meal_monitor::telemetry::{init_tracing, TelemetryConfig};
use meal_sensor::feed;

/// Meal sensor feeder
#[derive(Parser, Debug)]
#[command(name = "meal-sensor")]
#[command(about = "Detect meal start/end from raw sensor samples and report to meal-monitor")]
struct Args {
    /// Base URL of the meal-monitor server
    #[arg(short, long, default_value = "http://127.0.0.1:50000")]
    server: String,

    /// Sample at or above this value starts a meal
    #[arg(long, default_value_t = 3000)]
    start_threshold: u16,

    /// Sample below this value ends a meal
    #[arg(long, default_value_t = 2000)]
    end_threshold: u16,

    /// File with one sample per line (stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Detect only, do not contact the server
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&TelemetryConfig::from_env()).context("Failed to initialize logging")?;

    let mut detector = MealDetector::new(DetectorConfig {
        start_threshold: args.start_threshold,
        end_threshold: args.end_threshold,
    })
    .context("Invalid detector thresholds")?;

    let reporter = if args.dry_run {
        None
    } else {
        Some(
            HttpReporter::with_timeout(&args.server, std::time::Duration::from_secs(args.timeout))
                .context("Failed to create HTTP client")?,
        )
    };

    let input: Box<dyn AsyncBufRead + Unpin + Send> = match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let thresholds = detector.config();
    info!(
        server = %args.server,
        start_threshold = thresholds.start_threshold,
        end_threshold = thresholds.end_threshold,
        dry_run = args.dry_run,
        "Reading sensor samples"
    );

    let summary = feed(
        input,
        &mut detector,
        reporter.as_ref().map(|r| r as &dyn EventSink),
    )
    .await
    .context("Failed to read samples")?;

    info!(
        samples = summary.samples,
        skipped = summary.skipped,
        reported = summary.reported,
        failed = summary.failed,
        "Done"
    );

    Ok(())
}
