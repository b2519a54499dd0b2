//! Validator participation scoring job.
//!
//! Scores every validator that signed at least one block in the configured
//! range, writes the CSV report and prints the table to stdout. Exits
//! non-zero when any validator had to be left out of the report.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use uptime_runtime::{
    init_telemetry, Overrides, RuntimeConfig, TelemetryConfig, UptimeRuntime, DEFAULT_CONFIG_PATH,
};

/// Validator participation scoring for testnet reward rounds
#[derive(Parser, Debug)]
#[command(name = "uptime-score")]
#[command(about = "Score validator uptime, upgrade and governance participation")]
struct Args {
    /// TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// First block height of the scored range
    #[arg(long)]
    start_block: Option<u64>,

    /// Last block height of the scored range
    #[arg(long)]
    end_block: Option<u64>,

    /// Chain snapshot file
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// CSV report path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the aggregation pipeline document and exit
    #[arg(long)]
    print_pipeline: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            start_block: self.start_block,
            end_block: self.end_block,
            snapshot: self.snapshot.clone(),
            csv_path: self.output.clone(),
            bonus_address: None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_telemetry(&TelemetryConfig::from_env()).context("Failed to initialize logging")?;

    // Load configuration
    let overrides = Overrides::from_env().merge(args.overrides());
    let config = RuntimeConfig::load(&args.config, overrides)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;

    let runtime = UptimeRuntime::new(config);

    if args.print_pipeline {
        let stdout = std::io::stdout();
        return runtime.write_pipeline(&mut stdout.lock());
    }

    let summary = runtime.run().await?;
    info!(
        validators = summary.validators,
        csv = %runtime.config().csv_path.display(),
        "Report written"
    );

    if !summary.is_complete() {
        bail!(
            "{} validator(s) left out of the report due to invalid data",
            summary.violations
        );
    }

    Ok(())
}
