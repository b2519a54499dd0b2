//! # Uptime Runtime
//!
//! Wires the scoring engine to its data source and report outputs.
//!
//! ## Run Sequence
//!
//! 1. Load configuration (file, then environment, then command line)
//! 2. Open the chain snapshot
//! 3. Score every validator active in the range
//! 4. Write the CSV report
//! 5. Print the score table to stdout
//! 6. Log a summary
//!
//! Validators whose data violates a scoring invariant are left out of both
//! outputs and counted in `RunSummary::violations`.
//!
//! ```text
//! uptime.toml ─→ RuntimeConfig ─→ ScoringService ─→ Vec<ValidatorScore>
//!                                      │                  │
//!                              SnapshotQueryService       ├──→ result.csv
//!                                                         └──→ stdout table
//! ```

pub mod config;
pub mod telemetry;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use uptime_scoring::{
    AggregationPipeline, QueryService, ScoringApi, ScoringRun, ScoringService,
    SnapshotQueryService,
};

pub use config::{ConfigError, Overrides, RuntimeConfig, DEFAULT_CONFIG_PATH};
pub use telemetry::{init_telemetry, TelemetryConfig, TelemetryError};

/// Outcome of one scoring run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Validators written to the report
    pub validators: usize,
    /// Display address and total of the highest scorer
    pub top: Option<(String, f64)>,
    /// Validators left out because their data violates a scoring invariant
    pub violations: usize,
}

impl RunSummary {
    fn from_run(run: &ScoringRun) -> Self {
        let top = run
            .scores
            .iter()
            .max_by(|a, b| a.total().total_cmp(&b.total()))
            .map(|s| (s.display_address().into_owned(), s.total()));

        Self {
            validators: run.scores.len(),
            top,
            violations: run.violations.len(),
        }
    }

    /// Whether every validator in range made it into the report.
    pub fn is_complete(&self) -> bool {
        self.violations == 0
    }
}

/// The scoring job.
pub struct UptimeRuntime {
    config: RuntimeConfig,
}

impl UptimeRuntime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Open the configured snapshot and run against it, printing the
    /// table to stdout.
    pub async fn run(&self) -> Result<RunSummary> {
        let query = SnapshotQueryService::open(&self.config.snapshot)
            .context("Failed to open chain snapshot")?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with(Arc::new(query), &mut out).await
    }

    /// Score with the given data source, write the CSV, then the table to
    /// `out`.
    ///
    /// Invalid validator data does not fail the run; check
    /// `RunSummary::is_complete`.
    pub async fn run_with<Q, W>(&self, query: Arc<Q>, out: &mut W) -> Result<RunSummary>
    where
        Q: QueryService,
        W: Write,
    {
        let scoring = &self.config.scoring;
        info!(
            range = %scoring.range,
            snapshot = %self.config.snapshot.display(),
            "Starting scoring run"
        );
        for policy in &scoring.upgrades {
            info!(
                upgrade = %policy.window.name,
                start = policy.window.start,
                end = policy.window.end,
                base_score = policy.base_score,
                penalty = policy.penalty_per_block,
                "Upgrade window"
            );
        }

        let service = ScoringService::new(scoring.clone(), query);
        let run = service
            .score_validators()
            .await
            .context("Scoring run failed")?;

        uptime_report::write_csv(&self.config.csv_path, &run.scores)
            .context("Failed to write CSV report")?;
        uptime_report::write_table(out, &run.scores).context("Failed to print score table")?;

        for violation in &run.violations {
            error!(error = %violation, "Validator omitted from report");
        }

        let summary = RunSummary::from_run(&run);
        match &summary.top {
            Some((address, total)) => info!(
                validators = summary.validators,
                top = %address,
                top_total = total,
                "Scoring run complete"
            ),
            None => warn!("Scoring run complete, no validator signed a block in range"),
        }

        Ok(summary)
    }

    /// Write the aggregation pipeline document for this configuration.
    pub fn write_pipeline<W: Write>(&self, out: &mut W) -> Result<()> {
        let scoring = &self.config.scoring;
        let pipeline = AggregationPipeline::build(scoring.range, &scoring.windows());
        let document = serde_json::to_string_pretty(&pipeline.to_document())
            .context("Failed to render pipeline")?;
        writeln!(out, "{document}").context("Failed to write pipeline")?;
        Ok(())
    }
}
