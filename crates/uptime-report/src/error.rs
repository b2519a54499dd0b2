//! Report output errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while emitting the report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the console failed
    #[error("Failed to write report table: {0}")]
    Table(#[from] std::io::Error),

    /// The CSV file could not be created or written
    #[error("Failed to write CSV report {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
