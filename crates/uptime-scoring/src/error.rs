//! Error types for the scoring engine

use shared_types::Height;
use thiserror::Error;

/// Violations of the numeric domain of a pure scoring function.
///
/// These indicate corrupt input data and are never clamped away.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// The scored range contains no blocks to measure uptime against
    #[error("Empty height range: start {start}, end {end}")]
    EmptyRange { start: Height, end: Height },

    /// More uptime blocks than the range permits
    #[error("Uptime count {observed} exceeds range length {total}")]
    UptimeExceedsRange { observed: u64, total: u64 },
}

/// Scoring engine errors
#[derive(Debug, Error)]
pub enum ScoringError {
    /// Data source could not be reached or opened
    #[error("Data source unavailable: {reason}")]
    Connectivity { reason: String },

    /// The per-validator aggregate query failed
    #[error("Aggregate query failed: {reason}")]
    AggregateQueryFailed { reason: String },

    /// Governance vote lookup failed
    #[error("Vote lookup failed for proposal {proposal_id}: {reason}")]
    VoteQueryFailed { proposal_id: String, reason: String },

    /// Validator set lookup failed
    #[error("Validator set query failed at height {height}: {reason}")]
    ValidatorSetQueryFailed { height: Height, reason: String },

    /// Pipeline description the query service cannot execute
    #[error("Unsupported pipeline: {reason}")]
    UnsupportedPipeline { reason: String },

    /// Scoring configuration rejected before the run
    #[error("Invalid scoring configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Validator data violates a scoring invariant
    #[error("Invalid data for validator {validator}: {source}")]
    InvalidValidatorData {
        validator: String,
        #[source]
        source: DomainError,
    },
}

/// Result type for scoring operations
pub type ScoringResult<T> = Result<T, ScoringError>;
