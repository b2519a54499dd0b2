//! Driving Ports (API - Inbound)

use crate::domain::ScoringRun;
use crate::error::ScoringResult;
use async_trait::async_trait;

/// Primary scoring API
///
/// One call is one scoring run over the configured range.
#[async_trait]
pub trait ScoringApi: Send + Sync {
    /// Score every validator that signed at least one block in range.
    ///
    /// Scores are returned in aggregate order, not ranked. Validators with
    /// invalid data are reported in `ScoringRun::violations` without
    /// aborting the run.
    async fn score_validators(&self) -> ScoringResult<ScoringRun>;
}
