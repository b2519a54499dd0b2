//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::{AggregatedValidatorStat, AggregationPipeline};
use crate::error::ScoringResult;
use async_trait::async_trait;
use shared_types::{Height, ProposalVote, ValidatorRecord};

/// Read-only access to indexed chain data.
///
/// Any storage engine can back this: a document store, a relational store,
/// or an in-memory fixture.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Run the per-validator aggregate.
    ///
    /// Rows come back in the order the store produces them; the scoring run
    /// preserves that order.
    async fn aggregate_validator_stats(
        &self,
        pipeline: &AggregationPipeline,
    ) -> ScoringResult<Vec<AggregatedValidatorStat>>;

    /// Find the vote `voter` cast on `proposal_id`.
    ///
    /// An absent vote is `Ok(None)`, not an error.
    async fn find_vote(&self, proposal_id: &str, voter: &str)
        -> ScoringResult<Option<ProposalVote>>;

    /// Validator records for the signers of the block at `height`.
    ///
    /// Empty when no block exists at that height.
    async fn validators_at_height(&self, height: Height) -> ScoringResult<Vec<ValidatorRecord>>;
}
