//! JSON Snapshot Query Service
//!
//! Loads a snapshot exported from the chain indexer:
//!
//! ```json
//! {
//!   "blocks":     [{ "_id": "2", "height": 2, "validators": ["A1B2..."] }],
//!   "validators": [{ "address": "A1B2...", "operator_address": "...", "delegator_address": "...",
//!                    "description": { "moniker": "..." } }],
//!   "votes":      [{ "proposal_id": "1", "voter": "...", "option": "Yes", "votingPower": 10 }]
//! }
//! ```
//!
//! Queries run through the in-memory pipeline interpreter.

use super::memory::InMemoryQueryService;
use crate::domain::{AggregatedValidatorStat, AggregationPipeline};
use crate::error::{ScoringError, ScoringResult};
use crate::ports::outbound::QueryService;
use async_trait::async_trait;
use serde::Deserialize;
use shared_types::{BlockRecord, Height, ProposalVote, ValidatorRecord};
use std::path::{Path, PathBuf};
use tracing::info;

/// Snapshot file layout.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub blocks: Vec<BlockRecord>,
    #[serde(default)]
    pub validators: Vec<ValidatorRecord>,
    #[serde(default)]
    pub votes: Vec<ProposalVote>,
}

/// Query service backed by a snapshot file.
pub struct SnapshotQueryService {
    inner: InMemoryQueryService,
    path: PathBuf,
}

impl SnapshotQueryService {
    /// Open and parse a snapshot file.
    ///
    /// # Errors
    ///
    /// `ScoringError::Connectivity` when the file cannot be read or parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> ScoringResult<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| ScoringError::Connectivity {
            reason: format!("cannot read snapshot {}: {}", path.display(), e),
        })?;

        let snapshot = Self::parse(&content).map_err(|e| ScoringError::Connectivity {
            reason: format!("cannot parse snapshot {}: {}", path.display(), e),
        })?;

        info!(
            path = %path.display(),
            blocks = snapshot.blocks.len(),
            validators = snapshot.validators.len(),
            votes = snapshot.votes.len(),
            "Loaded chain snapshot"
        );

        Ok(Self {
            inner: InMemoryQueryService::new(snapshot.blocks, snapshot.validators, snapshot.votes),
            path,
        })
    }

    /// Parse snapshot JSON.
    pub fn parse(content: &str) -> Result<Snapshot, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QueryService for SnapshotQueryService {
    async fn aggregate_validator_stats(
        &self,
        pipeline: &AggregationPipeline,
    ) -> ScoringResult<Vec<AggregatedValidatorStat>> {
        self.inner.aggregate_validator_stats(pipeline).await
    }

    async fn find_vote(
        &self,
        proposal_id: &str,
        voter: &str,
    ) -> ScoringResult<Option<ProposalVote>> {
        self.inner.find_vote(proposal_id, voter).await
    }

    async fn validators_at_height(&self, height: Height) -> ScoringResult<Vec<ValidatorRecord>> {
        self.inner.validators_at_height(height).await
    }
}
