//! In-memory Query Service
//!
//! Holds block, validator and vote collections in memory and interprets an
//! `AggregationPipeline` stage by stage. Backs the snapshot adapter and every
//! test that needs indexed chain data without a live store.

use crate::domain::pipeline::{
    GroupStage, LookupStage, PipelineStage, VALIDATORS_COLLECTION,
};
use crate::domain::{AggregatedValidatorStat, AggregationPipeline, UPGRADE_COUNT};
use crate::error::{ScoringError, ScoringResult};
use crate::ports::outbound::QueryService;
use async_trait::async_trait;
use shared_types::{BlockRecord, Height, ProposalVote, ValidatorRecord};
use std::collections::HashMap;
use tracing::debug;

/// Per-validator accumulator for the group stage.
struct GroupRow {
    key: String,
    count: u64,
    first_heights: Vec<Option<Height>>,
}

/// Intermediate result between stages.
enum StageOutput<'a> {
    Blocks(Vec<&'a BlockRecord>),
    Signatures(Vec<(Height, &'a str)>),
    Groups(Vec<GroupRow>),
    Joined(Vec<AggregatedValidatorStat>),
}

impl StageOutput<'_> {
    fn name(&self) -> &'static str {
        match self {
            StageOutput::Blocks(_) => "blocks",
            StageOutput::Signatures(_) => "unwound rows",
            StageOutput::Groups(_) => "groups",
            StageOutput::Joined(_) => "joined rows",
        }
    }
}

/// Query service over in-memory collections.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQueryService {
    blocks: Vec<BlockRecord>,
    validators: Vec<ValidatorRecord>,
    votes: Vec<ProposalVote>,
}

impl InMemoryQueryService {
    /// Create a service; blocks are kept in height order.
    pub fn new(
        mut blocks: Vec<BlockRecord>,
        validators: Vec<ValidatorRecord>,
        votes: Vec<ProposalVote>,
    ) -> Self {
        blocks.sort_by_key(|b| b.height);
        Self {
            blocks,
            validators,
            votes,
        }
    }

    /// Interpret the pipeline against the block collection.
    pub fn execute(&self, pipeline: &AggregationPipeline) -> ScoringResult<Vec<AggregatedValidatorStat>> {
        let mut output = StageOutput::Blocks(self.blocks.iter().collect());

        for stage in pipeline.stages() {
            output = match (stage, output) {
                (PipelineStage::MatchHeight(range), StageOutput::Blocks(blocks)) => {
                    StageOutput::Blocks(
                        blocks
                            .into_iter()
                            .filter(|b| range.contains(b.height))
                            .collect(),
                    )
                }
                (PipelineStage::UnwindValidators, StageOutput::Blocks(blocks)) => {
                    StageOutput::Signatures(
                        blocks
                            .into_iter()
                            .flat_map(|b| b.validators.iter().map(move |v| (b.height, v.as_str())))
                            .collect(),
                    )
                }
                (PipelineStage::Group(group), StageOutput::Signatures(rows)) => {
                    StageOutput::Groups(Self::group(group, rows))
                }
                (PipelineStage::Lookup(lookup), StageOutput::Groups(groups)) => {
                    StageOutput::Joined(self.lookup(lookup, groups)?)
                }
                (stage, current) => {
                    return Err(ScoringError::UnsupportedPipeline {
                        reason: format!("stage {:?} cannot follow {}", stage, current.name()),
                    });
                }
            };
        }

        match output {
            StageOutput::Joined(stats) => Ok(stats),
            other => Err(ScoringError::UnsupportedPipeline {
                reason: format!("pipeline ends with {}, expected joined rows", other.name()),
            }),
        }
    }

    /// Group rows by validator, keeping first-appearance order.
    fn group(group: &GroupStage, rows: Vec<(Height, &str)>) -> Vec<GroupRow> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<GroupRow> = Vec::new();

        for (height, validator) in rows {
            let slot = *index.entry(validator).or_insert_with(|| {
                groups.push(GroupRow {
                    key: validator.to_string(),
                    count: 0,
                    first_heights: vec![None; group.first_heights.len()],
                });
                groups.len() - 1
            });

            let row = &mut groups[slot];
            row.count += 1;
            for (first, field) in row.first_heights.iter_mut().zip(&group.first_heights) {
                if field.window.contains(height) {
                    *first = Some(first.map_or(height, |h| h.min(height)));
                }
            }
        }

        groups
    }

    fn lookup(
        &self,
        lookup: &LookupStage,
        groups: Vec<GroupRow>,
    ) -> ScoringResult<Vec<AggregatedValidatorStat>> {
        if lookup.from != VALIDATORS_COLLECTION || lookup.foreign_field != "address" {
            return Err(ScoringError::UnsupportedPipeline {
                reason: format!("lookup on {}.{}", lookup.from, lookup.foreign_field),
            });
        }

        groups
            .into_iter()
            .map(|row| {
                let upgrade_blocks: [Option<Height>; UPGRADE_COUNT] =
                    row.first_heights.try_into().map_err(|fields: Vec<_>| {
                        ScoringError::UnsupportedPipeline {
                            reason: format!(
                                "group computes {} upgrade fields, expected {}",
                                fields.len(),
                                UPGRADE_COUNT
                            ),
                        }
                    })?;
                let details = self
                    .validators
                    .iter()
                    .find(|v| v.address == row.key)
                    .cloned();

                Ok(AggregatedValidatorStat {
                    validator_address: row.key,
                    uptime_count: row.count,
                    upgrade_blocks,
                    details,
                })
            })
            .collect()
    }
}

#[async_trait]
impl QueryService for InMemoryQueryService {
    async fn aggregate_validator_stats(
        &self,
        pipeline: &AggregationPipeline,
    ) -> ScoringResult<Vec<AggregatedValidatorStat>> {
        let stats = self.execute(pipeline)?;
        debug!(
            range = %pipeline.range(),
            validators = stats.len(),
            "In-memory aggregate complete"
        );
        Ok(stats)
    }

    async fn find_vote(
        &self,
        proposal_id: &str,
        voter: &str,
    ) -> ScoringResult<Option<ProposalVote>> {
        Ok(self
            .votes
            .iter()
            .find(|v| v.proposal_id == proposal_id && v.voter == voter)
            .cloned())
    }

    async fn validators_at_height(&self, height: Height) -> ScoringResult<Vec<ValidatorRecord>> {
        let Some(block) = self.blocks.iter().find(|b| b.height == height) else {
            return Ok(Vec::new());
        };

        Ok(self
            .validators
            .iter()
            .filter(|v| block.signed_by(&v.address))
            .cloned()
            .collect())
    }
}
