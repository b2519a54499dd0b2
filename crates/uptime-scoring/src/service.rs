//! Scoring Service - run orchestration
//!
//! ```text
//! ScoringConfig ──build──→ AggregationPipeline ──QueryService──→ [AggregatedValidatorStat]
//!                                                                   │
//!           validators_at_height(2) ──→ GenesisSet (once per run)   │
//!                                              │                    ↓
//!                                              └────→ per validator, in aggregate order:
//!                                                       upgrade points x4 (+ bonus)
//!                                                       uptime points
//!                                                       find_vote x4 ──→ proposal points
//!                                                       genesis points
//!                                                       ──→ ValidatorScore
//! ```

use crate::domain::governance::vote_points;
use crate::domain::{
    uptime_points, AggregatedValidatorStat, AggregationPipeline, GenesisSet, HeightRange,
    ScoreComponents, ScoringRun, SpecialBonus, UpgradePolicy, UpgradeWindow, ValidatorScore,
    VotePolicy, PROPOSAL_COUNT, UPGRADE_COUNT,
};
use crate::error::{ScoringError, ScoringResult};
use crate::ports::inbound::ScoringApi;
use crate::ports::outbound::QueryService;
use async_trait::async_trait;
use shared_types::{Height, FIRST_POST_GENESIS_HEIGHT};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Immutable configuration for one scoring run.
#[derive(Clone, Debug)]
pub struct ScoringConfig {
    /// Scored height range (inclusive)
    pub range: HeightRange,
    /// Upgrade windows with their point rules
    pub upgrades: [UpgradePolicy; UPGRADE_COUNT],
    /// Tracked governance proposal ids
    pub proposals: [String; PROPOSAL_COUNT],
    /// Optional flat bonus for one operator
    pub bonus: Option<SpecialBonus>,
    /// Which votes earn points
    pub vote_policy: VotePolicy,
    /// Height whose signers form the genesis set
    pub genesis_height: Height,
}

impl ScoringConfig {
    pub fn new(
        range: HeightRange,
        upgrades: [UpgradePolicy; UPGRADE_COUNT],
        proposals: [String; PROPOSAL_COUNT],
    ) -> Self {
        Self {
            range,
            upgrades,
            proposals,
            bonus: None,
            vote_policy: VotePolicy::default(),
            genesis_height: FIRST_POST_GENESIS_HEIGHT,
        }
    }

    pub fn with_bonus(mut self, bonus: SpecialBonus) -> Self {
        self.bonus = Some(bonus);
        self
    }

    pub fn with_vote_policy(mut self, vote_policy: VotePolicy) -> Self {
        self.vote_policy = vote_policy;
        self
    }

    pub fn windows(&self) -> [UpgradeWindow; UPGRADE_COUNT] {
        std::array::from_fn(|i| self.upgrades[i].window.clone())
    }

    /// Reject configurations no run can score.
    pub fn validate(&self) -> ScoringResult<()> {
        if self.range.scored_blocks().is_none() {
            return Err(ScoringError::InvalidConfig {
                reason: format!("height range {} contains no blocks to score", self.range),
            });
        }

        for policy in &self.upgrades {
            if policy.window.start > policy.window.end {
                return Err(ScoringError::InvalidConfig {
                    reason: format!(
                        "upgrade window {} starts at {} after its end {}",
                        policy.window.name, policy.window.start, policy.window.end
                    ),
                });
            }
        }

        if let Some(index) = self.proposals.iter().position(|p| p.trim().is_empty()) {
            return Err(ScoringError::InvalidConfig {
                reason: format!("proposal {} has an empty id", index + 1),
            });
        }

        if let Some(bonus) = &self.bonus {
            if bonus.upgrade_index >= UPGRADE_COUNT {
                return Err(ScoringError::InvalidConfig {
                    reason: format!(
                        "bonus upgrade {} out of range 1..={}",
                        bonus.upgrade_index + 1,
                        UPGRADE_COUNT
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Scoring service implementation
pub struct ScoringService<Q>
where
    Q: QueryService,
{
    config: ScoringConfig,
    query: Arc<Q>,
}

impl<Q> ScoringService<Q>
where
    Q: QueryService,
{
    pub fn new(config: ScoringConfig, query: Arc<Q>) -> Self {
        Self { config, query }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Signers of the genesis height. A failed lookup scores nobody.
    async fn load_genesis_set(&self) -> GenesisSet {
        let height = self.config.genesis_height;
        match self.query.validators_at_height(height).await {
            Ok(validators) => {
                let set = GenesisSet::from_validators(&validators);
                info!(height, operators = set.len(), "Loaded genesis validator set");
                set
            }
            Err(e) => {
                warn!(height, error = %e, "Genesis set lookup failed; genesis points disabled");
                GenesisSet::empty()
            }
        }
    }

    fn upgrade_points(&self, stat: &AggregatedValidatorStat) -> [u64; UPGRADE_COUNT] {
        std::array::from_fn(|i| {
            let decay = self.config.upgrades[i].points(stat.upgrade_blocks[i]);
            let bonus = self
                .config
                .bonus
                .as_ref()
                .map_or(0, |b| b.award(i, stat.operator_address()));
            decay + bonus
        })
    }

    /// Points for one proposal. Lookup failures score zero.
    async fn proposal_points(&self, proposal_id: &str, delegator: &str) -> u64 {
        if delegator.is_empty() {
            return 0;
        }

        match self.query.find_vote(proposal_id, delegator).await {
            Ok(vote) => vote_points(vote.as_ref(), self.config.vote_policy),
            Err(e) => {
                warn!(
                    proposal = proposal_id,
                    voter = delegator,
                    error = %e,
                    "Vote lookup failed; scoring proposal as not voted"
                );
                0
            }
        }
    }

    async fn governance_points(&self, delegator: &str) -> [u64; PROPOSAL_COUNT] {
        let mut points = [0; PROPOSAL_COUNT];
        for (slot, proposal_id) in points.iter_mut().zip(&self.config.proposals) {
            *slot = self.proposal_points(proposal_id, delegator).await;
        }
        points
    }

    async fn score_stat(
        &self,
        stat: &AggregatedValidatorStat,
        genesis: &GenesisSet,
    ) -> ScoringResult<ValidatorScore> {
        let uptime = uptime_points(stat.uptime_count, self.config.range.start, self.config.range.end)
            .map_err(|source| ScoringError::InvalidValidatorData {
                validator: stat.validator_address.clone(),
                source,
            })?;

        let components = ScoreComponents {
            uptime_points: uptime,
            upgrade_points: self.upgrade_points(stat),
            proposal_points: self.governance_points(stat.delegator_address()).await,
            genesis_points: genesis.points_for(stat.operator_address()),
        };

        let score = ValidatorScore::new(
            stat.validator_address.clone(),
            stat.operator_address(),
            stat.moniker(),
            stat.uptime_count,
            components,
        );

        debug!(
            validator = %stat.validator_address,
            operator = stat.operator_address(),
            total = score.total(),
            "Scored validator"
        );

        Ok(score)
    }
}

#[async_trait]
impl<Q> ScoringApi for ScoringService<Q>
where
    Q: QueryService,
{
    async fn score_validators(&self) -> ScoringResult<ScoringRun> {
        self.config.validate()?;

        let pipeline = AggregationPipeline::build(self.config.range, &self.config.windows());
        info!(range = %self.config.range, "Fetching validator aggregates");
        debug!(
            collection = pipeline.collection(),
            pipeline = %pipeline.to_document(),
            "Aggregation pipeline"
        );

        let stats = self.query.aggregate_validator_stats(&pipeline).await?;
        info!(validators = stats.len(), "Aggregate query returned");

        let genesis = self.load_genesis_set().await;

        let mut run = ScoringRun {
            scores: Vec::with_capacity(stats.len()),
            violations: Vec::new(),
        };
        for stat in &stats {
            if stat.uptime_count == 0 {
                debug!(validator = %stat.validator_address, "Skipping validator with no blocks in range");
                continue;
            }
            match self.score_stat(stat, &genesis).await {
                Ok(score) => run.scores.push(score),
                Err(e @ ScoringError::InvalidValidatorData { .. }) => {
                    error!(
                        validator = %stat.validator_address,
                        error = %e,
                        "Validator data violates scoring invariant; left out of report"
                    );
                    run.violations.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        if !run.is_clean() {
            warn!(
                scored = run.scores.len(),
                violations = run.violations.len(),
                "Scoring run finished with invalid validator data"
            );
        }

        Ok(run)
    }
}
