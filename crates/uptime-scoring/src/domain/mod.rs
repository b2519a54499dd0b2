//! Domain module for the scoring engine
//!
//! ## Core Modules
//! - window: Height ranges and upgrade windows
//! - pipeline: Per-validator aggregation description
//! - stats: Aggregation result rows
//! - score: Composite validator score
//!
//! ## Point Rules
//! - upgrade: Linear-decay upgrade points and special bonus
//! - uptime: Uptime reward curve
//! - governance: Proposal vote points
//! - genesis: Genesis set membership

pub mod genesis;
pub mod governance;
pub mod pipeline;
pub mod score;
pub mod stats;
pub mod upgrade;
pub mod uptime;
pub mod window;

pub use genesis::{GenesisSet, GENESIS_POINTS};
pub use governance::{vote_points, VotePolicy, PROPOSAL_COUNT, VOTE_POINTS};
pub use pipeline::{AggregationPipeline, PipelineStage};
pub use score::{ScoreComponents, ScoringRun, ValidatorScore};
pub use stats::AggregatedValidatorStat;
pub use upgrade::{upgrade_points, SpecialBonus, UpgradePolicy};
pub use uptime::{uptime_points, MAX_UPTIME_POINTS};
pub use window::{HeightRange, UpgradeWindow, UPGRADE_COUNT};
