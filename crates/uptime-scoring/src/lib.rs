//! # uptime-scoring
//!
//! Validator participation scoring for a testnet reward round.
//!
//! ## Overview
//!
//! Each validator that signed at least one block in the scored range gets:
//! - **Uptime points**: 0 at or below 90% uptime, linear to 200 at 100%
//! - **Upgrade points**: per upgrade, full base score for signing the first
//!   block after the upgrade, linear decay per block of delay
//! - **Governance points**: 50 per qualifying vote on each tracked proposal
//! - **Genesis points**: 100 for signing the first post-genesis block
//!
//! ## Architecture
//!
//! ```text
//! ScoringApi (inbound) ──→ ScoringService ──→ QueryService (outbound)
//!                                                 ├── InMemoryQueryService
//!                                                 └── SnapshotQueryService
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use uptime_scoring::{ScoringApi, ScoringConfig, ScoringService, SnapshotQueryService};
//!
//! let query = Arc::new(SnapshotQueryService::open("snapshot.json")?);
//! let service = ScoringService::new(config, query);
//!
//! let run = service.score_validators().await?;
//! for violation in &run.violations {
//!     eprintln!("{violation}");
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryQueryService, Snapshot, SnapshotQueryService};
pub use domain::{
    AggregatedValidatorStat, AggregationPipeline, GenesisSet, HeightRange, ScoreComponents,
    ScoringRun, SpecialBonus, UpgradePolicy, UpgradeWindow, ValidatorScore, VotePolicy,
    PROPOSAL_COUNT, UPGRADE_COUNT,
};
pub use error::{DomainError, ScoringError, ScoringResult};
pub use ports::inbound::ScoringApi;
pub use ports::outbound::QueryService;
pub use service::{ScoringConfig, ScoringService};
