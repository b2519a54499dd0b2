//! Runtime configuration.
//!
//! Values are layered: TOML file, then environment, then command line.
//!
//! # Config File Format
//!
//! ```toml
//! [range]
//! start_block = 1
//! end_block = 100000
//!
//! [upgrades.patagonia]
//! upgrade_height = 18000
//! end_height = 19000
//! base_score = 150
//! penalty_per_block = 1
//!
//! [governance]
//! proposals = ["1", "2", "3", "4"]
//! vote_policy = "affirmative"
//!
//! [bonus]
//! address = "valoper1..."
//! upgrade = 3
//! points = 100
//!
//! [data]
//! snapshot = "snapshot.json"
//!
//! [report]
//! csv_path = "result.csv"
//! ```
//!
//! Exactly four `[upgrades.*]` sections are required; they are ordered by
//! `upgrade_height`.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uptime_report::DEFAULT_CSV_PATH;
use uptime_scoring::domain::upgrade::{
    CANONICAL_BASE_SCORE, CANONICAL_BONUS_UPGRADE, CANONICAL_PENALTIES, SPECIAL_BONUS_POINTS,
};
use uptime_scoring::{
    HeightRange, ScoringConfig, ScoringError, SpecialBonus, UpgradePolicy, UpgradeWindow,
    VotePolicy, PROPOSAL_COUNT, UPGRADE_COUNT,
};

/// Default configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "uptime.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Expected {expected} upgrades, found {found}")]
    UpgradeCount { expected: usize, found: usize },

    #[error("Expected {expected} proposals, found {found}")]
    ProposalCount { expected: usize, found: usize },

    #[error("Bonus upgrade {upgrade} out of range 1..={max}")]
    BonusUpgrade { upgrade: usize, max: usize },

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    range: RangeSection,
    #[serde(default)]
    upgrades: BTreeMap<String, UpgradeSection>,
    #[serde(default)]
    governance: GovernanceSection,
    bonus: Option<BonusSection>,
    #[serde(default)]
    data: DataSection,
    #[serde(default)]
    report: ReportSection,
}

#[derive(Debug, Default, Deserialize)]
struct RangeSection {
    start_block: Option<u64>,
    end_block: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct UpgradeSection {
    upgrade_height: u64,
    end_height: u64,
    base_score: Option<u64>,
    penalty_per_block: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct GovernanceSection {
    #[serde(default)]
    proposals: Vec<String>,
    #[serde(default)]
    vote_policy: VotePolicy,
}

#[derive(Debug, Default, Deserialize)]
struct BonusSection {
    #[serde(default)]
    address: String,
    upgrade: Option<usize>,
    points: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct DataSection {
    snapshot: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ReportSection {
    csv_path: Option<PathBuf>,
}

/// Settings that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub start_block: Option<u64>,
    pub end_block: Option<u64>,
    pub snapshot: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
    pub bonus_address: Option<String>,
}

impl Overrides {
    /// Read overrides from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `UPTIME_SNAPSHOT`: Snapshot file path
    /// - `UPTIME_CSV_PATH`: CSV output path
    /// - `UPTIME_BONUS_ADDRESS`: Operator address receiving the special bonus
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read overrides through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            start_block: None,
            end_block: None,
            snapshot: non_empty("UPTIME_SNAPSHOT").map(PathBuf::from),
            csv_path: non_empty("UPTIME_CSV_PATH").map(PathBuf::from),
            bonus_address: non_empty("UPTIME_BONUS_ADDRESS"),
        }
    }

    /// Layer `other` on top of `self`; values set in `other` win.
    #[must_use]
    pub fn merge(self, other: Overrides) -> Self {
        Self {
            start_block: other.start_block.or(self.start_block),
            end_block: other.end_block.or(self.end_block),
            snapshot: other.snapshot.or(self.snapshot),
            csv_path: other.csv_path.or(self.csv_path),
            bonus_address: other.bonus_address.or(self.bonus_address),
        }
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub scoring: ScoringConfig,
    pub snapshot: PathBuf,
    pub csv_path: PathBuf,
}

impl RuntimeConfig {
    /// Load configuration from a TOML file and apply overrides.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P, overrides: Overrides) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content, overrides)
    }

    /// Parse configuration from a TOML string and apply overrides.
    pub fn parse(content: &str, overrides: Overrides) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let start = overrides
            .start_block
            .or(file.range.start_block)
            .ok_or(ConfigError::Missing("range.start_block"))?;
        let end = overrides
            .end_block
            .or(file.range.end_block)
            .ok_or(ConfigError::Missing("range.end_block"))?;

        let upgrades = Self::upgrade_policies(file.upgrades)?;
        let proposals = Self::proposals(file.governance.proposals)?;

        let mut scoring = ScoringConfig::new(HeightRange::new(start, end), upgrades, proposals)
            .with_vote_policy(file.governance.vote_policy);

        if let Some(bonus) = Self::bonus(file.bonus, overrides.bonus_address)? {
            scoring = scoring.with_bonus(bonus);
        }

        scoring.validate()?;

        let snapshot = overrides
            .snapshot
            .or(file.data.snapshot)
            .ok_or(ConfigError::Missing("data.snapshot"))?;
        let csv_path = overrides
            .csv_path
            .or(file.report.csv_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH));

        Ok(Self {
            scoring,
            snapshot,
            csv_path,
        })
    }

    fn upgrade_policies(
        sections: BTreeMap<String, UpgradeSection>,
    ) -> Result<[UpgradePolicy; UPGRADE_COUNT], ConfigError> {
        let mut named: Vec<(String, UpgradeSection)> = sections.into_iter().collect();
        named.sort_by_key(|(_, section)| section.upgrade_height);

        let found = named.len();
        let policies: Vec<UpgradePolicy> = named
            .into_iter()
            .enumerate()
            .map(|(index, (name, section))| {
                let window =
                    UpgradeWindow::after_upgrade(name, section.upgrade_height, section.end_height);
                UpgradePolicy {
                    window,
                    base_score: section.base_score.unwrap_or(CANONICAL_BASE_SCORE),
                    penalty_per_block: section
                        .penalty_per_block
                        .unwrap_or(CANONICAL_PENALTIES[index % UPGRADE_COUNT]),
                }
            })
            .collect();

        policies
            .try_into()
            .map_err(|_| ConfigError::UpgradeCount {
                expected: UPGRADE_COUNT,
                found,
            })
    }

    fn proposals(proposals: Vec<String>) -> Result<[String; PROPOSAL_COUNT], ConfigError> {
        let found = proposals.len();
        proposals
            .try_into()
            .map_err(|_| ConfigError::ProposalCount {
                expected: PROPOSAL_COUNT,
                found,
            })
    }

    fn bonus(
        section: Option<BonusSection>,
        address_override: Option<String>,
    ) -> Result<Option<SpecialBonus>, ConfigError> {
        let section = match (section, address_override) {
            (Some(mut section), Some(address)) => {
                section.address = address;
                section
            }
            (Some(section), None) => section,
            (None, Some(address)) => BonusSection {
                address,
                ..Default::default()
            },
            (None, None) => return Ok(None),
        };

        if section.address.trim().is_empty() {
            return Ok(None);
        }

        let upgrade = section.upgrade.unwrap_or(CANONICAL_BONUS_UPGRADE + 1);
        if upgrade == 0 || upgrade > UPGRADE_COUNT {
            return Err(ConfigError::BonusUpgrade {
                upgrade,
                max: UPGRADE_COUNT,
            });
        }

        Ok(Some(SpecialBonus {
            operator_address: section.address,
            upgrade_index: upgrade - 1,
            points: section.points.unwrap_or(SPECIAL_BONUS_POINTS),
        }))
    }
}
