//! Composite validator score.

use super::governance::PROPOSAL_COUNT;
use super::window::UPGRADE_COUNT;
use crate::error::ScoringError;
use std::borrow::Cow;

/// Suffix marking a consensus address shown in place of a missing operator
/// address.
pub const HEX_ADDRESS_SUFFIX: &str = " (Hex Address)";

/// Individual point contributions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreComponents {
    pub uptime_points: f64,
    pub upgrade_points: [u64; UPGRADE_COUNT],
    pub proposal_points: [u64; PROPOSAL_COUNT],
    pub genesis_points: u64,
}

impl ScoreComponents {
    /// Unweighted sum of every component.
    pub fn total(&self) -> f64 {
        let upgrades: u64 = self.upgrade_points.iter().sum();
        let proposals: u64 = self.proposal_points.iter().sum();
        self.uptime_points + upgrades as f64 + proposals as f64 + self.genesis_points as f64
    }

    pub fn governance_points(&self) -> u64 {
        self.proposal_points.iter().sum()
    }
}

/// Final score for one validator. Immutable once assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorScore {
    validator_address: String,
    operator_address: String,
    moniker: String,
    uptime_count: u64,
    components: ScoreComponents,
    total: f64,
}

impl ValidatorScore {
    pub fn new(
        validator_address: impl Into<String>,
        operator_address: impl Into<String>,
        moniker: impl Into<String>,
        uptime_count: u64,
        components: ScoreComponents,
    ) -> Self {
        let total = components.total();
        Self {
            validator_address: validator_address.into(),
            operator_address: operator_address.into(),
            moniker: moniker.into(),
            uptime_count,
            components,
            total,
        }
    }

    pub fn validator_address(&self) -> &str {
        &self.validator_address
    }

    pub fn operator_address(&self) -> &str {
        &self.operator_address
    }

    pub fn moniker(&self) -> &str {
        &self.moniker
    }

    pub fn uptime_count(&self) -> u64 {
        self.uptime_count
    }

    pub fn components(&self) -> &ScoreComponents {
        &self.components
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Operator address, or the consensus address marked as hex when the
    /// operator is unknown.
    pub fn display_address(&self) -> Cow<'_, str> {
        if self.operator_address.is_empty() {
            Cow::Owned(format!("{}{}", self.validator_address, HEX_ADDRESS_SUFFIX))
        } else {
            Cow::Borrowed(&self.operator_address)
        }
    }
}

/// Outcome of one scoring run.
///
/// A validator whose data violates a scoring invariant is reported in
/// `violations` and left out of `scores`; every other validator is scored.
#[derive(Debug, Default)]
pub struct ScoringRun {
    pub scores: Vec<ValidatorScore>,
    /// `ScoringError::InvalidValidatorData`, one per rejected validator
    pub violations: Vec<ScoringError>,
}

impl ScoringRun {
    /// Whether every validator in the aggregate was scored.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}
