//! Per-validator aggregate returned by the query service.

use super::window::UPGRADE_COUNT;
use shared_types::{Height, ValidatorRecord};

/// One row of the aggregation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedValidatorStat {
    /// Consensus address (group key).
    pub validator_address: String,
    /// Blocks in the scored range this validator signed.
    pub uptime_count: u64,
    /// First height inside each upgrade window, `None` if the validator
    /// signed nothing in that window.
    pub upgrade_blocks: [Option<Height>; UPGRADE_COUNT],
    /// Joined reference data, `None` when no validator record matched.
    pub details: Option<ValidatorRecord>,
}

impl AggregatedValidatorStat {
    pub fn operator_address(&self) -> &str {
        self.details
            .as_ref()
            .map(|d| d.operator_address.as_str())
            .unwrap_or_default()
    }

    pub fn delegator_address(&self) -> &str {
        self.details
            .as_ref()
            .map(|d| d.delegator_address.as_str())
            .unwrap_or_default()
    }

    pub fn moniker(&self) -> &str {
        self.details
            .as_ref()
            .map(|d| d.moniker())
            .unwrap_or_default()
    }
}
