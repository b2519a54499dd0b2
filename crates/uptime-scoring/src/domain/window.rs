//! Height ranges and upgrade windows.

use serde::{Deserialize, Serialize};
use shared_types::Height;
use std::fmt;

/// Number of scheduled upgrades scored per run.
pub const UPGRADE_COUNT: usize = 4;

/// Inclusive block-height range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightRange {
    pub start: Height,
    pub end: Height,
}

impl HeightRange {
    pub fn new(start: Height, end: Height) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, height: Height) -> bool {
        height >= self.start && height <= self.end
    }

    /// Number of blocks uptime is measured against (`end - start`).
    ///
    /// Returns `None` when the range is empty or inverted.
    pub fn scored_blocks(&self) -> Option<u64> {
        self.end.checked_sub(self.start).filter(|n| *n > 0)
    }
}

impl fmt::Display for HeightRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Height window in which participation in one upgrade is scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeWindow {
    /// Upgrade name, used in logs.
    pub name: String,
    /// First block after the upgrade height.
    pub start: Height,
    /// Last block counted for the upgrade.
    pub end: Height,
}

impl UpgradeWindow {
    pub fn new(name: impl Into<String>, start: Height, end: Height) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Build a window from the upgrade height itself.
    ///
    /// Participation counts from the block after the upgrade, so both bounds
    /// shift by one.
    pub fn after_upgrade(name: impl Into<String>, upgrade_height: Height, end_height: Height) -> Self {
        Self::new(
            name,
            upgrade_height.saturating_add(1),
            end_height.saturating_add(1),
        )
    }

    pub fn range(&self) -> HeightRange {
        HeightRange::new(self.start, self.end)
    }

    pub fn contains(&self, height: Height) -> bool {
        self.range().contains(height)
    }
}
