//! # Upgrade Points
//!
//! Rewards validators for producing blocks promptly after a scheduled
//! upgrade. Full credit for signing the first block of the window, then a
//! linear decay of `penalty_per_block` per block of delay, floored at zero.
//!
//! ```text
//! points
//!  base ┤●
//!       │  ╲
//!       │    ╲   slope = -penalty_per_block
//!       │      ╲
//!     0 ┼────────●━━━━━━━━━
//!       start            end   height
//! ```

use super::window::{UpgradeWindow, UPGRADE_COUNT};
use serde::{Deserialize, Serialize};
use shared_types::Height;

/// Base score for every upgrade in the canonical policy.
pub const CANONICAL_BASE_SCORE: u64 = 150;

/// Per-block lateness penalty for upgrades 1-4. Later upgrades penalize
/// lateness more steeply.
pub const CANONICAL_PENALTIES: [u64; UPGRADE_COUNT] = [1, 2, 3, 5];

/// Flat bonus for the configured operator address.
pub const SPECIAL_BONUS_POINTS: u64 = 100;

/// Upgrade that receives the special bonus in the canonical policy (0-based).
pub const CANONICAL_BONUS_UPGRADE: usize = 2;

/// Points for one upgrade.
///
/// `first_observed` is the validator's first height inside the window.
/// Heights outside `[window_start, window_end)` other than an exact hit on
/// `window_start` earn nothing.
pub fn upgrade_points(
    window_start: Height,
    first_observed: Option<Height>,
    window_end: Height,
    base_score: u64,
    penalty_per_block: u64,
) -> u64 {
    let Some(height) = first_observed else {
        return 0;
    };

    if height == window_start {
        return base_score;
    }

    if height > window_start && height < window_end {
        let delay = height - window_start;
        return base_score.saturating_sub(delay.saturating_mul(penalty_per_block));
    }

    0
}

/// Scoring rule for one upgrade window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePolicy {
    pub window: UpgradeWindow,
    pub base_score: u64,
    pub penalty_per_block: u64,
}

impl UpgradePolicy {
    /// Canonical policy for upgrade `index` (0-based).
    pub fn canonical(index: usize, window: UpgradeWindow) -> Self {
        Self {
            window,
            base_score: CANONICAL_BASE_SCORE,
            penalty_per_block: CANONICAL_PENALTIES[index % UPGRADE_COUNT],
        }
    }

    pub fn points(&self, first_observed: Option<Height>) -> u64 {
        upgrade_points(
            self.window.start,
            first_observed,
            self.window.end,
            self.base_score,
            self.penalty_per_block,
        )
    }
}

/// Flat award for one operator address on one upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialBonus {
    pub operator_address: String,
    /// Upgrade the bonus is added to (0-based).
    pub upgrade_index: usize,
    pub points: u64,
}

impl SpecialBonus {
    pub fn canonical(operator_address: impl Into<String>) -> Self {
        Self {
            operator_address: operator_address.into(),
            upgrade_index: CANONICAL_BONUS_UPGRADE,
            points: SPECIAL_BONUS_POINTS,
        }
    }

    /// Bonus owed to `operator_address` on upgrade `index`.
    pub fn award(&self, index: usize, operator_address: &str) -> u64 {
        if index == self.upgrade_index
            && !operator_address.is_empty()
            && operator_address == self.operator_address
        {
            self.points
        } else {
            0
        }
    }
}
