//! # Uptime Reward Curve
//!
//! Nothing at or below the 90% floor, then linear up to the 200 point cap at
//! 100% uptime.
//!
//! ```text
//! points
//!   200 ┤                 ●
//!       │               ╱
//!       │             ╱
//!     0 ┼━━━━━━━━━━━━●
//!       0%          90%  100%   uptime
//! ```

use crate::error::DomainError;
use shared_types::Height;

/// Maximum uptime points.
pub const MAX_UPTIME_POINTS: f64 = 200.0;

/// Uptime percentage at or below which no points are awarded.
pub const UPTIME_FLOOR_PERCENT: f64 = 90.0;

/// Uptime points for `observed` signed blocks over `range_start..range_end`.
///
/// The range length is `range_end - range_start`. A count above that length
/// is corrupt input and is reported, never clamped.
pub fn uptime_points(observed: u64, range_start: Height, range_end: Height) -> Result<f64, DomainError> {
    let total = range_end
        .checked_sub(range_start)
        .filter(|n| *n > 0)
        .ok_or(DomainError::EmptyRange {
            start: range_start,
            end: range_end,
        })?;

    if observed > total {
        return Err(DomainError::UptimeExceedsRange { observed, total });
    }

    let percent = observed as f64 / total as f64 * 100.0;
    if percent <= UPTIME_FLOOR_PERCENT {
        return Ok(0.0);
    }

    Ok((percent - UPTIME_FLOOR_PERCENT) * MAX_UPTIME_POINTS / (100.0 - UPTIME_FLOOR_PERCENT))
}
