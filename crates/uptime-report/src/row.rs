//! Report rows shared by the table and CSV emitters.

use uptime_scoring::{ValidatorScore, PROPOSAL_COUNT, UPGRADE_COUNT};

/// Number of report columns.
pub const COLUMN_COUNT: usize = 4 + UPGRADE_COUNT + PROPOSAL_COUNT + 2;

/// Console table header.
pub const TABLE_HEADER: [&str; COLUMN_COUNT] = [
    "Operator Addr",
    "Moniker",
    "Uptime Count",
    "Uptime Points",
    "Upgrade-1 Points",
    "Upgrade-2 Points",
    "Upgrade-3 Points",
    "Upgrade-4 Points",
    "Proposal-1 Points",
    "Proposal-2 Points",
    "Proposal-3 Points",
    "Proposal-4 Points",
    "Genesis Points",
    "Total points",
];

/// CSV header.
pub const CSV_HEADER: [&str; COLUMN_COUNT] = [
    "ValOper Address",
    "Moniker",
    "Uptime Count",
    "Uptime Points",
    "Upgrade1 Points",
    "Upgrade2 Points",
    "Upgrade3 Points",
    "Upgrade4 Points",
    "Proposal1 Vote Points",
    "Proposal2 Vote Points",
    "Proposal3 Vote Points",
    "Proposal4 Vote Points",
    "Genesis Points",
    "Total Points",
];

/// Format a point value with six fractional digits.
pub fn format_points(value: f64) -> String {
    format!("{value:.6}")
}

/// One formatted row per validator, cells in header order.
pub fn row_cells(score: &ValidatorScore) -> Vec<String> {
    let components = score.components();
    let mut cells = Vec::with_capacity(COLUMN_COUNT);

    cells.push(score.display_address().into_owned());
    cells.push(score.moniker().to_string());
    cells.push(score.uptime_count().to_string());
    cells.push(format_points(components.uptime_points));
    cells.extend(components.upgrade_points.iter().map(u64::to_string));
    cells.extend(components.proposal_points.iter().map(u64::to_string));
    cells.push(components.genesis_points.to_string());
    cells.push(format_points(score.total()));

    cells
}
