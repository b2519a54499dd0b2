//! Governance vote points.

use serde::{Deserialize, Serialize};
use shared_types::ProposalVote;

/// Number of tracked proposals per run.
pub const PROPOSAL_COUNT: usize = 4;

/// Points for one qualifying vote.
pub const VOTE_POINTS: u64 = 50;

/// Which recorded votes qualify for points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VotePolicy {
    /// Only `Yes` votes score
    #[default]
    Affirmative,
    /// Any recorded vote scores
    Any,
}

impl VotePolicy {
    pub fn qualifies(&self, vote: &ProposalVote) -> bool {
        match self {
            VotePolicy::Affirmative => vote.option.is_affirmative(),
            VotePolicy::Any => true,
        }
    }
}

/// Points for the vote found for one proposal, if any.
pub fn vote_points(vote: Option<&ProposalVote>, policy: VotePolicy) -> u64 {
    match vote {
        Some(vote) if policy.qualifies(vote) => VOTE_POINTS,
        _ => 0,
    }
}
