//! # Indexer Records
//!
//! ## Collections
//!
//! - **blocks** (`BlockRecord`): height plus the validators that signed it
//! - **validators** (`ValidatorRecord`): addresses and description metadata
//! - **proposals** (`ProposalVote`): one governance vote per voter/proposal

use serde::{Deserialize, Serialize};
use std::fmt;

/// Block height.
pub type Height = u64;

/// Height of the first block produced after genesis.
pub const FIRST_POST_GENESIS_HEIGHT: Height = 2;

/// A block as stored by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Height-derived document id.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Block height.
    pub height: Height,
    /// Consensus addresses of the validators that signed the block.
    #[serde(default)]
    pub validators: Vec<String>,
}

impl BlockRecord {
    pub fn new(height: Height, validators: Vec<String>) -> Self {
        Self {
            id: height.to_string(),
            height,
            validators,
        }
    }

    /// Whether `address` signed this block.
    pub fn signed_by(&self, address: &str) -> bool {
        self.validators.iter().any(|v| v == address)
    }
}

/// Free-form validator description.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Description {
    #[serde(default)]
    pub moniker: String,
}

/// Validator reference data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidatorRecord {
    /// Consensus (hex) address, matches `BlockRecord::validators` entries.
    pub address: String,
    /// Operator address, the reward recipient.
    #[serde(default)]
    pub operator_address: String,
    /// Self-delegator address, used as the governance voter.
    #[serde(default)]
    pub delegator_address: String,
    #[serde(default)]
    pub description: Description,
}

impl ValidatorRecord {
    pub fn moniker(&self) -> &str {
        &self.description.moniker
    }
}

/// Governance vote option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteOption {
    Yes,
    No,
    Abstain,
    NoWithVeto,
    /// Anything the indexer recorded that is not a known option.
    #[serde(other)]
    Unspecified,
}

impl VoteOption {
    pub fn is_affirmative(&self) -> bool {
        matches!(self, VoteOption::Yes)
    }
}

impl fmt::Display for VoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VoteOption::Yes => "Yes",
            VoteOption::No => "No",
            VoteOption::Abstain => "Abstain",
            VoteOption::NoWithVeto => "NoWithVeto",
            VoteOption::Unspecified => "Unspecified",
        };
        f.write_str(s)
    }
}

/// A single governance vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalVote {
    pub proposal_id: String,
    pub voter: String,
    pub option: VoteOption,
    #[serde(rename = "votingPower", default)]
    pub voting_power: u64,
}
