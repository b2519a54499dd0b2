//! Genesis validator set membership.

use shared_types::ValidatorRecord;
use std::collections::HashSet;

/// Points for validators that signed the first post-genesis block.
pub const GENESIS_POINTS: u64 = 100;

/// Operator addresses of the validators that signed the first post-genesis
/// block. Built once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenesisSet {
    operators: HashSet<String>,
}

impl GenesisSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_validators<'a>(validators: impl IntoIterator<Item = &'a ValidatorRecord>) -> Self {
        let operators = validators
            .into_iter()
            .map(|v| v.operator_address.clone())
            .filter(|addr| !addr.is_empty())
            .collect();
        Self { operators }
    }

    pub fn contains(&self, operator_address: &str) -> bool {
        !operator_address.is_empty() && self.operators.contains(operator_address)
    }

    pub fn points_for(&self, operator_address: &str) -> u64 {
        if self.contains(operator_address) {
            GENESIS_POINTS
        } else {
            0
        }
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}
