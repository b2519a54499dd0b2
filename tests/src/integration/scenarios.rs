//! # Scoring Scenarios
//!
//! The scoring engine end to end against the in-memory query service:
//! aggregation, the four point rules and score assembly.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared_types::{ProposalVote, VoteOption};
    use uptime_scoring::{
        DomainError, InMemoryQueryService, ScoringApi, ScoringError, ScoringService, SpecialBonus,
        VotePolicy,
    };

    use crate::integration::fixtures::{blocks, config, validator};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // =========================================================================
    // UPTIME AND UPGRADE
    // =========================================================================

    /// A misses one block: 100 of 100 scored blocks, full uptime, on time
    /// for the upgrade.
    #[tokio::test]
    async fn test_single_miss_scores_full_uptime() {
        let store = InMemoryQueryService::new(
            blocks(100, 200, |h| if h == 180 { vec![] } else { vec!["AA"] }),
            vec![validator("AA", "valoper1a", "del1a", "alpha")],
            Vec::new(),
        );
        let service = ScoringService::new(config(), Arc::new(store));

        let scores = service.score_validators().await.unwrap().scores;
        assert_eq!(scores.len(), 1);

        let a = &scores[0];
        assert_eq!(a.uptime_count(), 100);
        assert!(approx(a.components().uptime_points, 200.0));
        assert_eq!(a.components().upgrade_points, [150, 0, 0, 0]);
        assert_eq!(a.components().proposal_points, [0; 4]);
        assert_eq!(a.components().genesis_points, 0);
        assert!(approx(a.total(), 350.0));
    }

    /// First block inside `[150, 160]` at 152: two blocks late at one point
    /// each.
    #[tokio::test]
    async fn test_late_upgrade_loses_points_per_block() {
        let store = InMemoryQueryService::new(
            blocks(100, 200, |h| {
                if h == 150 || h == 151 {
                    vec![]
                } else {
                    vec!["AA"]
                }
            }),
            vec![validator("AA", "valoper1a", "del1a", "alpha")],
            Vec::new(),
        );
        let service = ScoringService::new(config(), Arc::new(store));

        let scores = service.score_validators().await.unwrap().scores;
        let a = &scores[0];

        assert_eq!(a.uptime_count(), 99);
        assert!(approx(a.components().uptime_points, 180.0));
        assert_eq!(a.components().upgrade_points[0], 148);
        assert!(approx(a.total(), 328.0));
    }

    #[tokio::test]
    async fn test_uptime_floor() {
        // 90 of 100 blocks: exactly at the floor.
        let store = InMemoryQueryService::new(
            blocks(100, 200, |h| if h <= 110 { vec![] } else { vec!["AA"] }),
            vec![validator("AA", "valoper1a", "", "alpha")],
            Vec::new(),
        );
        let service = ScoringService::new(config(), Arc::new(store));

        let scores = service.score_validators().await.unwrap().scores;
        assert_eq!(scores[0].uptime_count(), 90);
        assert!(approx(scores[0].components().uptime_points, 0.0));
    }

    /// Signing every block of the inclusive range counts one more block than
    /// uptime is measured against. That validator is reported; the others
    /// are still scored.
    #[tokio::test]
    async fn test_signing_every_inclusive_block_is_reported_without_dropping_others() {
        let store = InMemoryQueryService::new(
            blocks(100, 200, |h| if h == 180 { vec!["AA"] } else { vec!["AA", "BB"] }),
            vec![
                validator("AA", "valoper1a", "", "alpha"),
                validator("BB", "valoper1b", "", "beta"),
            ],
            Vec::new(),
        );
        let service = ScoringService::new(config(), Arc::new(store));

        let run = service.score_validators().await.unwrap();
        assert!(!run.is_clean());

        assert_eq!(run.scores.len(), 1);
        let b = &run.scores[0];
        assert_eq!(b.validator_address(), "BB");
        assert_eq!(b.uptime_count(), 100);
        assert!(approx(b.components().uptime_points, 200.0));

        match run.violations.as_slice() {
            [ScoringError::InvalidValidatorData { validator, source }] => {
                assert_eq!(validator, "AA");
                assert_eq!(
                    *source,
                    DomainError::UptimeExceedsRange {
                        observed: 101,
                        total: 100
                    }
                );
            }
            other => panic!("expected one InvalidValidatorData, got {other:?}"),
        }
    }

    // =========================================================================
    // MEMBERSHIP AND DISPLAY
    // =========================================================================

    #[tokio::test]
    async fn test_validator_without_blocks_is_absent() {
        let store = InMemoryQueryService::new(
            blocks(50, 200, |h| {
                if h < 100 {
                    vec!["AA", "BB"]
                } else if h == 180 {
                    vec![]
                } else {
                    vec!["AA"]
                }
            }),
            vec![
                validator("AA", "valoper1a", "", "alpha"),
                validator("BB", "valoper1b", "", "beta"),
            ],
            Vec::new(),
        );
        let service = ScoringService::new(config(), Arc::new(store));

        let scores = service.score_validators().await.unwrap().scores;
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].validator_address(), "AA");
        assert!(scores.iter().all(|s| s.validator_address() != "BB"));
    }

    #[tokio::test]
    async fn test_unknown_operator_falls_back_to_hex_address() {
        // CC has no validator record; both sign 101..=200.
        let store = InMemoryQueryService::new(
            blocks(100, 200, |h| if h == 100 { vec![] } else { vec!["AA", "CC"] }),
            vec![validator("AA", "valoper1a", "", "alpha")],
            Vec::new(),
        );
        let service = ScoringService::new(config(), Arc::new(store));

        let scores = service.score_validators().await.unwrap().scores;
        assert_eq!(scores.len(), 2);

        let a = scores.iter().find(|s| s.validator_address() == "AA").unwrap();
        let c = scores.iter().find(|s| s.validator_address() == "CC").unwrap();

        assert_eq!(c.operator_address(), "");
        assert_eq!(c.moniker(), "");
        assert_eq!(c.display_address(), "CC (Hex Address)");
        assert_eq!(a.display_address(), "valoper1a");
        assert_eq!(c.components(), a.components());
        assert!(approx(c.total(), a.total()));
    }

    #[tokio::test]
    async fn test_scores_follow_first_appearance_order() {
        let store = InMemoryQueryService::new(
            blocks(100, 200, |h| match h {
                100 => vec![],
                101 => vec!["ZZ"],
                _ => vec!["ZZ", "AA"],
            }),
            Vec::new(),
            Vec::new(),
        );
        let service = ScoringService::new(config(), Arc::new(store));

        let scores = service.score_validators().await.unwrap().scores;
        let order: Vec<&str> = scores.iter().map(|s| s.validator_address()).collect();
        assert_eq!(order, ["ZZ", "AA"]);
    }

    // =========================================================================
    // GOVERNANCE, GENESIS AND BONUS
    // =========================================================================

    fn vote(proposal: &str, voter: &str, option: VoteOption) -> ProposalVote {
        ProposalVote {
            proposal_id: proposal.to_string(),
            voter: voter.to_string(),
            option,
            voting_power: 1,
        }
    }

    fn governance_store() -> InMemoryQueryService {
        InMemoryQueryService::new(
            blocks(1, 200, |h| match h {
                2 => vec!["AA"],
                h if h > 100 => vec!["AA", "BB"],
                _ => vec![],
            }),
            vec![
                validator("AA", "valoper1a", "del1a", "alpha"),
                validator("BB", "valoper1b", "del1b", "beta"),
            ],
            vec![
                vote("1", "del1a", VoteOption::Yes),
                vote("2", "del1a", VoteOption::No),
                vote("4", "del1a", VoteOption::Yes),
                vote("3", "del1b", VoteOption::Abstain),
            ],
        )
    }

    #[tokio::test]
    async fn test_affirmative_votes_and_genesis() {
        let service = ScoringService::new(config(), Arc::new(governance_store()));

        let scores = service.score_validators().await.unwrap().scores;
        let a = scores.iter().find(|s| s.validator_address() == "AA").unwrap();
        let b = scores.iter().find(|s| s.validator_address() == "BB").unwrap();

        assert_eq!(a.components().proposal_points, [50, 0, 0, 50]);
        assert_eq!(a.components().genesis_points, 100);
        assert_eq!(b.components().proposal_points, [0, 0, 0, 0]);
        assert_eq!(b.components().genesis_points, 0);

        // 100 of 100 blocks, on time for patagonia.
        assert!(approx(a.total(), 200.0 + 150.0 + 100.0 + 100.0));
    }

    #[tokio::test]
    async fn test_any_vote_policy_counts_every_vote() {
        let config = config().with_vote_policy(VotePolicy::Any);
        let service = ScoringService::new(config, Arc::new(governance_store()));

        let scores = service.score_validators().await.unwrap().scores;
        let a = scores.iter().find(|s| s.validator_address() == "AA").unwrap();
        let b = scores.iter().find(|s| s.validator_address() == "BB").unwrap();

        assert_eq!(a.components().proposal_points, [50, 50, 0, 50]);
        assert_eq!(b.components().proposal_points, [0, 0, 50, 0]);
    }

    #[tokio::test]
    async fn test_special_bonus_lands_on_one_upgrade() {
        let bonus = SpecialBonus {
            operator_address: "valoper1b".to_string(),
            upgrade_index: 0,
            points: 100,
        };
        let service = ScoringService::new(config().with_bonus(bonus), Arc::new(governance_store()));

        let scores = service.score_validators().await.unwrap().scores;
        let a = scores.iter().find(|s| s.validator_address() == "AA").unwrap();
        let b = scores.iter().find(|s| s.validator_address() == "BB").unwrap();

        assert_eq!(a.components().upgrade_points, [150, 0, 0, 0]);
        assert_eq!(b.components().upgrade_points, [250, 0, 0, 0]);
    }
}
