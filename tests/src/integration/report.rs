//! # Report Output
//!
//! Scores produced by the engine rendered as the console table and the CSV
//! file.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared_types::{ProposalVote, VoteOption};
    use uptime_report::{write_csv, write_table, CSV_HEADER};
    use uptime_scoring::{InMemoryQueryService, ScoringApi, ScoringService, ValidatorScore};

    use crate::integration::fixtures::{blocks, config, validator};

    async fn scores() -> Vec<ValidatorScore> {
        let votes = ["1", "2", "3", "4"]
            .iter()
            .zip([VoteOption::Yes, VoteOption::No, VoteOption::No, VoteOption::Yes])
            .map(|(id, option)| ProposalVote {
                proposal_id: id.to_string(),
                voter: "del1a".to_string(),
                option,
                voting_power: 1,
            })
            .collect();

        // AA misses 180, CC misses 100: 100 blocks each.
        let store = InMemoryQueryService::new(
            blocks(100, 200, |h| match h {
                100 => vec!["AA"],
                180 => vec!["CC"],
                _ => vec!["AA", "CC"],
            }),
            vec![validator("AA", "valoper1a", "del1a", "alpha, the first")],
            votes,
        );

        ScoringService::new(config(), Arc::new(store))
            .score_validators()
            .await
            .unwrap()
            .scores
    }

    #[tokio::test]
    async fn test_csv_proposal_columns_are_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.csv");
        write_csv(&path, &scores().await).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = content.lines().collect();
        assert_eq!(rows[0], CSV_HEADER.join(","));

        // Proposal 3 and 4 carry their own votes.
        assert_eq!(
            rows[1],
            "valoper1a,\"alpha, the first\",100,200.000000,150,0,0,0,50,0,0,50,0,450.000000"
        );
        assert_eq!(
            rows[2],
            "CC (Hex Address),,100,200.000000,150,0,0,0,0,0,0,0,0,350.000000"
        );
    }

    #[tokio::test]
    async fn test_table_matches_csv_rows() {
        let scores = scores().await;
        let mut out = Vec::new();
        write_table(&mut out, &scores).unwrap();

        let table = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);

        let cells: Vec<&str> = lines[2].split(" | ").map(str::trim).collect();
        assert_eq!(cells[0], "CC (Hex Address)");
        assert_eq!(cells[2], "100");
        assert_eq!(cells[3], "200.000000");
        assert_eq!(cells.last().copied(), Some("350.000000"));
    }
}
