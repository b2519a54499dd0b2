//! # Snapshot Runs
//!
//! A snapshot file loaded from disk and scored through the runtime, with
//! configuration parsed from TOML.

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;
    use std::sync::Arc;

    use serde_json::json;
    use uptime_runtime::{Overrides, RuntimeConfig, UptimeRuntime};
    use uptime_scoring::SnapshotQueryService;

    const CONFIG: &str = r#"
        [range]
        start_block = 1
        end_block = 11

        [upgrades.patagonia]
        upgrade_height = 3
        end_height = 5
        [upgrades.papua]
        upgrade_height = 5
        end_height = 7
        [upgrades.darien-gap]
        upgrade_height = 7
        end_height = 9
        [upgrades.andes]
        upgrade_height = 8
        end_height = 10

        [governance]
        proposals = ["11", "12", "13", "14"]

        [bonus]
        address = "valoper1b"
    "#;

    /// AA signs 2..=11. BB joins at 7. CC only signs block 12.
    fn write_snapshot(path: &Path) {
        let blocks: Vec<_> = (1..=12u64)
            .map(|h| {
                let mut signers = Vec::new();
                if (2..=11).contains(&h) {
                    signers.push("AA");
                }
                if (7..=11).contains(&h) {
                    signers.push("BB");
                }
                if h == 12 {
                    signers.push("CC");
                }
                json!({ "_id": h.to_string(), "height": h, "validators": signers })
            })
            .collect();

        let snapshot = json!({
            "blocks": blocks,
            "validators": [
                { "address": "AA", "operator_address": "valoper1a",
                  "delegator_address": "del1a", "description": { "moniker": "alpha" } },
                { "address": "BB", "operator_address": "valoper1b",
                  "delegator_address": "del1b", "description": { "moniker": "beta" } },
                { "address": "CC", "operator_address": "valoper1c",
                  "delegator_address": "del1c", "description": { "moniker": "gamma" } }
            ],
            "votes": [
                { "proposal_id": "11", "voter": "del1a", "option": "Yes", "votingPower": 10 },
                { "proposal_id": "13", "voter": "del1b", "option": "Yes", "votingPower": 4 },
                { "proposal_id": "14", "voter": "del1b", "option": "NoWithVeto", "votingPower": 4 }
            ]
        });

        let mut file = std::fs::File::create(path).unwrap();
        file.write_all(snapshot.to_string().as_bytes()).unwrap();
    }

    #[tokio::test]
    async fn test_snapshot_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot_path = dir.path().join("snapshot.json");
        let csv_path = dir.path().join("result.csv");
        write_snapshot(&snapshot_path);

        let overrides = Overrides {
            snapshot: Some(snapshot_path.clone()),
            csv_path: Some(csv_path.clone()),
            ..Default::default()
        };
        let runtime = UptimeRuntime::new(RuntimeConfig::parse(CONFIG, overrides).unwrap());
        let query = SnapshotQueryService::open(&snapshot_path).unwrap();

        let mut out = Vec::new();
        let summary = runtime.run_with(Arc::new(query), &mut out).await.unwrap();

        // CC signed only block 12, outside the scored range.
        assert_eq!(summary.validators, 2);
        assert!(summary.is_complete());

        // Windows shift to [4,6], [6,8], [8,10], [9,11].
        // AA: 10 of 10 blocks, on time everywhere, one Yes vote, genesis.
        // BB: 5 of 10 blocks, late for patagonia (absent) and papua (7, one
        // block at 2 points), on time after, bonus on darien-gap, one Yes vote.
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[1],
            "valoper1a,alpha,10,200.000000,150,150,150,150,50,0,0,0,100,950.000000"
        );
        assert_eq!(
            rows[2],
            "valoper1b,beta,5,0.000000,0,148,250,150,0,0,50,0,0,598.000000"
        );

        let (top, total) = summary.top.unwrap();
        assert_eq!(top, "valoper1a");
        assert!((total - 950.0).abs() < 1e-9);

        let table = String::from_utf8(out).unwrap();
        assert!(table.lines().next().unwrap().starts_with("Operator Addr"));
    }

    #[tokio::test]
    async fn test_missing_snapshot_fails_run() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            snapshot: Some(dir.path().join("absent.json")),
            csv_path: Some(dir.path().join("result.csv")),
            ..Default::default()
        };
        let runtime = UptimeRuntime::new(RuntimeConfig::parse(CONFIG, overrides).unwrap());

        let err = runtime.run().await.unwrap_err();
        assert!(format!("{err:#}").contains("snapshot"));
        assert!(!dir.path().join("result.csv").exists());
    }

    #[test]
    fn test_pipeline_document_targets_configured_range() {
        let overrides = Overrides {
            snapshot: Some("unused.json".into()),
            ..Default::default()
        };
        let runtime = UptimeRuntime::new(RuntimeConfig::parse(CONFIG, overrides).unwrap());

        let mut out = Vec::new();
        runtime.write_pipeline(&mut out).unwrap();
        let document: serde_json::Value = serde_json::from_slice(&out).unwrap();

        let stages = document.as_array().unwrap();
        assert_eq!(stages.len(), 4);
        assert_eq!(stages[0]["$match"]["$and"][0]["height"]["$gte"], json!(1));
        assert_eq!(stages[0]["$match"]["$and"][1]["height"]["$lte"], json!(11));
    }
}
