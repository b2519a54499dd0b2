//! # Aggregation Pipeline
//!
//! Describes the single per-validator aggregate a scoring run needs:
//!
//! ```text
//! blocks ──match height──→ unwind validators ──group by validator──→ lookup validators
//!                                                │
//!                                                ├── uptime_count   = rows
//!                                                └── upgrade{i}_block = min(height in window i) | null
//! ```
//!
//! The description is storage-neutral. `to_document` renders it in the
//! document-store aggregation dialect so operators can run the exact same
//! query by hand, and the in-memory adapter interprets it stage by stage.

use super::window::{HeightRange, UpgradeWindow, UPGRADE_COUNT};
use serde_json::{json, Map, Value};

/// Block collection name.
pub const BLOCKS_COLLECTION: &str = "blocks";
/// Validator reference collection name.
pub const VALIDATORS_COLLECTION: &str = "validators";
/// Field holding the joined validator records.
pub const VALIDATOR_DETAILS_FIELD: &str = "validator_details";
/// Field holding the uptime count.
pub const UPTIME_COUNT_FIELD: &str = "uptime_count";

/// Validator fields projected by the lookup stage.
pub const VALIDATOR_PROJECTION: [&str; 4] = [
    "description.moniker",
    "operator_address",
    "delegator_address",
    "address",
];

/// Output field name for the first in-window height of upgrade `index` (0-based).
pub fn upgrade_block_field(index: usize) -> String {
    format!("upgrade{}_block", index + 1)
}

/// Minimum in-window height computed by the group stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstHeightField {
    pub field: String,
    pub window: UpgradeWindow,
}

/// Group rows by validator address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStage {
    pub count_field: &'static str,
    pub first_heights: Vec<FirstHeightField>,
}

/// Join validator reference data on `foreign_field == group key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupStage {
    pub from: &'static str,
    pub foreign_field: &'static str,
    pub projection: Vec<&'static str>,
    pub as_field: &'static str,
}

/// One step of the aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineStage {
    /// Keep blocks with height in the inclusive range
    MatchHeight(HeightRange),
    /// Expand each block's validator list into one row per validator
    UnwindValidators,
    /// Count rows and take per-window minimum heights
    Group(GroupStage),
    /// Attach validator reference data
    Lookup(LookupStage),
}

impl PipelineStage {
    /// Render the stage in the document-store dialect.
    pub fn to_document(&self) -> Value {
        match self {
            PipelineStage::MatchHeight(range) => json!({
                "$match": {
                    "$and": [
                        { "height": { "$gte": range.start } },
                        { "height": { "$lte": range.end } }
                    ]
                }
            }),
            PipelineStage::UnwindValidators => json!({ "$unwind": "$validators" }),
            PipelineStage::Group(group) => {
                let mut fields = Map::new();
                fields.insert("_id".to_string(), json!("$validators"));
                fields.insert(group.count_field.to_string(), json!({ "$sum": 1 }));
                for first in &group.first_heights {
                    // Absent is a real null; $min skips nulls so a window
                    // with no rows stays null.
                    fields.insert(
                        first.field.clone(),
                        json!({
                            "$min": {
                                "$cond": [
                                    {
                                        "$and": [
                                            { "$gte": ["$height", first.window.start] },
                                            { "$lte": ["$height", first.window.end] }
                                        ]
                                    },
                                    "$height",
                                    Value::Null
                                ]
                            }
                        }),
                    );
                }
                json!({ "$group": Value::Object(fields) })
            }
            PipelineStage::Lookup(lookup) => {
                let mut projection = Map::new();
                for field in &lookup.projection {
                    projection.insert((*field).to_string(), json!(1));
                }
                projection.insert("_id".to_string(), json!(0));
                json!({
                    "$lookup": {
                        "from": lookup.from,
                        "let": { "id": "$_id" },
                        "pipeline": [
                            { "$match": { "$expr": { "$eq": [format!("${}", lookup.foreign_field), "$$id"] } } },
                            { "$project": Value::Object(projection) }
                        ],
                        "as": lookup.as_field
                    }
                })
            }
        }
    }
}

/// The four-stage per-validator aggregate over the block collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationPipeline {
    range: HeightRange,
    stages: Vec<PipelineStage>,
}

impl AggregationPipeline {
    /// Build the aggregate for a scored range and the upgrade windows.
    ///
    /// Windows are independent of each other and of the range; they may
    /// overlap.
    pub fn build(range: HeightRange, windows: &[UpgradeWindow; UPGRADE_COUNT]) -> Self {
        let first_heights = windows
            .iter()
            .enumerate()
            .map(|(i, window)| FirstHeightField {
                field: upgrade_block_field(i),
                window: window.clone(),
            })
            .collect();

        let stages = vec![
            PipelineStage::MatchHeight(range),
            PipelineStage::UnwindValidators,
            PipelineStage::Group(GroupStage {
                count_field: UPTIME_COUNT_FIELD,
                first_heights,
            }),
            PipelineStage::Lookup(LookupStage {
                from: VALIDATORS_COLLECTION,
                foreign_field: "address",
                projection: VALIDATOR_PROJECTION.to_vec(),
                as_field: VALIDATOR_DETAILS_FIELD,
            }),
        ];

        Self { range, stages }
    }

    pub fn range(&self) -> HeightRange {
        self.range
    }

    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    /// Collection the pipeline runs against.
    pub fn collection(&self) -> &'static str {
        BLOCKS_COLLECTION
    }

    /// Render the whole pipeline as a JSON array of stages.
    pub fn to_document(&self) -> Value {
        Value::Array(self.stages.iter().map(PipelineStage::to_document).collect())
    }
}
