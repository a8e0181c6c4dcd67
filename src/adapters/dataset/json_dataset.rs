//! JSON dataset adapter.
//!
//! Reads the array-of-records format used by the survey's source data:
//!
//! ```json
//! [{
//!   "ID": 1,
//!   "Dimension": "Adoption Pace",
//!   "Question": "...",
//!   "Conservative Approach": "...",
//!   "Aggressive Approach": "...",
//!   "Strongly Conservative": "...",
//!   "Balanced": { "text": "...", "feedback": "...", "example": "..." },
//!   ...
//! }]
//! ```
//!
//! A record with a `Ranges` array (`{ "lower", "upper", "text" }`) is read
//! as a range-bucketed dimension instead of a fixed-slot one.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::foundation::{ApproachLabel, DimensionId, Scale};
use crate::domain::survey::{
    Dataset, DatasetIssue, Dimension, FeedbackRange, LabelingScheme, SlotText,
};
use crate::ports::{DatasetError, DatasetSource, LoadedDataset};

const BUNDLED_DATASET: &str = include_str!("../../../data/ai_strategy_dimensions.json");

#[derive(Debug, Clone)]
enum Origin {
    File(PathBuf),
    Bundled,
    Inline(String),
}

/// Dataset source backed by a JSON document.
#[derive(Debug, Clone)]
pub struct JsonDatasetSource {
    origin: Origin,
    scale: Scale,
    title: Option<String>,
}

impl JsonDatasetSource {
    /// Reads the dataset from a file on each `load`.
    pub fn from_path(path: impl Into<PathBuf>, scale: Scale) -> Self {
        Self {
            origin: Origin::File(path.into()),
            scale,
            title: None,
        }
    }

    /// Uses the dataset compiled into the binary.
    pub fn bundled(scale: Scale) -> Self {
        Self {
            origin: Origin::Bundled,
            scale,
            title: None,
        }
    }

    /// Uses a JSON string held in memory.
    pub fn from_json(json: impl Into<String>, scale: Scale) -> Self {
        Self {
            origin: Origin::Inline(json.into()),
            scale,
            title: None,
        }
    }

    /// Overrides the report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn read(&self) -> Result<String, DatasetError> {
        match &self.origin {
            Origin::File(path) => std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
                path: path.clone(),
                source,
            }),
            Origin::Bundled => Ok(BUNDLED_DATASET.to_string()),
            Origin::Inline(json) => Ok(json.clone()),
        }
    }
}

impl DatasetSource for JsonDatasetSource {
    fn load(&self) -> Result<LoadedDataset, DatasetError> {
        let raw = self.read()?;
        let mut loaded = parse_dataset(&raw, self.scale)?;
        if let Some(title) = &self.title {
            loaded.dataset = loaded.dataset.with_title(title.clone());
        }

        tracing::info!(
            source = %self.describe(),
            dimensions = loaded.dataset.len(),
            scale = %self.scale,
            "Loaded dataset"
        );
        for issue in &loaded.issues {
            tracing::warn!(%issue, "Dataset issue");
        }
        Ok(loaded)
    }

    fn describe(&self) -> String {
        match &self.origin {
            Origin::File(path) => path.display().to_string(),
            Origin::Bundled => "bundled dataset".to_string(),
            Origin::Inline(_) => "inline dataset".to_string(),
        }
    }
}

/// Parses a JSON document into a dataset on `scale`.
pub fn parse_dataset(json: &str, scale: Scale) -> Result<LoadedDataset, DatasetError> {
    let document: Value = serde_json::from_str(json)?;
    let records = match document {
        Value::Array(records) => records,
        other => return Err(DatasetError::NotAnArray(json_type_name(&other))),
    };

    let mut record_issues = Vec::new();
    let mut dimensions = Vec::with_capacity(records.len());
    for (index, value) in records.into_iter().enumerate() {
        let record = serde_json::from_value::<DimensionRecord>(value).map_err(|e| {
            DatasetError::MalformedRecord {
                index,
                reason: e.to_string(),
            }
        })?;
        if record.is_mixed_shape() {
            record_issues.push(DatasetIssue::MixedShape {
                dimension: DimensionId::new(record.id),
            });
        }
        dimensions.push(record.into_dimension());
    }

    let dataset = Dataset::new(scale, dimensions)?;
    let mut issues = record_issues;
    issues.extend(dataset.issues());
    Ok(LoadedDataset { dataset, issues })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Deserialize)]
struct DimensionRecord {
    #[serde(rename = "ID")]
    id: u32,
    #[serde(rename = "Dimension")]
    name: String,
    #[serde(rename = "Question", default)]
    question: String,
    #[serde(rename = "Conservative Approach", default)]
    conservative_approach: String,
    #[serde(rename = "Aggressive Approach", default)]
    aggressive_approach: String,
    #[serde(rename = "Strongly Conservative")]
    strongly_conservative: Option<SlotRecord>,
    #[serde(rename = "Moderately Conservative")]
    moderately_conservative: Option<SlotRecord>,
    #[serde(rename = "Slightly Conservative")]
    slightly_conservative: Option<SlotRecord>,
    #[serde(rename = "Balanced")]
    balanced: Option<SlotRecord>,
    #[serde(rename = "Slightly Aggressive")]
    slightly_aggressive: Option<SlotRecord>,
    #[serde(rename = "Moderately Aggressive")]
    moderately_aggressive: Option<SlotRecord>,
    #[serde(rename = "Strongly Aggressive")]
    strongly_aggressive: Option<SlotRecord>,
    #[serde(rename = "Ranges")]
    ranges: Option<Vec<FeedbackRange>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SlotRecord {
    Text(String),
    Detailed {
        #[serde(default)]
        text: String,
        feedback: Option<String>,
        example: Option<String>,
    },
}

impl From<SlotRecord> for SlotText {
    fn from(record: SlotRecord) -> Self {
        match record {
            SlotRecord::Text(text) => SlotText::new(text),
            SlotRecord::Detailed {
                text,
                feedback,
                example,
            } => SlotText {
                text,
                feedback,
                example,
            },
        }
    }
}

impl DimensionRecord {
    /// A `Ranges` array next to slot fields; the ranges win.
    fn is_mixed_shape(&self) -> bool {
        self.ranges.is_some()
            && [
                &self.strongly_conservative,
                &self.moderately_conservative,
                &self.slightly_conservative,
                &self.balanced,
                &self.slightly_aggressive,
                &self.moderately_aggressive,
                &self.strongly_aggressive,
            ]
            .iter()
            .any(|slot| slot.is_some())
    }

    fn into_dimension(self) -> Dimension {
        let id = DimensionId::new(self.id);
        let scheme = match self.ranges {
            Some(ranges) => LabelingScheme::RangeBucketed(ranges),
            None => {
                let slots: BTreeMap<ApproachLabel, SlotText> = [
                    (ApproachLabel::StronglyConservative, self.strongly_conservative),
                    (ApproachLabel::ModeratelyConservative, self.moderately_conservative),
                    (ApproachLabel::SlightlyConservative, self.slightly_conservative),
                    (ApproachLabel::Balanced, self.balanced),
                    (ApproachLabel::SlightlyAggressive, self.slightly_aggressive),
                    (ApproachLabel::ModeratelyAggressive, self.moderately_aggressive),
                    (ApproachLabel::StronglyAggressive, self.strongly_aggressive),
                ]
                .into_iter()
                .filter_map(|(label, slot)| slot.map(|s| (label, SlotText::from(s))))
                .collect();
                LabelingScheme::FixedSlot(slots)
            }
        };

        Dimension::new(
            id,
            self.name,
            self.question,
            self.conservative_approach,
            self.aggressive_approach,
            scheme,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXED: &str = r#"[{
        "ID": 1,
        "Dimension": "Adoption Pace",
        "Question": "How fast do you adopt new models?",
        "Conservative Approach": "Wait for proof",
        "Aggressive Approach": "Adopt on release",
        "Strongly Conservative": "sc",
        "Moderately Conservative": "mc",
        "Slightly Conservative": "slc",
        "Balanced": { "text": "b", "feedback": "balanced feedback", "example": "balanced example" },
        "Slightly Aggressive": "sa",
        "Moderately Aggressive": "ma",
        "Strongly Aggressive": "sta"
    }]"#;

    #[test]
    fn parses_fixed_slot_records() {
        let loaded = parse_dataset(FIXED, Scale::Percentage).unwrap();

        assert!(loaded.issues.is_empty());
        let dim = &loaded.dataset.dimensions()[0];
        assert_eq!(dim.id(), DimensionId::new(1));
        assert_eq!(dim.conservative_approach(), "Wait for proof");
        let balanced = dim.scheme().slot(ApproachLabel::Balanced).unwrap();
        assert_eq!(balanced.feedback_text(), "balanced feedback");
        assert_eq!(balanced.example.as_deref(), Some("balanced example"));
    }

    #[test]
    fn parses_range_bucketed_records() {
        let json = r#"[{
            "ID": 2,
            "Dimension": "Risk",
            "Ranges": [
                { "lower": 0, "upper": 49, "text": "low" },
                { "lower": 50, "upper": 100, "text": "high" }
            ]
        }]"#;

        let loaded = parse_dataset(json, Scale::Percentage).unwrap();

        assert!(loaded.issues.is_empty());
        assert!(matches!(
            loaded.dataset.dimensions()[0].scheme(),
            LabelingScheme::RangeBucketed(ranges) if ranges.len() == 2
        ));
    }

    #[test]
    fn missing_slots_load_with_issues() {
        let json = r#"[{ "ID": 3, "Dimension": "Sparse", "Balanced": "only" }]"#;

        let loaded = parse_dataset(json, Scale::Discrete).unwrap();

        assert_eq!(loaded.issues.len(), 6);
        assert!(loaded
            .issues
            .iter()
            .all(|i| matches!(i, DatasetIssue::MissingSlot { .. })));
        assert!(loaded.into_strict().is_err());
    }

    #[test]
    fn out_of_scale_bounds_load_with_issues_at_any_magnitude() {
        let json = r#"[{
            "ID": 4,
            "Dimension": "Compute Budget",
            "Ranges": [
                { "lower": -1, "upper": 49, "text": "lean" },
                { "lower": 50, "upper": 1000, "text": "heavy" }
            ]
        }]"#;

        let loaded = parse_dataset(json, Scale::Percentage).unwrap();

        assert_eq!(
            loaded.issues,
            vec![
                DatasetIssue::RangeOutsideDomain {
                    dimension: DimensionId::new(4),
                    lower: -1,
                    upper: 49,
                },
                DatasetIssue::RangeOutsideDomain {
                    dimension: DimensionId::new(4),
                    lower: 50,
                    upper: 1000,
                },
            ]
        );
        let scheme = loaded.dataset.dimensions()[0].scheme();
        assert_eq!(scheme.range_for(0).map(|r| r.text.as_str()), Some("lean"));
        assert_eq!(scheme.range_for(100).map(|r| r.text.as_str()), Some("heavy"));
        assert!(loaded.into_strict().is_err());
    }

    #[test]
    fn ranges_next_to_slots_are_reported() {
        let json = r#"[{
            "ID": 5,
            "Dimension": "Vendor Strategy",
            "Balanced": "ignored",
            "Ranges": [{ "lower": 0, "upper": 100, "text": "any" }]
        }]"#;

        let loaded = parse_dataset(json, Scale::Percentage).unwrap();

        assert_eq!(
            loaded.issues,
            vec![DatasetIssue::MixedShape { dimension: DimensionId::new(5) }]
        );
        assert!(matches!(
            loaded.dataset.dimensions()[0].scheme(),
            LabelingScheme::RangeBucketed(_)
        ));
        assert!(matches!(
            loaded.into_strict().unwrap_err(),
            DatasetError::Rejected(issues) if issues.len() == 1
        ));
    }

    #[test]
    fn rejects_non_array_documents() {
        let err = parse_dataset(r#"{ "ID": 1 }"#, Scale::Percentage).unwrap_err();
        assert!(matches!(err, DatasetError::NotAnArray("object")));
    }

    #[test]
    fn rejects_invalid_json() {
        let err = parse_dataset("[{", Scale::Percentage).unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn reports_index_of_malformed_record() {
        let json = r#"[{ "ID": 1, "Dimension": "ok" }, { "Dimension": "no id" }]"#;
        match parse_dataset(json, Scale::Percentage).unwrap_err() {
            DatasetError::MalformedRecord { index, .. } => assert_eq!(index, 1),
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"[{ "ID": 1, "Dimension": "a" }, { "ID": 1, "Dimension": "b" }]"#;
        assert!(matches!(
            parse_dataset(json, Scale::Percentage).unwrap_err(),
            DatasetError::Invalid(_)
        ));
    }

    #[test]
    fn bundled_dataset_is_complete_on_both_scales() {
        for scale in [Scale::Discrete, Scale::Percentage] {
            let loaded = JsonDatasetSource::bundled(scale).load().unwrap();
            assert!(!loaded.dataset.is_empty());
            assert!(loaded.issues.is_empty(), "issues: {:?}", loaded.issues);
        }
    }

    #[test]
    fn loads_from_file_with_title_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXED.as_bytes()).unwrap();

        let source = JsonDatasetSource::from_path(file.path(), Scale::Percentage).with_title("Q3 Review");
        let loaded = source.load().unwrap();

        assert_eq!(loaded.dataset.title(), "Q3 Review");
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = JsonDatasetSource::from_path("/nonexistent/dimensions.json", Scale::Percentage);
        assert!(matches!(source.load().unwrap_err(), DatasetError::Io { .. }));
    }
}
