//! Survey dimensions and their labeling schemes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::foundation::{ApproachLabel, DimensionId, Scale};

/// Text stored in one fixed slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotText {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl SlotText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            feedback: None,
            example: None,
        }
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// The feedback variant when present, otherwise the slot text.
    pub fn feedback_text(&self) -> &str {
        self.feedback.as_deref().unwrap_or(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.feedback.as_deref().map_or(true, |f| f.trim().is_empty())
    }
}

/// One entry of a range-bucketed scheme. Bounds are inclusive.
///
/// Bounds are kept as read so that a range reaching past the scale is
/// reported as an issue rather than failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRange {
    pub lower: i64,
    pub upper: i64,
    pub text: String,
}

impl FeedbackRange {
    pub fn new(lower: impl Into<i64>, upper: impl Into<i64>, text: impl Into<String>) -> Self {
        Self {
            lower: lower.into(),
            upper: upper.into(),
            text: text.into(),
        }
    }

    pub fn contains(&self, value: u8) -> bool {
        (self.lower..=self.upper).contains(&i64::from(value))
    }
}

/// How a dimension turns a slider position into feedback text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum LabelingScheme {
    /// One slot per approach label.
    FixedSlot(BTreeMap<ApproachLabel, SlotText>),
    /// Ordered ranges; the first containing the value wins.
    RangeBucketed(Vec<FeedbackRange>),
}

impl LabelingScheme {
    /// Returns the slot for `label` (fixed-slot schemes only).
    pub fn slot(&self, label: ApproachLabel) -> Option<&SlotText> {
        match self {
            LabelingScheme::FixedSlot(slots) => slots.get(&label),
            LabelingScheme::RangeBucketed(_) => None,
        }
    }

    /// Returns the first range containing `value` (range-bucketed schemes only).
    pub fn range_for(&self, value: u8) -> Option<&FeedbackRange> {
        match self {
            LabelingScheme::FixedSlot(_) => None,
            LabelingScheme::RangeBucketed(ranges) => ranges.iter().find(|r| r.contains(value)),
        }
    }

    fn issues(&self, dimension: DimensionId, scale: Scale) -> Vec<DatasetIssue> {
        match self {
            LabelingScheme::FixedSlot(slots) => ApproachLabel::ALL
                .iter()
                .filter_map(|label| match slots.get(label) {
                    None => Some(DatasetIssue::MissingSlot {
                        dimension,
                        label: *label,
                    }),
                    Some(slot) if slot.is_empty() => Some(DatasetIssue::EmptySlot {
                        dimension,
                        label: *label,
                    }),
                    Some(_) => None,
                })
                .collect(),
            LabelingScheme::RangeBucketed(ranges) => range_issues(dimension, ranges, scale),
        }
    }
}

/// Checks coverage by counting matches for every integer in the domain.
fn range_issues(dimension: DimensionId, ranges: &[FeedbackRange], scale: Scale) -> Vec<DatasetIssue> {
    if ranges.is_empty() {
        return vec![DatasetIssue::NoRanges { dimension }];
    }

    let mut issues = Vec::new();
    for range in ranges {
        if range.lower > range.upper {
            issues.push(DatasetIssue::InvertedRange {
                dimension,
                lower: range.lower,
                upper: range.upper,
            });
        } else if range.lower < i64::from(scale.min()) || range.upper > i64::from(scale.max()) {
            issues.push(DatasetIssue::RangeOutsideDomain {
                dimension,
                lower: range.lower,
                upper: range.upper,
            });
        }
    }

    let mut gap: Option<(u8, u8)> = None;
    let mut overlap: Option<(u8, u8)> = None;
    for value in scale.min()..=scale.max() {
        let matches = ranges.iter().filter(|r| r.contains(value)).count();
        extend_run(&mut gap, value, matches == 0, |from, to| {
            issues.push(DatasetIssue::RangeGap { dimension, from, to })
        });
        extend_run(&mut overlap, value, matches > 1, |from, to| {
            issues.push(DatasetIssue::RangeOverlap { dimension, from, to })
        });
    }
    if let Some((from, to)) = gap {
        issues.push(DatasetIssue::RangeGap { dimension, from, to });
    }
    if let Some((from, to)) = overlap {
        issues.push(DatasetIssue::RangeOverlap { dimension, from, to });
    }
    issues
}

/// Grows the current run while `hit` holds and flushes it when it ends.
fn extend_run(run: &mut Option<(u8, u8)>, value: u8, hit: bool, mut flush: impl FnMut(u8, u8)) {
    match (*run, hit) {
        (Some((from, _)), true) => *run = Some((from, value)),
        (None, true) => *run = Some((value, value)),
        (Some((from, to)), false) => {
            flush(from, to);
            *run = None;
        }
        (None, false) => {}
    }
}

/// A shape problem in one dimension, found at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetIssue {
    #[error("dimension {dimension}: slot '{label}' is missing")]
    MissingSlot {
        dimension: DimensionId,
        label: ApproachLabel,
    },

    #[error("dimension {dimension}: slot '{label}' is empty")]
    EmptySlot {
        dimension: DimensionId,
        label: ApproachLabel,
    },

    #[error("dimension {dimension}: no feedback ranges")]
    NoRanges { dimension: DimensionId },

    #[error("dimension {dimension}: range {lower}-{upper} has lower bound above upper bound")]
    InvertedRange {
        dimension: DimensionId,
        lower: i64,
        upper: i64,
    },

    #[error("dimension {dimension}: range {lower}-{upper} extends outside the scale")]
    RangeOutsideDomain {
        dimension: DimensionId,
        lower: i64,
        upper: i64,
    },

    #[error("dimension {dimension}: has both ranges and fixed slots; the slots are ignored")]
    MixedShape { dimension: DimensionId },

    #[error("dimension {dimension}: values {from}-{to} match no range")]
    RangeGap {
        dimension: DimensionId,
        from: u8,
        to: u8,
    },

    #[error("dimension {dimension}: values {from}-{to} match more than one range")]
    RangeOverlap {
        dimension: DimensionId,
        from: u8,
        to: u8,
    },
}

/// One survey axis: a question with a conservative and an aggressive anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    id: DimensionId,
    name: String,
    question: String,
    conservative_approach: String,
    aggressive_approach: String,
    scheme: LabelingScheme,
}

impl Dimension {
    pub fn new(
        id: DimensionId,
        name: impl Into<String>,
        question: impl Into<String>,
        conservative_approach: impl Into<String>,
        aggressive_approach: impl Into<String>,
        scheme: LabelingScheme,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            question: question.into(),
            conservative_approach: conservative_approach.into(),
            aggressive_approach: aggressive_approach.into(),
            scheme,
        }
    }

    pub fn id(&self) -> DimensionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// First word of the name, used where space is tight.
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn conservative_approach(&self) -> &str {
        &self.conservative_approach
    }

    pub fn aggressive_approach(&self) -> &str {
        &self.aggressive_approach
    }

    pub fn scheme(&self) -> &LabelingScheme {
        &self.scheme
    }

    /// Reports every shape problem of this dimension on `scale`.
    pub fn issues(&self, scale: Scale) -> Vec<DatasetIssue> {
        self.scheme.issues(self.id, scale)
    }
}
