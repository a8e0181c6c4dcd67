//! Survey report - owned snapshot of everything derived from a session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ApproachLabel, DimensionId, Scale, SliderValue};

use super::{Dataset, OverallScore, ResponseSet};

/// Derived values for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionResult {
    pub id: DimensionId,
    pub name: String,
    pub question: String,
    pub conservative_approach: String,
    pub aggressive_approach: String,
    pub value: SliderValue,
    /// False when the value is the untouched midpoint.
    pub recorded: bool,
    pub label: ApproachLabel,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Snapshot consumed by presentation, document export and mail drafts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyReport {
    pub title: String,
    pub scale: Scale,
    pub generated_on: NaiveDate,
    pub overall: OverallScore,
    pub dimensions: Vec<DimensionResult>,
}

impl SurveyReport {
    /// Scores every dimension of `dataset` against `responses`.
    pub fn build(dataset: &Dataset, responses: &ResponseSet, generated_on: NaiveDate) -> Self {
        let scorer = responses.scorer();
        let dimensions = dataset
            .dimensions()
            .iter()
            .map(|dimension| {
                let value = responses.value_of(dimension.id());
                DimensionResult {
                    id: dimension.id(),
                    name: dimension.name().to_string(),
                    question: dimension.question().to_string(),
                    conservative_approach: dimension.conservative_approach().to_string(),
                    aggressive_approach: dimension.aggressive_approach().to_string(),
                    value,
                    recorded: responses.recorded(dimension.id()).is_some(),
                    label: scorer.label_for(value),
                    feedback: scorer.feedback_for(dimension, value).to_string(),
                    example: scorer.example_for(dimension, value).map(str::to_string),
                }
            })
            .collect();

        Self {
            title: dataset.title().to_string(),
            scale: dataset.scale(),
            generated_on,
            overall: responses.recompute(),
            dimensions,
        }
    }

    /// One-line overall summary.
    pub fn summary_line(&self) -> String {
        format!(
            "Overall approach: {} ({:.2} on a {}-{} scale)",
            self.overall.label,
            self.overall.value,
            self.scale.min(),
            self.scale.max()
        )
    }

    /// Sentence describing the overall leaning.
    pub fn leaning_sentence(&self) -> String {
        format!(
            "Your AI strategy leans towards a {} approach.",
            self.overall.label.label().to_lowercase()
        )
    }
}

/// Horizontal bar of `width` cells filled in proportion to `value`.
pub fn value_bar(value: f64, scale: Scale, width: usize) -> String {
    let min = f64::from(scale.min());
    let span = f64::from(scale.max()) - min;
    let fraction = ((scale.clamp_f64(value) - min) / span).clamp(0.0, 1.0);
    let filled = (fraction * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled.min(width)))
}
