//! Terminal rendering of datasets and reports.

use crate::domain::survey::{value_bar, Dataset, SurveyReport};

const BAR_WIDTH: usize = 24;

/// One block per dimension: id, name, question and the two poles.
pub fn dimensions_text(dataset: &Dataset) -> String {
    let mut out = format!(
        "{} ({} dimensions, {}-{} scale)\n",
        dataset.title(),
        dataset.len(),
        dataset.scale().min(),
        dataset.scale().max()
    );
    for dimension in dataset.dimensions() {
        out.push_str(&format!("\n[{}] {}\n", dimension.id(), dimension.name()));
        if !dimension.question().is_empty() {
            out.push_str(&format!("    {}\n", dimension.question()));
        }
        out.push_str(&format!(
            "    {} <-> {}\n",
            dimension.conservative_approach(),
            dimension.aggressive_approach()
        ));
    }
    out
}

/// Per-dimension bars and labels, then the overall line.
///
/// Untouched sliders are marked so a midpoint default is not mistaken for
/// an answer.
pub fn report_text(report: &SurveyReport, with_feedback: bool) -> String {
    let mut out = String::new();
    for result in &report.dimensions {
        out.push_str(&format!(
            "[{}] {}\n    [{}] {:>3}  {}{}\n",
            result.id,
            result.name,
            value_bar(result.value.as_f64(), report.scale, BAR_WIDTH),
            result.value,
            result.label,
            if result.recorded { "" } else { "  (default)" }
        ));
        if with_feedback && !result.feedback.is_empty() {
            out.push_str(&format!("    {}\n", result.feedback));
        }
        if with_feedback {
            if let Some(example) = &result.example {
                out.push_str(&format!("    Example: {}\n", example));
            }
        }
    }
    out.push('\n');
    out.push_str(&overall_text(report));
    out
}

/// Overall label with its mean and the leaning sentence.
pub fn overall_text(report: &SurveyReport) -> String {
    format!(
        "[{}] {}\n{}\n",
        value_bar(report.overall.value, report.scale, BAR_WIDTH),
        report.summary_line(),
        report.leaning_sentence()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ApproachLabel, DimensionId, Scale};
    use crate::domain::survey::{
        AggregationPolicy, Dimension, FeedbackRange, LabelingScheme, ResponseSet,
    };
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        let dims = vec![
            Dimension::new(
                DimensionId::new(1),
                "Automation Scope",
                "How much do you automate?",
                "Assist people",
                "Replace workflows",
                LabelingScheme::RangeBucketed(vec![
                    FeedbackRange::new(0, 49, "Keep humans in the loop."),
                    FeedbackRange::new(50, 100, "Automate end to end."),
                ]),
            ),
            Dimension::new(
                DimensionId::new(2),
                "Model Sourcing",
                "",
                "Buy",
                "Build",
                LabelingScheme::RangeBucketed(vec![FeedbackRange::new(0, 100, "Any.")]),
            ),
        ];
        Dataset::new(Scale::Percentage, dims).unwrap()
    }

    #[test]
    fn dimensions_text_lists_poles() {
        let text = dimensions_text(&dataset());

        assert!(text.starts_with("AI Strategy Spectrum (2 dimensions, 0-100 scale)"));
        assert!(text.contains("[1] Automation Scope\n    How much do you automate?\n"));
        assert!(text.contains("    Buy <-> Build\n"));
    }

    #[test]
    fn report_text_marks_defaults_and_shows_feedback() {
        let ds = dataset();
        let mut responses = ResponseSet::new(&ds, AggregationPolicy::DefaultMidpoint);
        responses.set(DimensionId::new(1), 10).unwrap();
        let report = SurveyReport::build(&ds, &responses, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());

        let text = report_text(&report, true);

        assert!(text.contains(" 10  Strongly Conservative\n    Keep humans in the loop.\n"));
        assert!(text.contains(" 50  Balanced  (default)\n"));
        assert!(text.contains("Overall approach:"));

        let bare = report_text(&report, false);
        assert!(!bare.contains("Keep humans in the loop."));
        assert_eq!(report.overall.label, ApproachLabel::SlightlyConservative);
    }
}
