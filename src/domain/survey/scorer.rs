//! Approach Scorer - maps slider positions to labels and feedback.
//!
//! The scorer is a pure function of its inputs: it holds only the scale and
//! the aggregation policy, both `Copy`, and never mutates anything.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ApproachLabel, Scale, SliderValue, ValidationError};

use super::{Dimension, LabelingScheme};

/// How dimensions without a recorded value enter the overall mean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Every dimension contributes; unset ones sit at the scale midpoint.
    #[default]
    DefaultMidpoint,
    /// Only recorded values contribute to sum and count.
    RecordedOnly,
}

impl std::fmt::Display for AggregationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AggregationPolicy::DefaultMidpoint => "default_midpoint",
            AggregationPolicy::RecordedOnly => "recorded_only",
        })
    }
}

impl std::str::FromStr for AggregationPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "default_midpoint" | "midpoint" => Ok(AggregationPolicy::DefaultMidpoint),
            "recorded_only" | "recorded" => Ok(AggregationPolicy::RecordedOnly),
            other => Err(ValidationError::invalid_format(
                "aggregation",
                format!("unknown policy '{}', expected default_midpoint or recorded_only", other),
            )),
        }
    }
}

/// Aggregate of all per-dimension values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    /// Arithmetic mean of the contributing values.
    pub value: f64,
    pub label: ApproachLabel,
    /// Number of dimensions that entered the mean.
    pub contributing: usize,
}

/// Labels a value on `scale`.
///
/// The label index is the number of boundaries at or below `value`, so a
/// value sitting exactly on a boundary takes the more aggressive label.
/// Out-of-domain values are clamped first.
pub fn label_for(value: f64, scale: Scale) -> ApproachLabel {
    let value = scale.clamp_f64(value);
    let index = scale.boundaries().iter().filter(|b| value >= **b).count();
    ApproachLabel::from_index(index)
}

/// Stateless scorer for one scale and aggregation policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApproachScorer {
    scale: Scale,
    policy: AggregationPolicy,
}

impl ApproachScorer {
    pub fn new(scale: Scale, policy: AggregationPolicy) -> Self {
        Self { scale, policy }
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    /// Label for a single slider position.
    pub fn label_for(&self, value: SliderValue) -> ApproachLabel {
        label_for(value.as_f64(), self.scale)
    }

    /// Feedback text for `value`, or `""` when the dataset has no match.
    pub fn feedback_for<'d>(&self, dimension: &'d Dimension, value: SliderValue) -> &'d str {
        let found = match dimension.scheme() {
            LabelingScheme::FixedSlot(_) => dimension
                .scheme()
                .slot(self.label_for(value))
                .map(|slot| slot.feedback_text()),
            LabelingScheme::RangeBucketed(_) => dimension
                .scheme()
                .range_for(value.value())
                .map(|range| range.text.as_str()),
        };

        found.unwrap_or_else(|| {
            tracing::debug!(
                dimension = %dimension.id(),
                value = value.value(),
                "No feedback entry matches value"
            );
            ""
        })
    }

    /// Example text attached to the matching fixed slot, if any.
    pub fn example_for<'d>(&self, dimension: &'d Dimension, value: SliderValue) -> Option<&'d str> {
        dimension
            .scheme()
            .slot(self.label_for(value))
            .and_then(|slot| slot.example.as_deref())
            .filter(|example| !example.trim().is_empty())
    }

    /// Mean of the recorded values over `dimension_count` dimensions.
    ///
    /// With no contributing dimension the result is the scale midpoint.
    pub fn overall<I>(&self, recorded: I, dimension_count: usize) -> OverallScore
    where
        I: IntoIterator<Item = SliderValue>,
    {
        let (sum, recorded_count) = recorded
            .into_iter()
            .fold((0.0_f64, 0_usize), |(sum, n), v| (sum + v.as_f64(), n + 1));

        let (sum, count) = match self.policy {
            AggregationPolicy::RecordedOnly => (sum, recorded_count),
            AggregationPolicy::DefaultMidpoint => {
                let unset = dimension_count.saturating_sub(recorded_count);
                let sum = sum + unset as f64 * f64::from(self.scale.midpoint());
                (sum, recorded_count + unset)
            }
        };

        let value = if count == 0 {
            f64::from(self.scale.midpoint())
        } else {
            sum / count as f64
        };

        OverallScore {
            value,
            label: label_for(value, self.scale),
            contributing: count,
        }
    }

    /// Label of [`ApproachScorer::overall`].
    pub fn overall_label<I>(&self, recorded: I, dimension_count: usize) -> ApproachLabel
    where
        I: IntoIterator<Item = SliderValue>,
    {
        self.overall(recorded, dimension_count).label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DimensionId;
    use crate::domain::survey::{FeedbackRange, SlotText};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn pct(v: i64) -> SliderValue {
        SliderValue::clamped(Scale::Percentage, v)
    }

    fn step(v: i64) -> SliderValue {
        SliderValue::clamped(Scale::Discrete, v)
    }

    fn fixed_dimension() -> Dimension {
        let slots: BTreeMap<_, _> = ApproachLabel::ALL
            .iter()
            .map(|label| (*label, SlotText::new(format!("{} text", label))))
            .collect();
        Dimension::new(
            DimensionId::new(1),
            "Adoption Pace",
            "How fast do you adopt new models?",
            "Wait and see",
            "First mover",
            LabelingScheme::FixedSlot(slots),
        )
    }

    fn ranged_dimension(ranges: Vec<FeedbackRange>) -> Dimension {
        Dimension::new(
            DimensionId::new(2),
            "Risk Appetite",
            "How much risk do you accept?",
            "Minimal",
            "Substantial",
            LabelingScheme::RangeBucketed(ranges),
        )
    }

    #[test]
    fn aggregation_policy_parses_config_spellings() {
        assert_eq!("recorded_only".parse::<AggregationPolicy>().unwrap(), AggregationPolicy::RecordedOnly);
        assert_eq!("default-midpoint".parse::<AggregationPolicy>().unwrap(), AggregationPolicy::DefaultMidpoint);
        assert!("mean".parse::<AggregationPolicy>().is_err());
        assert_eq!(AggregationPolicy::RecordedOnly.to_string(), "recorded_only");
    }

    // ───────────────────────────────────────────────────────────────
    // label_for
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn discrete_steps_map_one_label_each() {
        let labels: Vec<_> = (1..=7).map(|v| label_for(v as f64, Scale::Discrete)).collect();
        assert_eq!(labels, ApproachLabel::ALL.to_vec());
    }

    #[test]
    fn discrete_midpoint_is_balanced() {
        assert_eq!(label_for(4.0, Scale::Discrete), ApproachLabel::Balanced);
    }

    #[test]
    fn discrete_fractional_mean_rounds_half_up() {
        assert_eq!(label_for(3.49, Scale::Discrete), ApproachLabel::SlightlyConservative);
        assert_eq!(label_for(3.5, Scale::Discrete), ApproachLabel::Balanced);
        assert_eq!(label_for(4.5, Scale::Discrete), ApproachLabel::SlightlyAggressive);
    }

    #[test]
    fn percentage_anchor_values() {
        assert_eq!(label_for(0.0, Scale::Percentage), ApproachLabel::StronglyConservative);
        assert_eq!(label_for(50.0, Scale::Percentage), ApproachLabel::Balanced);
        assert_eq!(label_for(100.0, Scale::Percentage), ApproachLabel::StronglyAggressive);
    }

    #[test]
    fn percentage_boundary_resolves_to_upper_bucket() {
        assert_eq!(label_for(14.29, Scale::Percentage), ApproachLabel::StronglyConservative);
        assert_eq!(label_for(14.3, Scale::Percentage), ApproachLabel::ModeratelyConservative);
        assert_eq!(label_for(57.2, Scale::Percentage), ApproachLabel::SlightlyAggressive);
        assert_eq!(label_for(85.8, Scale::Percentage), ApproachLabel::StronglyAggressive);
    }

    #[test]
    fn integer_percentages_fill_expected_buckets() {
        let expected = [
            (0, 14, ApproachLabel::StronglyConservative),
            (15, 28, ApproachLabel::ModeratelyConservative),
            (29, 42, ApproachLabel::SlightlyConservative),
            (43, 57, ApproachLabel::Balanced),
            (58, 71, ApproachLabel::SlightlyAggressive),
            (72, 85, ApproachLabel::ModeratelyAggressive),
            (86, 100, ApproachLabel::StronglyAggressive),
        ];
        for (lo, hi, label) in expected {
            for v in lo..=hi {
                assert_eq!(label_for(v as f64, Scale::Percentage), label, "value {}", v);
            }
        }
    }

    #[test]
    fn out_of_domain_values_are_clamped() {
        assert_eq!(label_for(-10.0, Scale::Percentage), ApproachLabel::StronglyConservative);
        assert_eq!(label_for(12.0, Scale::Discrete), ApproachLabel::StronglyAggressive);
    }

    // ───────────────────────────────────────────────────────────────
    // feedback_for
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn fixed_slot_feedback_follows_label() {
        let scorer = ApproachScorer::new(Scale::Discrete, AggregationPolicy::default());
        let dim = fixed_dimension();

        assert_eq!(scorer.feedback_for(&dim, step(1)), "Strongly Conservative text");
        assert_eq!(scorer.feedback_for(&dim, step(4)), "Balanced text");
        assert_eq!(scorer.feedback_for(&dim, step(7)), "Strongly Aggressive text");
    }

    #[test]
    fn fixed_slot_prefers_feedback_variant_and_exposes_example() {
        let mut slots = BTreeMap::new();
        slots.insert(
            ApproachLabel::Balanced,
            SlotText::new("Balanced posture")
                .with_feedback("Keep a portfolio of bets")
                .with_example("Pilot two vendors in parallel"),
        );
        let dim = Dimension::new(
            DimensionId::new(5),
            "Vendor Strategy",
            "?",
            "One vendor",
            "Many vendors",
            LabelingScheme::FixedSlot(slots),
        );
        let scorer = ApproachScorer::new(Scale::Percentage, AggregationPolicy::default());

        assert_eq!(scorer.feedback_for(&dim, pct(50)), "Keep a portfolio of bets");
        assert_eq!(scorer.example_for(&dim, pct(50)), Some("Pilot two vendors in parallel"));
        assert_eq!(scorer.example_for(&dim, pct(0)), None);
    }

    #[test]
    fn missing_slot_yields_empty_feedback() {
        let mut slots = BTreeMap::new();
        slots.insert(ApproachLabel::Balanced, SlotText::new("only balanced"));
        let dim = Dimension::new(
            DimensionId::new(9),
            "Sparse",
            "?",
            "a",
            "b",
            LabelingScheme::FixedSlot(slots),
        );
        let scorer = ApproachScorer::new(Scale::Percentage, AggregationPolicy::default());

        assert_eq!(scorer.feedback_for(&dim, pct(95)), "");
    }

    #[test]
    fn range_feedback_uses_inclusive_bounds() {
        let dim = ranged_dimension(vec![
            FeedbackRange::new(0, 49, "cautious"),
            FeedbackRange::new(50, 100, "bold"),
        ]);
        let scorer = ApproachScorer::new(Scale::Percentage, AggregationPolicy::default());

        assert_eq!(scorer.feedback_for(&dim, pct(0)), "cautious");
        assert_eq!(scorer.feedback_for(&dim, pct(49)), "cautious");
        assert_eq!(scorer.feedback_for(&dim, pct(50)), "bold");
        assert_eq!(scorer.feedback_for(&dim, pct(100)), "bold");
        assert_eq!(scorer.example_for(&dim, pct(100)), None);
    }

    #[test]
    fn range_gap_yields_empty_feedback() {
        let dim = ranged_dimension(vec![FeedbackRange::new(0, 40, "low")]);
        let scorer = ApproachScorer::new(Scale::Percentage, AggregationPolicy::default());

        assert_eq!(scorer.feedback_for(&dim, pct(41)), "");
    }

    // ───────────────────────────────────────────────────────────────
    // overall
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn overall_of_twenty_fifty_eighty_is_balanced() {
        let scorer = ApproachScorer::new(Scale::Percentage, AggregationPolicy::RecordedOnly);

        let overall = scorer.overall([pct(20), pct(50), pct(80)], 3);

        assert!((overall.value - 50.0).abs() < f64::EPSILON);
        assert_eq!(overall.label, ApproachLabel::Balanced);
        assert_eq!(overall.contributing, 3);
    }

    #[test]
    fn recorded_only_ignores_unset_dimensions() {
        let scorer = ApproachScorer::new(Scale::Percentage, AggregationPolicy::RecordedOnly);

        let overall = scorer.overall([pct(90)], 5);

        assert!((overall.value - 90.0).abs() < f64::EPSILON);
        assert_eq!(overall.contributing, 1);
        assert_eq!(overall.label, ApproachLabel::StronglyAggressive);
    }

    #[test]
    fn default_midpoint_fills_unset_dimensions() {
        let scorer = ApproachScorer::new(Scale::Percentage, AggregationPolicy::DefaultMidpoint);

        let overall = scorer.overall([pct(100)], 2);

        assert!((overall.value - 75.0).abs() < f64::EPSILON);
        assert_eq!(overall.contributing, 2);
        assert_eq!(overall.label, ApproachLabel::ModeratelyAggressive);
    }

    #[test]
    fn no_contributors_is_balanced_midpoint() {
        for policy in [AggregationPolicy::RecordedOnly, AggregationPolicy::DefaultMidpoint] {
            let scorer = ApproachScorer::new(Scale::Discrete, policy);
            let overall = scorer.overall(std::iter::empty(), 0);
            assert_eq!(overall.value, 4.0);
            assert_eq!(overall.label, ApproachLabel::Balanced);
            assert_eq!(overall.contributing, 0);
        }

        let scorer = ApproachScorer::new(Scale::Percentage, AggregationPolicy::RecordedOnly);
        assert_eq!(scorer.overall_label(std::iter::empty(), 4), ApproachLabel::Balanced);
    }

    #[test]
    fn discrete_overall_of_untouched_sliders_is_balanced() {
        let scorer = ApproachScorer::new(Scale::Discrete, AggregationPolicy::DefaultMidpoint);
        assert_eq!(scorer.overall_label(std::iter::empty(), 3), ApproachLabel::Balanced);
    }

    // ───────────────────────────────────────────────────────────────
    // Properties
    // ───────────────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn percentage_labels_are_monotonic(a in 0u8..=100, b in 0u8..=100) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                label_for(f64::from(lo), Scale::Percentage) <= label_for(f64::from(hi), Scale::Percentage)
            );
        }

        #[test]
        fn continuous_labels_are_monotonic(a in -20.0f64..120.0, b in -20.0f64..120.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(label_for(lo, Scale::Percentage) <= label_for(hi, Scale::Percentage));
            prop_assert!(label_for(lo / 14.0, Scale::Discrete) <= label_for(hi / 14.0, Scale::Discrete));
        }

        #[test]
        fn scoring_is_idempotent(v in 0i64..=100) {
            let scorer = ApproachScorer::new(Scale::Percentage, AggregationPolicy::default());
            let dim = fixed_dimension();
            prop_assert_eq!(scorer.label_for(pct(v)), scorer.label_for(pct(v)));
            prop_assert_eq!(scorer.feedback_for(&dim, pct(v)), scorer.feedback_for(&dim, pct(v)));
        }

        #[test]
        fn overall_stays_inside_domain(values in proptest::collection::vec(0i64..=100, 0..12)) {
            let scorer = ApproachScorer::new(Scale::Percentage, AggregationPolicy::RecordedOnly);
            let overall = scorer.overall(values.iter().map(|v| pct(*v)), values.len());
            prop_assert!((0.0..=100.0).contains(&overall.value));
        }
    }
}
