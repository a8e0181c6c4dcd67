//! Response set - the per-session value map.
//!
//! Owned and mutated only by its caller. Every mutation returns the freshly
//! recomputed overall score, so there is no derived state to keep in sync.

use std::collections::BTreeMap;

use crate::domain::foundation::{DimensionId, DomainError, ErrorCode, SliderValue};

use super::{AggregationPolicy, ApproachScorer, Dataset, OverallScore};

/// Slider positions recorded so far in one session.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSet {
    scorer: ApproachScorer,
    dimension_ids: Vec<DimensionId>,
    values: BTreeMap<DimensionId, SliderValue>,
}

impl ResponseSet {
    /// Creates an empty response set for `dataset`.
    pub fn new(dataset: &Dataset, policy: AggregationPolicy) -> Self {
        Self {
            scorer: ApproachScorer::new(dataset.scale(), policy),
            dimension_ids: dataset.ids().collect(),
            values: BTreeMap::new(),
        }
    }

    pub fn scorer(&self) -> ApproachScorer {
        self.scorer
    }

    /// Records `raw` for `id`, clamped into the scale, and recomputes.
    pub fn set(&mut self, id: DimensionId, raw: i64) -> Result<OverallScore, DomainError> {
        self.ensure_known(id)?;
        let value = SliderValue::clamped(self.scorer.scale(), raw);
        if i64::from(value.value()) != raw {
            tracing::debug!(dimension = %id, raw, clamped = value.value(), "Clamped slider value");
        }
        self.values.insert(id, value);
        Ok(self.recompute())
    }

    /// Forgets the value for `id` and recomputes.
    pub fn clear(&mut self, id: DimensionId) -> Result<OverallScore, DomainError> {
        self.ensure_known(id)?;
        self.values.remove(&id);
        Ok(self.recompute())
    }

    /// Forgets every recorded value.
    pub fn reset(&mut self) -> OverallScore {
        self.values.clear();
        self.recompute()
    }

    /// The recorded value, or the scale midpoint for untouched sliders.
    pub fn value_of(&self, id: DimensionId) -> SliderValue {
        self.recorded(id)
            .unwrap_or_else(|| SliderValue::midpoint(self.scorer.scale()))
    }

    pub fn recorded(&self, id: DimensionId) -> Option<SliderValue> {
        self.values.get(&id).copied()
    }

    pub fn recorded_count(&self) -> usize {
        self.values.len()
    }

    /// Recorded values by dimension id.
    pub fn values(&self) -> &BTreeMap<DimensionId, SliderValue> {
        &self.values
    }

    /// Current overall score under the configured aggregation policy.
    pub fn recompute(&self) -> OverallScore {
        let overall = self
            .scorer
            .overall(self.values.values().copied(), self.dimension_ids.len());
        tracing::debug!(
            value = overall.value,
            label = %overall.label,
            contributing = overall.contributing,
            "Recomputed overall score"
        );
        overall
    }

    fn ensure_known(&self, id: DimensionId) -> Result<(), DomainError> {
        if self.dimension_ids.contains(&id) {
            Ok(())
        } else {
            Err(
                DomainError::new(ErrorCode::DimensionNotFound, format!("Dimension {} not found", id))
                    .with_detail("dimension", id.to_string()),
            )
        }
    }
}
