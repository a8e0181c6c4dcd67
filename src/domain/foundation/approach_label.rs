//! Approach label value object (seven ordered categories).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Strategic posture, ordered from most conservative to most aggressive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApproachLabel {
    StronglyConservative,
    ModeratelyConservative,
    SlightlyConservative,
    #[default]
    Balanced,
    SlightlyAggressive,
    ModeratelyAggressive,
    StronglyAggressive,
}

impl ApproachLabel {
    /// All labels in ascending order of aggressiveness.
    pub const ALL: [ApproachLabel; 7] = [
        ApproachLabel::StronglyConservative,
        ApproachLabel::ModeratelyConservative,
        ApproachLabel::SlightlyConservative,
        ApproachLabel::Balanced,
        ApproachLabel::SlightlyAggressive,
        ApproachLabel::ModeratelyAggressive,
        ApproachLabel::StronglyAggressive,
    ];

    /// Returns the label at `index`, saturating at the aggressive end.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Position in [`ApproachLabel::ALL`], 0 for the most conservative.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the display label, which is also the dataset slot name.
    pub fn label(&self) -> &'static str {
        match self {
            ApproachLabel::StronglyConservative => "Strongly Conservative",
            ApproachLabel::ModeratelyConservative => "Moderately Conservative",
            ApproachLabel::SlightlyConservative => "Slightly Conservative",
            ApproachLabel::Balanced => "Balanced",
            ApproachLabel::SlightlyAggressive => "Slightly Aggressive",
            ApproachLabel::ModeratelyAggressive => "Moderately Aggressive",
            ApproachLabel::StronglyAggressive => "Strongly Aggressive",
        }
    }

    /// Returns true for the three conservative-leaning labels.
    pub fn is_conservative(&self) -> bool {
        *self < ApproachLabel::Balanced
    }

    /// Returns true for the three aggressive-leaning labels.
    pub fn is_aggressive(&self) -> bool {
        *self > ApproachLabel::Balanced
    }

    /// Returns true for the midpoint label.
    pub fn is_balanced(&self) -> bool {
        *self == ApproachLabel::Balanced
    }
}

impl fmt::Display for ApproachLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ApproachLabel {
    type Err = ValidationError;

    /// Accepts display names ("Slightly Aggressive") and snake case
    /// ("slightly_aggressive"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', " ");
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.label().to_lowercase() == normalized)
            .ok_or_else(|| ValidationError::invalid_format("approach label", s))
    }
}
