//! Slider scales and the clamped slider value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

const DISCRETE_BOUNDARIES: [f64; 6] = [1.5, 2.5, 3.5, 4.5, 5.5, 6.5];
const PERCENTAGE_BOUNDARIES: [f64; 6] = [14.3, 28.6, 42.9, 57.2, 71.5, 85.8];

/// Integer domain of every slider in a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    /// One step per label, 1 through 7.
    Discrete,
    /// 0 through 100.
    #[default]
    Percentage,
}

impl Scale {
    /// Smallest slider position.
    pub fn min(&self) -> u8 {
        match self {
            Scale::Discrete => 1,
            Scale::Percentage => 0,
        }
    }

    /// Largest slider position.
    pub fn max(&self) -> u8 {
        match self {
            Scale::Discrete => 7,
            Scale::Percentage => 100,
        }
    }

    /// Default position for a slider nobody has touched.
    pub fn midpoint(&self) -> u8 {
        match self {
            Scale::Discrete => 4,
            Scale::Percentage => 50,
        }
    }

    /// Ascending label boundaries. A value strictly below `boundaries()[k]`
    /// (and at or above the previous one) takes label `k`; a value at or
    /// above the last boundary takes the most aggressive label.
    pub fn boundaries(&self) -> &'static [f64; 6] {
        match self {
            Scale::Discrete => &DISCRETE_BOUNDARIES,
            Scale::Percentage => &PERCENTAGE_BOUNDARIES,
        }
    }

    /// Returns true if `value` lies inside the domain.
    pub fn contains(&self, value: i64) -> bool {
        (i64::from(self.min())..=i64::from(self.max())).contains(&value)
    }

    /// Clamps a continuous value (e.g. a mean) into the domain.
    pub fn clamp_f64(&self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::from(self.midpoint());
        }
        value.clamp(f64::from(self.min()), f64::from(self.max()))
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Discrete => write!(f, "discrete"),
            Scale::Percentage => write!(f, "percentage"),
        }
    }
}

impl FromStr for Scale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discrete" | "1-7" => Ok(Scale::Discrete),
            "percentage" | "percent" | "0-100" => Ok(Scale::Percentage),
            other => Err(ValidationError::invalid_format(
                "scale",
                format!("unknown scale '{}', expected discrete or percentage", other),
            )),
        }
    }
}

/// A slider position, always inside its scale's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SliderValue(u8);

impl SliderValue {
    /// Creates a value, clamping `raw` into the scale's domain.
    pub fn clamped(scale: Scale, raw: i64) -> Self {
        let clamped = raw.clamp(i64::from(scale.min()), i64::from(scale.max()));
        // The clamp bounds come from u8 values.
        Self(clamped as u8)
    }

    /// Creates a value, returning an error if `raw` is outside the domain.
    pub fn try_new(scale: Scale, raw: i64) -> Result<Self, ValidationError> {
        if !scale.contains(raw) {
            return Err(ValidationError::out_of_range(
                "slider value",
                i64::from(scale.min()),
                i64::from(scale.max()),
                raw,
            ));
        }
        Ok(Self::clamped(scale, raw))
    }

    /// The scale's default position.
    pub fn midpoint(scale: Scale) -> Self {
        Self(scale.midpoint())
    }

    /// Returns the position as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the position as f64 for averaging and thresholds.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Display for SliderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
