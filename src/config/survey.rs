//! Survey configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::foundation::Scale;
use crate::domain::survey::AggregationPolicy;

use super::error::ValidationError;

/// Dataset and scoring configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SurveyConfig {
    /// JSON dataset to load. The bundled dataset is used when unset.
    pub dataset_path: Option<PathBuf>,

    /// Slider domain
    #[serde(default)]
    pub scale: Scale,

    /// How unset dimensions enter the overall score
    #[serde(default)]
    pub aggregation: AggregationPolicy,

    /// Reject datasets with missing slots or uncovered ranges
    #[serde(default)]
    pub strict_dataset: bool,

    /// Report title override
    pub title: Option<String>,
}

impl SurveyConfig {
    /// Validate survey configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = &self.dataset_path {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::MissingRequired("survey.dataset_path"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survey_config_defaults() {
        let config = SurveyConfig::default();
        assert!(config.dataset_path.is_none());
        assert_eq!(config.scale, Scale::Percentage);
        assert_eq!(config.aggregation, AggregationPolicy::DefaultMidpoint);
        assert!(!config.strict_dataset);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_dataset_path_is_invalid() {
        let config = SurveyConfig {
            dataset_path: Some(PathBuf::new()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("survey.dataset_path"))
        );
    }
}
