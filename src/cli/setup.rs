//! Setup and initialization for the CLI
//!
//! Loads configuration, applies command-line overrides, installs the
//! tracing subscriber and opens the dataset.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::adapters::JsonDatasetSource;
use crate::config::{AppConfig, LoggingConfig, SurveyConfig};
use crate::domain::survey::Dataset;
use crate::ports::{DatasetError, DatasetSource};

use super::Cli;

/// Loads configuration and layers the global flags on top.
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    if let Some(path) = &cli.dataset {
        config.survey.dataset_path = Some(path.clone());
    }
    if let Some(scale) = cli.scale {
        config.survey.scale = scale;
    }
    if let Some(policy) = cli.aggregation {
        config.survey.aggregation = policy;
    }
    if cli.strict {
        config.survey.strict_dataset = true;
    }

    config.validate().context("validating configuration")?;
    Ok(config)
}

/// Installs the global subscriber. Logs go to stderr so stdout stays clean
/// for JSON and markdown output.
///
/// `RUST_LOG` wins over the configured level; `-v` flags win over both.
pub fn init_logging(config: &LoggingConfig, verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Opens the configured dataset, rejecting issues in strict mode.
pub fn open_dataset(config: &SurveyConfig) -> Result<Dataset, DatasetError> {
    let mut source = match &config.dataset_path {
        Some(path) => JsonDatasetSource::from_path(path, config.scale),
        None => JsonDatasetSource::bundled(config.scale),
    };
    if let Some(title) = &config.title {
        source = source.with_title(title.clone());
    }

    let loaded = source.load()?;
    if config.strict_dataset {
        loaded.into_strict()
    } else {
        Ok(loaded.dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Scale;
    use std::io::Write;

    #[test]
    fn open_dataset_defaults_to_bundled() {
        let dataset = open_dataset(&SurveyConfig::default()).unwrap();
        assert!(!dataset.is_empty());
        assert_eq!(dataset.scale(), Scale::Percentage);
    }

    #[test]
    fn open_dataset_applies_title_override() {
        let config = SurveyConfig {
            title: Some("Board Offsite".to_string()),
            ..SurveyConfig::default()
        };
        assert_eq!(open_dataset(&config).unwrap().title(), "Board Offsite");
    }

    #[test]
    fn strict_mode_rejects_incomplete_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{ "ID": 1, "Dimension": "Sparse", "Balanced": "only" }}]"#).unwrap();

        let lenient = SurveyConfig {
            dataset_path: Some(file.path().to_path_buf()),
            scale: Scale::Discrete,
            ..SurveyConfig::default()
        };
        let strict = SurveyConfig {
            strict_dataset: true,
            ..lenient.clone()
        };

        assert_eq!(open_dataset(&lenient).unwrap().len(), 1);
        assert!(matches!(open_dataset(&strict), Err(DatasetError::Rejected(_))));
    }
}
