//! Application configuration module
//!
//! Type-safe configuration loaded with the `config` and `dotenvy` crates from
//! an optional TOML file and environment variables. Environment variables use
//! the `STRATEGY_SPECTRUM` prefix and `__` between nested keys, and win over
//! the file.
//!
//! # Example
//!
//! ```no_run
//! use strategy_spectrum::config::AppConfig;
//!
//! let config = AppConfig::load(None).expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Scoring on the {} scale", config.survey.scale);
//! ```

mod error;
mod export;
mod logging;
mod mail;
mod survey;

pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use logging::LoggingConfig;
pub use mail::MailConfig;
pub use survey::SurveyConfig;

use serde::Deserialize;
use std::path::Path;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Dataset, scale and aggregation
    #[serde(default)]
    pub survey: SurveyConfig,

    /// Document export (Pandoc, output location)
    #[serde(default)]
    pub export: ExportConfig,

    /// Mail draft defaults
    #[serde(default)]
    pub mail: MailConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `file` if given and present (format picked by extension)
    /// 3. Reads environment variables with `STRATEGY_SPECTRUM` prefix
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `STRATEGY_SPECTRUM__SURVEY__SCALE=discrete` -> `survey.scale = discrete`
    /// - `STRATEGY_SPECTRUM__EXPORT__PDF_TIMEOUT_SECS=60` -> `export.pdf_timeout_secs = 60`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is malformed or a value cannot be
    /// parsed into its expected type.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("STRATEGY_SPECTRUM")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step
    pub fn load_validated(file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Self::load(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.survey.validate()?;
        self.export.validate()?;
        self.mail.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Scale;
    use crate::domain::survey::AggregationPolicy;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "STRATEGY_SPECTRUM__SURVEY__SCALE",
        "STRATEGY_SPECTRUM__SURVEY__AGGREGATION",
        "STRATEGY_SPECTRUM__EXPORT__PDF_TIMEOUT_SECS",
        "STRATEGY_SPECTRUM__MAIL__RECIPIENT",
        "STRATEGY_SPECTRUM__LOGGING__JSON",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load(None);

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.survey.scale, Scale::Percentage);
        assert_eq!(config.export.pdf_timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("STRATEGY_SPECTRUM__SURVEY__SCALE", "discrete");
        env::set_var("STRATEGY_SPECTRUM__SURVEY__AGGREGATION", "recorded_only");
        env::set_var("STRATEGY_SPECTRUM__EXPORT__PDF_TIMEOUT_SECS", "90");
        env::set_var("STRATEGY_SPECTRUM__LOGGING__JSON", "true");
        let result = AppConfig::load(None);
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.survey.scale, Scale::Discrete);
        assert_eq!(config.survey.aggregation, AggregationPolicy::RecordedOnly);
        assert_eq!(config.export.pdf_timeout_secs, 90);
        assert!(config.logging.json);
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[survey]\nscale = \"discrete\"\n\n[mail]\nrecipient = \"board@example.com\"\nsubject = \"Q3\""
        )
        .unwrap();
        env::set_var("STRATEGY_SPECTRUM__MAIL__RECIPIENT", "cto@example.com");
        let result = AppConfig::load(Some(file.path()));
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.survey.scale, Scale::Discrete);
        assert_eq!(config.mail.subject, "Q3");
        assert_eq!(config.mail.recipient.as_deref(), Some("cto@example.com"));
    }

    #[test]
    fn test_missing_file_is_ignored() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load(Some(Path::new("/nonexistent/strategy-spectrum.toml")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_validated_rejects_bad_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("STRATEGY_SPECTRUM__EXPORT__PDF_TIMEOUT_SECS", "0");
        let result = AppConfig::load_validated(None);
        clear_env();

        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed(ValidationError::InvalidTimeout(0)))
        ));
    }
}
