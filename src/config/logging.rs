//! Logging configuration

use serde::Deserialize;

use super::error::ValidationError;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Log output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Validate logging configuration
    ///
    /// Accepts a bare level or a full filter directive such as
    /// `strategy_spectrum=debug,warn`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let level = self.level.trim().to_ascii_lowercase();
        if level.is_empty() {
            return Err(ValidationError::InvalidLogLevel(self.level.clone()));
        }
        if !level.contains(['=', ',']) && !LEVELS.contains(&level.as_str()) {
            return Err(ValidationError::InvalidLogLevel(self.level.clone()));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
        assert!(!config.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_accepts_levels_and_directives() {
        for level in ["INFO", "debug", "strategy_spectrum=trace,warn"] {
            let config = LoggingConfig {
                level: level.to_string(),
                json: false,
            };
            assert!(config.validate().is_ok(), "{} should be accepted", level);
        }
    }

    #[test]
    fn test_rejects_unknown_level() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            json: false,
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidLogLevel("verbose".to_string()))
        );
    }
}
