//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid PDF timeout: {0}s (must be 1-300)")]
    InvalidTimeout(u64),

    #[error("Invalid base filename: {0:?}")]
    InvalidBaseFilename(String),

    #[error("Invalid recipient email address: {0}")]
    InvalidRecipient(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
