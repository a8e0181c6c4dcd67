//! Export configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Document export configuration (Pandoc, output location)
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Pandoc executable. Searched on PATH when unset.
    pub pandoc_path: Option<String>,

    /// Seconds to wait for Pandoc before giving up
    #[serde(default = "default_pdf_timeout")]
    pub pdf_timeout_secs: u64,

    /// Embed the stock stylesheet in HTML exports
    #[serde(default = "default_true")]
    pub include_default_css: bool,

    /// Directory exported files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name without extension
    #[serde(default = "default_base_filename")]
    pub base_filename: String,
}

impl ExportConfig {
    /// Validate export configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pdf_timeout_secs == 0 || self.pdf_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout(self.pdf_timeout_secs));
        }
        let name = self.base_filename.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(ValidationError::InvalidBaseFilename(self.base_filename.clone()));
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pandoc_path: None,
            pdf_timeout_secs: default_pdf_timeout(),
            include_default_css: true,
            output_dir: default_output_dir(),
            base_filename: default_base_filename(),
        }
    }
}

fn default_pdf_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_base_filename() -> String {
    "ai-strategy-report".to_string()
}
