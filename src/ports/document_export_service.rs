//! Document Export Service Port - Format conversion interface.
//!
//! Converts a generated markdown report into the format the user asked
//! for. A missing or failing backend surfaces as an [`ExportError`] so the
//! caller can report it and carry on with the session untouched.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for exporting markdown reports to other formats.
///
/// # Contract
///
/// Implementations must:
/// - Convert valid markdown to the target format
/// - Return `ServiceUnavailable` when an external converter is missing
/// - Never panic on conversion failure
///
/// # Usage
///
/// ```rust,ignore
/// let exporter: &dyn DocumentExportService = get_service();
/// let html = exporter.to_html("# Strategy Report\n\nBalanced").await?;
/// ```
#[async_trait]
pub trait DocumentExportService: Send + Sync {
    /// Convert markdown to PDF bytes.
    async fn to_pdf(&self, markdown: &str) -> Result<Vec<u8>, ExportError>;

    /// Convert markdown to a complete, styled HTML page.
    async fn to_html(&self, markdown: &str) -> Result<String, ExportError>;

    /// Whether conversions needing an external backend can run.
    async fn is_available(&self) -> bool;
}

/// Formats a report can be exported to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// The generated markdown as-is.
    #[default]
    Markdown,
    /// Styled HTML page.
    Html,
    /// Paginated PDF, requires Pandoc.
    Pdf,
    /// The report snapshot as JSON.
    Json,
}

impl ExportFormat {
    /// MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Html => "text/html; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Json => "application/json",
        }
    }

    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Json => "json",
        })
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "html" | "htm" => Ok(ExportFormat::Html),
            "pdf" => Ok(ExportFormat::Pdf),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Exported content ready to be written or attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub content: Vec<u8>,
    pub format: ExportFormat,
    /// Suggested file name, `<base>.<extension>`.
    pub filename: String,
}

impl ExportedDocument {
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            format,
            filename: format!("{}.{}", base_filename, format.extension()),
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    /// Writes the document into `dir` under its suggested name.
    pub async fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| ExportError::io(format!("creating {}: {}", dir.display(), e)))?;
        let path = dir.join(&self.filename);
        tokio::fs::write(&path, &self.content)
            .await
            .map_err(|e| ExportError::io(format!("writing {}: {}", path.display(), e)))?;
        Ok(path)
    }
}

/// Errors that can occur during document export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// External converter (e.g. Pandoc) is missing or unusable.
    #[error("Export service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("{format} conversion failed: {reason}")]
    ConversionFailed { format: ExportFormat, reason: String },

    #[error("Conversion timed out after {0} seconds")]
    Timeout(u64),

    #[error("I/O error during export: {0}")]
    Io(String),
}

impl ExportError {
    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }

    pub fn conversion_failed(format: ExportFormat, reason: impl Into<String>) -> Self {
        Self::ConversionFailed {
            format,
            reason: reason.into(),
        }
    }

    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io(reason.into())
    }

    /// True when retrying after installing or fixing the backend may help.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_) | Self::Timeout(_))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
