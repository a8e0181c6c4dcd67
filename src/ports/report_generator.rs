//! Report Generator Port - Markdown generation interface.
//!
//! This port defines the contract for rendering a [`SurveyReport`] as a
//! markdown document. The export handler depends on this trait, while
//! adapters (like MarkdownReportGenerator) provide the implementation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::Scale;
use crate::domain::survey::{DimensionResult, SurveyReport};

/// Port for generating markdown documents from survey reports.
///
/// # Contract
///
/// Implementations must:
/// - Start with a level-one heading carrying the report title
/// - Include the overall label and the generation date in the header
/// - Emit one section per dimension, in report order, with its name,
///   the user's label and the matching feedback text
///
/// # Usage
///
/// ```rust,ignore
/// let generator: &dyn ReportGenerator = get_generator();
/// let markdown = generator.generate(&report, &GenerationOptions::full())?;
/// ```
pub trait ReportGenerator: Send + Sync {
    /// Generate the full markdown document.
    fn generate(
        &self,
        report: &SurveyReport,
        options: &GenerationOptions,
    ) -> Result<String, DocumentError>;

    /// Generate the title and overall summary block.
    fn generate_header(
        &self,
        report: &SurveyReport,
        options: &GenerationOptions,
    ) -> Result<String, DocumentError>;

    /// Generate the section for a single dimension.
    fn generate_section(
        &self,
        result: &DimensionResult,
        scale: Scale,
        options: &GenerationOptions,
    ) -> Result<String, DocumentError>;
}

/// Options for report generation.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Repeat each dimension's question under its heading.
    pub include_questions: bool,

    /// Include slot examples when the dataset provides them.
    pub include_examples: bool,

    /// Draw a text bar for each slider position.
    pub include_value_bars: bool,

    /// Output format variant.
    pub format: DocumentFormat,
}

impl GenerationOptions {
    /// Options for a complete document.
    pub fn full() -> Self {
        Self {
            include_questions: true,
            include_examples: true,
            include_value_bars: true,
            format: DocumentFormat::Full,
        }
    }

    /// Options for a labels-only overview.
    pub fn summary() -> Self {
        Self {
            include_questions: false,
            include_examples: false,
            include_value_bars: false,
            format: DocumentFormat::Summary,
        }
    }
}

/// Document format variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Every dimension with feedback text.
    #[default]
    Full,

    /// Overall label plus one table row per dimension.
    Summary,
}

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Missing required data for generation.
    #[error("Missing required data: {field}")]
    MissingData { field: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {0}")]
    TemplateError(String),
}

impl DocumentError {
    /// Creates a missing data error.
    pub fn missing_data(field: impl Into<String>) -> Self {
        Self::MissingData {
            field: field.into(),
        }
    }

    /// Creates a template error.
    pub fn template(message: impl Into<String>) -> Self {
        Self::TemplateError(message.into())
    }
}
