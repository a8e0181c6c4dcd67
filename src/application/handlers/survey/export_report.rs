//! ExportReportHandler - Command handler for exporting survey reports.
//!
//! Renders the report as markdown, converts it to the requested format and
//! optionally writes it to disk. Works on an owned snapshot, so it can run
//! on the tokio runtime while the caller keeps editing responses.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::survey::SurveyReport;
use crate::ports::{
    DocumentError, DocumentExportService, ExportError, ExportFormat, ExportedDocument,
    GenerationOptions, ReportGenerator,
};

/// Command to export a survey report.
#[derive(Debug, Clone)]
pub struct ExportReportCommand {
    /// Target format.
    pub format: ExportFormat,
    /// Markdown generation options.
    pub options: GenerationOptions,
    /// File name without extension.
    pub base_filename: String,
    /// Write the result here when set.
    pub output_dir: Option<PathBuf>,
}

impl ExportReportCommand {
    /// Creates a command for a full document in `format`, kept in memory.
    pub fn new(format: ExportFormat, base_filename: impl Into<String>) -> Self {
        Self {
            format,
            options: GenerationOptions::full(),
            base_filename: base_filename.into(),
            output_dir: None,
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn written_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportReportResult {
    pub document: ExportedDocument,
    /// Where the document was written, if it was.
    pub path: Option<PathBuf>,
}

/// Error type for report export.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportReportError {
    /// Markdown generation failed.
    Generation(DocumentError),
    /// Conversion or writing failed.
    Export(ExportError),
    /// The JSON snapshot could not be serialized.
    Serialization(String),
    /// A spawned export task panicked or was cancelled.
    Task(String),
}

impl ExportReportError {
    /// True when the export backend is missing rather than the input bad.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ExportReportError::Export(err) if err.is_unavailable())
    }
}

impl std::fmt::Display for ExportReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportReportError::Generation(err) => write!(f, "Report generation failed: {}", err),
            ExportReportError::Export(err) => write!(f, "{}", err),
            ExportReportError::Serialization(msg) => {
                write!(f, "Report serialization failed: {}", msg)
            }
            ExportReportError::Task(msg) => write!(f, "Export task failed: {}", msg),
        }
    }
}

impl std::error::Error for ExportReportError {}

impl From<DocumentError> for ExportReportError {
    fn from(err: DocumentError) -> Self {
        ExportReportError::Generation(err)
    }
}

impl From<ExportError> for ExportReportError {
    fn from(err: ExportError) -> Self {
        ExportReportError::Export(err)
    }
}

impl From<serde_json::Error> for ExportReportError {
    fn from(err: serde_json::Error) -> Self {
        ExportReportError::Serialization(err.to_string())
    }
}

/// Handler for exporting survey reports.
///
/// # Dependencies
///
/// - `ReportGenerator`: Render the report as markdown
/// - `DocumentExportService`: Convert markdown to HTML or PDF
///
/// # Usage
///
/// ```rust,ignore
/// let handler = ExportReportHandler::new(generator, exporter);
/// let cmd = ExportReportCommand::new(ExportFormat::Html, "report");
/// let result = handler.handle(cmd, &report).await?;
/// ```
#[derive(Clone)]
pub struct ExportReportHandler {
    generator: Arc<dyn ReportGenerator>,
    exporter: Arc<dyn DocumentExportService>,
}

impl ExportReportHandler {
    pub fn new(
        generator: Arc<dyn ReportGenerator>,
        exporter: Arc<dyn DocumentExportService>,
    ) -> Self {
        Self {
            generator,
            exporter,
        }
    }

    pub async fn handle(
        &self,
        cmd: ExportReportCommand,
        report: &SurveyReport,
    ) -> Result<ExportReportResult, ExportReportError> {
        let format = cmd.format;
        match self.export(cmd, report).await {
            Ok(result) => {
                tracing::info!(
                    %format,
                    filename = %result.document.filename,
                    bytes = result.document.content.len(),
                    path = ?result.path,
                    "Exported report"
                );
                Ok(result)
            }
            Err(err) => {
                tracing::error!(%format, error = %err, "Report export failed");
                Err(err)
            }
        }
    }

    /// Runs `handle` on the tokio runtime against an owned snapshot.
    pub fn spawn(
        &self,
        cmd: ExportReportCommand,
        report: SurveyReport,
    ) -> JoinHandle<Result<ExportReportResult, ExportReportError>> {
        let handler = self.clone();
        tokio::spawn(async move { handler.handle(cmd, &report).await })
    }

    /// Awaits a spawned export, folding task failures into the error type.
    pub async fn join(
        handle: JoinHandle<Result<ExportReportResult, ExportReportError>>,
    ) -> Result<ExportReportResult, ExportReportError> {
        handle
            .await
            .map_err(|e| ExportReportError::Task(e.to_string()))?
    }

    async fn export(
        &self,
        cmd: ExportReportCommand,
        report: &SurveyReport,
    ) -> Result<ExportReportResult, ExportReportError> {
        let content = match cmd.format {
            ExportFormat::Json => serde_json::to_vec_pretty(report)?,
            ExportFormat::Markdown => self.generator.generate(report, &cmd.options)?.into_bytes(),
            ExportFormat::Html => {
                let markdown = self.generator.generate(report, &cmd.options)?;
                self.exporter.to_html(&markdown).await?.into_bytes()
            }
            ExportFormat::Pdf => {
                let markdown = self.generator.generate(report, &cmd.options)?;
                self.exporter.to_pdf(&markdown).await?
            }
        };

        let document = ExportedDocument::new(content, cmd.format, &cmd.base_filename);
        let path = match &cmd.output_dir {
            Some(dir) => Some(document.write_to(dir).await?),
            None => None,
        };

        Ok(ExportReportResult { document, path })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
