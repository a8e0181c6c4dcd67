//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DatasetSource` - Loads the static dimension records
//! - `ReportGenerator` - Renders a survey report as markdown
//! - `DocumentExportService` - Converts markdown to HTML or PDF
//! - `MailComposer` - Builds a pre-filled email draft

mod dataset_source;
mod document_export_service;
mod mail_composer;
mod report_generator;

pub use dataset_source::{DatasetError, DatasetSource, LoadedDataset};
pub use document_export_service::{
    DocumentExportService, ExportError, ExportFormat, ExportedDocument,
};
pub use mail_composer::{MailComposer, MailDraft, MailError};
pub use report_generator::{DocumentError, DocumentFormat, GenerationOptions, ReportGenerator};
