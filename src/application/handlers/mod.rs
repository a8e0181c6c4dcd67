//! Application handlers.
//!
//! Command handlers that orchestrate ports around a survey report.

pub mod survey;

pub use survey::{
    ComposeMailCommand, ComposeMailHandler, ExportReportCommand, ExportReportError,
    ExportReportHandler, ExportReportResult,
};
