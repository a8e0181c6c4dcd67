//! Survey handlers - export and mail composition for a finished report.

mod compose_mail;
mod export_report;

pub use compose_mail::{ComposeMailCommand, ComposeMailHandler};
pub use export_report::{
    ExportReportCommand, ExportReportError, ExportReportHandler, ExportReportResult,
};
