//! Application layer - Commands and Handlers.
//!
//! This layer coordinates ports around an owned `SurveyReport` snapshot.
//! Handlers never hold or mutate a `ResponseSet`, so a failed export or
//! draft leaves the session exactly as it was.

pub mod handlers;

pub use handlers::{
    ComposeMailCommand, ComposeMailHandler, ExportReportCommand, ExportReportError,
    ExportReportHandler, ExportReportResult,
};
