//! Document adapters - Implementations for report generation and export.
//!
//! This module provides adapters for the document-related ports:
//! - `MarkdownReportGenerator` - Renders a survey report as markdown
//! - `PulldownExportService` - Converts markdown to HTML (pulldown-cmark) or PDF (Pandoc)

mod markdown_report_generator;
mod pulldown_export_service;

pub use markdown_report_generator::MarkdownReportGenerator;
pub use pulldown_export_service::PulldownExportService;
