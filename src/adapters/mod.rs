//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `dataset` - JSON dataset loading (file, inline or bundled)
//! - `document` - Markdown generation and HTML/PDF export
//! - `mail` - `mailto:` draft composition

pub mod dataset;
pub mod document;
pub mod mail;

pub use dataset::JsonDatasetSource;
pub use document::{MarkdownReportGenerator, PulldownExportService};
pub use mail::MailtoComposer;
