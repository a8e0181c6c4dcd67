//! Mail Composer Port - pre-filled email drafts.
//!
//! A draft carries the same content as the exported document, as plain
//! text. Adapters decide how the draft reaches the user (a `mailto:` link,
//! a clipboard, a desktop client).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::survey::SurveyReport;

/// Port for composing email drafts from survey reports.
pub trait MailComposer: Send + Sync {
    /// Build a draft addressed to `recipient` (may be empty to leave the
    /// address for the user to fill in).
    fn compose(&self, report: &SurveyReport, recipient: Option<&str>) -> Result<MailDraft, MailError>;
}

/// A composed, not yet sent, email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailDraft {
    pub to: Option<String>,
    pub subject: String,
    pub body: String,
    /// Link that opens the draft in the user's mail client.
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailError {
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("Draft too long for a mail link ({length} > {limit} characters)")]
    TooLong { length: usize, limit: usize },
}
