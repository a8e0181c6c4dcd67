//! ComposeMailHandler - builds a pre-filled mail draft for a report.
//!
//! Pure composition: nothing is sent and no session state is touched.

use std::sync::Arc;

use crate::domain::survey::SurveyReport;
use crate::ports::{MailComposer, MailDraft, MailError};

/// Command to compose a mail draft.
#[derive(Debug, Clone, Default)]
pub struct ComposeMailCommand {
    /// Address to pre-fill. The composer's default applies when `None`.
    pub recipient: Option<String>,
}

impl ComposeMailCommand {
    pub fn to(recipient: impl Into<String>) -> Self {
        Self {
            recipient: Some(recipient.into()),
        }
    }
}

/// Handler for composing mail drafts.
///
/// # Dependencies
///
/// - `MailComposer`: Builds the draft and its link
#[derive(Clone)]
pub struct ComposeMailHandler {
    composer: Arc<dyn MailComposer>,
}

impl ComposeMailHandler {
    pub fn new(composer: Arc<dyn MailComposer>) -> Self {
        Self { composer }
    }

    pub fn handle(&self, cmd: ComposeMailCommand, report: &SurveyReport) -> Result<MailDraft, MailError> {
        self.composer
            .compose(report, cmd.recipient.as_deref())
            .map_err(|err| {
                tracing::error!(error = %err, "Mail draft composition failed");
                err
            })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
