//! `mailto:` link composer.
//!
//! Builds a draft whose body is the plain-text counterpart of the exported
//! document, then percent-encodes it into a link the user's mail client can
//! open. Nothing is sent from here.

use crate::config::MailConfig;
use crate::domain::survey::SurveyReport;
use crate::ports::{MailComposer, MailDraft, MailError};

/// Conservative ceiling for link length; several clients truncate beyond it.
const DEFAULT_MAX_LINK_LENGTH: usize = 8000;

/// Composes drafts as `mailto:` links.
#[derive(Debug, Clone)]
pub struct MailtoComposer {
    subject: String,
    default_recipient: Option<String>,
    max_link_length: usize,
}

impl Default for MailtoComposer {
    fn default() -> Self {
        Self::from_config(&MailConfig::default())
    }
}

impl MailtoComposer {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            default_recipient: None,
            max_link_length: DEFAULT_MAX_LINK_LENGTH,
        }
    }

    /// Builds a composer from the `mail` configuration section.
    pub fn from_config(config: &MailConfig) -> Self {
        Self {
            subject: config.subject.clone(),
            default_recipient: config.recipient.clone(),
            max_link_length: DEFAULT_MAX_LINK_LENGTH,
        }
    }

    pub fn with_max_link_length(mut self, limit: usize) -> Self {
        self.max_link_length = limit;
        self
    }

    fn resolve_recipient(&self, recipient: Option<&str>) -> Result<Option<String>, MailError> {
        let candidate = recipient
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .or(self.default_recipient.as_deref());

        match candidate {
            None => Ok(None),
            Some(address) if is_plausible_address(address) => Ok(Some(address.to_string())),
            Some(address) => Err(MailError::InvalidRecipient(address.to_string())),
        }
    }
}

impl MailComposer for MailtoComposer {
    fn compose(&self, report: &SurveyReport, recipient: Option<&str>) -> Result<MailDraft, MailError> {
        let to = self.resolve_recipient(recipient)?;
        let body = plain_text_body(report);

        let link = format!(
            "mailto:{}?subject={}&body={}",
            to.as_deref().map(urlencoding::encode).unwrap_or_default(),
            urlencoding::encode(&self.subject),
            urlencoding::encode(&body)
        );

        if link.len() > self.max_link_length {
            return Err(MailError::TooLong {
                length: link.len(),
                limit: self.max_link_length,
            });
        }

        tracing::debug!(recipient = ?to, length = link.len(), "Composed mail draft");
        Ok(MailDraft {
            to,
            subject: self.subject.clone(),
            body,
            link,
        })
    }
}

/// Plain-text rendering of a report, section for section with the markdown
/// document.
pub fn plain_text_body(report: &SurveyReport) -> String {
    let mut body = format!("{}\n\n", report.title);
    body.push_str(&format!("{}\n", report.summary_line()));
    body.push_str(&format!("{}\n", report.leaning_sentence()));
    body.push_str(&format!("Generated: {}\n", report.generated_on.format("%Y-%m-%d")));

    for (i, result) in report.dimensions.iter().enumerate() {
        body.push_str(&format!(
            "\n{}. {}: {} ({} of {})\n",
            i + 1,
            result.name,
            result.label,
            result.value,
            report.scale.max()
        ));
        if !result.feedback.is_empty() {
            body.push_str(&format!("{}\n", result.feedback));
        }
        if let Some(example) = &result.example {
            body.push_str(&format!("Example: {}\n", example));
        }
    }
    body
}

fn is_plausible_address(address: &str) -> bool {
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !address.contains(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    }
}
