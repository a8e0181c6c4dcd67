//! Mail draft configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Defaults for composed mail drafts
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Pre-filled recipient. Left blank in the draft when unset.
    pub recipient: Option<String>,

    /// Subject line
    #[serde(default = "default_subject")]
    pub subject: String,
}

impl MailConfig {
    /// Validate mail configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(recipient) = &self.recipient {
            if !recipient.contains('@') {
                return Err(ValidationError::InvalidRecipient(recipient.clone()));
            }
        }
        if self.subject.trim().is_empty() {
            return Err(ValidationError::MissingRequired("mail.subject"));
        }
        Ok(())
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            recipient: None,
            subject: default_subject(),
        }
    }
}

fn default_subject() -> String {
    "My AI Strategy Spectrum Results".to_string()
}
