//! Dataset Source Port - where the static dimension records come from.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::foundation::DomainError;
use crate::domain::survey::{Dataset, DatasetIssue};

/// Port for loading the dataset once at startup.
///
/// Implementations must reject documents that are not an array of records
/// and must report, not hide, shape issues found in individual records.
pub trait DatasetSource: Send + Sync {
    /// Load and convert every record.
    fn load(&self) -> Result<LoadedDataset, DatasetError>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// A dataset plus the shape issues found while loading it.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub issues: Vec<DatasetIssue>,
}

impl LoadedDataset {
    /// Fails with [`DatasetError::Rejected`] if any issue was found.
    pub fn into_strict(self) -> Result<Dataset, DatasetError> {
        if self.issues.is_empty() {
            Ok(self.dataset)
        } else {
            Err(DatasetError::Rejected(self.issues))
        }
    }
}

/// Data-shape errors: the session cannot start.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Dataset must be an array of dimension records, found {0}")]
    NotAnArray(&'static str),

    #[error("Record {index} is malformed: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Dataset rejected: {0}")]
    Invalid(#[from] DomainError),

    #[error("Dataset rejected with {} issue(s): {}", .0.len(), join_issues(.0))]
    Rejected(Vec<DatasetIssue>),
}

fn join_issues(issues: &[DatasetIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
