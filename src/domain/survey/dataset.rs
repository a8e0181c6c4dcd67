//! The immutable set of dimensions a session is scored against.

use std::collections::HashSet;

use crate::domain::foundation::{DimensionId, DomainError, ErrorCode, Scale};

use super::{DatasetIssue, Dimension};

/// Default heading for reports and mail drafts.
pub const DEFAULT_TITLE: &str = "AI Strategy Spectrum";

/// Ordered, immutable collection of dimensions sharing one scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    title: String,
    scale: Scale,
    dimensions: Vec<Dimension>,
}

impl Dataset {
    /// Creates a dataset, rejecting duplicate dimension ids.
    pub fn new(scale: Scale, dimensions: Vec<Dimension>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(dimensions.len());
        for dimension in &dimensions {
            if !seen.insert(dimension.id()) {
                return Err(DomainError::new(
                    ErrorCode::DatasetMalformed,
                    format!("Duplicate dimension id {}", dimension.id()),
                )
                .with_detail("dimension", dimension.id().to_string()));
            }
        }

        Ok(Self {
            title: DEFAULT_TITLE.to_string(),
            scale,
            dimensions,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn get(&self, id: DimensionId) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.id() == id)
    }

    pub fn contains(&self, id: DimensionId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = DimensionId> + '_ {
        self.dimensions.iter().map(Dimension::id)
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Shape problems across all dimensions, in dataset order.
    pub fn issues(&self) -> Vec<DatasetIssue> {
        self.dimensions
            .iter()
            .flat_map(|d| d.issues(self.scale))
            .collect()
    }
}
