//! Survey module - dimensions, the approach scorer and derived reports.
//!
//! # Module Organization
//!
//! - `dimension` - Dimension records and the tagged labeling scheme
//! - `dataset` - Immutable ordered collection of dimensions
//! - `scorer` - Pure labeling, feedback lookup and aggregation
//! - `responses` - Per-session value map with explicit recomputation
//! - `report` - Owned snapshot used by presentation and export

mod dataset;
mod dimension;
mod report;
mod responses;
mod scorer;

pub use dataset::{Dataset, DEFAULT_TITLE};
pub use dimension::{DatasetIssue, Dimension, FeedbackRange, LabelingScheme, SlotText};
pub use report::{value_bar, DimensionResult, SurveyReport};
pub use responses::ResponseSet;
pub use scorer::{label_for, AggregationPolicy, ApproachScorer, OverallScore};
