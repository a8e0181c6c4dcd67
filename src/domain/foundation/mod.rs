//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the strategy survey domain.

mod approach_label;
mod errors;
mod ids;
mod scale;

pub use approach_label::ApproachLabel;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::DimensionId;
pub use scale::{Scale, SliderValue};
