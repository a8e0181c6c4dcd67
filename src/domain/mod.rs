//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (labels, scales, IDs, errors)
//! - `survey` - Dimensions, the approach scorer, responses and reports

pub mod foundation;
pub mod survey;
