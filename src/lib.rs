//! Strategy Spectrum - AI strategy posture survey
//!
//! Scores slider positions along survey dimensions, each running from a
//! conservative to an aggressive approach, into one of seven approach
//! labels, and derives an overall leaning from their mean. Reports can be
//! rendered as markdown, exported to HTML or PDF, or handed to a mail
//! client as a pre-filled draft.

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;
