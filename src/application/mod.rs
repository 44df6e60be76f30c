//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod content;
mod prediction;

pub use content::{Analysis, ContentService};
pub use prediction::{PredictionService, Submission, SubmissionWarning};
