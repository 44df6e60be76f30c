//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (model artifact, remote APIs).

mod classifier;
mod content;

pub use classifier::Classifier;
pub use content::{ExerciseCatalog, NutritionAnalyzer};
