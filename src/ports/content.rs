//! Content source ports: Traits for the remote exercise catalog and
//! nutrition analyzer.
//!
//! Non-200 responses are ordinary outcomes (`ExerciseFetch::Failed`,
//! `NutritionFetch::Failed`); only transport-level problems are errors.

use crate::adapters::FetchError;
use crate::domain::{ExerciseFetch, NutritionFetch, RecipeRequest};

/// Source of recommended exercises.
pub trait ExerciseCatalog: Send + Sync {
    /// Fetch the exercise list with one request.
    ///
    /// # Errors
    /// Returns `FetchError` if the request cannot be completed or a
    /// successful body cannot be decoded.
    fn fetch_exercises(&self) -> Result<ExerciseFetch, FetchError>;
}

/// Recipe nutrition analyzer.
pub trait NutritionAnalyzer: Send + Sync {
    /// Analyze a recipe with one request.
    ///
    /// # Errors
    /// Returns `FetchError` if the request cannot be completed or a
    /// successful body cannot be decoded.
    fn analyze(&self, recipe: &RecipeRequest) -> Result<NutritionFetch, FetchError>;
}
