//! Domain layer: Core business types and logic.
//!
//! Pure Rust types with no I/O. Mapping tables, feature order and message
//! texts live here so every other layer agrees on them.

mod content;
mod features;
mod prediction;

pub use content::{
    split_ingredients, Exercise, ExerciseFetch, NutrientEntry, NutritionFetch, NutritionReport,
    RecipeRequest,
};
pub use features::{
    CategoricalField, ClinicalForm, FeatureDraft, FeatureSlot, FeatureVector, FieldId,
    NumericField, ValidationIssue, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_NAMES, PLACEHOLDER,
};
pub use prediction::{PredictionResult, RiskAssessment, MAX_SEVERITY};
