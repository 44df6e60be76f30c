//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external systems:
//! - `xgboost`: native evaluator for XGBoost JSON tree ensembles
//! - `exercisedb`: RapidAPI ExerciseDB client
//! - `edamam`: Edamam nutrition-details client
//! - `http`: shared blocking HTTP client setup
//! - `sanitize`: credential filtering for logs

pub mod edamam;
pub mod exercisedb;
pub mod http;
pub mod sanitize;
pub mod xgboost;

// Re-export adapter errors for lib.rs
pub use http::FetchError;
pub use xgboost::ModelError;
