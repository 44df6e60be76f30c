//! # Heart Companion
//!
//! Heart-disease risk estimation from a clinical form, plus informational
//! exercise and nutrition lookups, served from a terminal UI.
//!
//! This crate provides:
//! - Validation and mapping of clinical inputs into the 15-feature layout
//!   expected by a pre-trained gradient-boosted tree classifier
//! - Inference against an XGBoost JSON model artifact
//! - Exercise catalog and recipe nutrition fetchers
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (clinical form, feature vector, prediction, content records)
//! - `ports`: Trait definitions for the classifier and the remote content sources
//! - `adapters`: Concrete implementations (XGBoost evaluator, HTTP clients, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Startup configuration injected from the environment
//! - `tui`: Terminal user interface
//!
//! ## Configuration
//!
//! All settings come from `HEART_COMPANION_*` environment variables:
//!
//! | Variable | Default |
//! |---|---|
//! | `HEART_COMPANION_MODEL_PATH` | `models/heart_model.json` |
//! | `HEART_COMPANION_EXERCISE_API_KEY` | empty |
//! | `HEART_COMPANION_EXERCISE_API_HOST` | `exercisedb.p.rapidapi.com` |
//! | `HEART_COMPANION_EXERCISE_ENDPOINT` | `https://exercisedb.p.rapidapi.com/exercises` |
//! | `HEART_COMPANION_NUTRITION_APP_ID` | empty |
//! | `HEART_COMPANION_NUTRITION_APP_KEY` | empty |
//! | `HEART_COMPANION_NUTRITION_ENDPOINT` | `https://api.edamam.com/api/nutrition-details` |
//! | `HEART_COMPANION_HTTP_TIMEOUT_SECS` | `30` (`0` disables) |
//! | `HEART_COMPANION_LOG_MODE` | `auto` (`file` or `stdout`) |
//! | `HEART_COMPANION_LOG_FILE` | `heart_companion.log` |
//!
//! The trained model is not distributed with the crate. Export it with
//! XGBoost's `save_model("heart_model.json")` and place it at the default
//! path, or point `HEART_COMPANION_MODEL_PATH` elsewhere. To try the
//! interface without one, use the bundled fixture:
//!
//! ```text
//! HEART_COMPANION_MODEL_PATH=models/demo_model.json cargo run
//! ```
//!
//! Startup fails if the model cannot be loaded.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::AppConfig;
pub use domain::{ClinicalForm, FeatureVector, PredictionResult, RiskAssessment};

/// Result type for Heart Companion operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type for Heart Companion
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Model error: {0}")]
    Model(#[from] adapters::ModelError),

    #[error("Classifier returned an invalid severity code: {0}")]
    InvalidSeverity(u32),

    #[error("Remote request failed: {0}")]
    Fetch(#[from] adapters::FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
