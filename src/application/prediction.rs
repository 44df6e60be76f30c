//! Prediction service: Orchestrates validation, gating and inference.
//!
//! This service coordinates:
//! - Mapping the clinical form into the model's feature layout
//! - Blocking submission when fields are missing or out of range
//! - One synchronous classifier call per accepted submission
//! - Interpreting the class code as a severity

use std::sync::Arc;

use crate::adapters::ModelError;
use crate::domain::{ClinicalForm, FeatureVector, FieldId, PredictionResult, FEATURE_COUNT};
use crate::ports::Classifier;
use crate::AppError;

/// Why a submission was not sent to the classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionWarning {
    /// At least one field is empty or at its placeholder selection.
    MissingFields(Vec<FieldId>),
    /// Every field is present but some numeric values are out of bounds.
    OutOfRange(Vec<String>),
}

impl SubmissionWarning {
    /// Get the user-facing warning text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::MissingFields(_) => "Please fill out all fields before submitting.".to_string(),
            Self::OutOfRange(messages) => messages.join(" "),
        }
    }
}

/// Outcome of pressing Submit.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Blocked(SubmissionWarning),
    Predicted(PredictionResult),
}

/// Service for running heart-disease predictions.
///
/// The classifier is loaded once by the caller and shared read-only.
pub struct PredictionService<C>
where
    C: Classifier,
{
    classifier: Arc<C>,
}

impl<C> PredictionService<C>
where
    C: Classifier,
{
    /// Create a new prediction service.
    ///
    /// # Errors
    /// Returns error if the classifier was not trained on the 15-column layout.
    pub fn new(classifier: Arc<C>) -> Result<Self, AppError> {
        let got = classifier.num_features();
        if got != FEATURE_COUNT {
            return Err(AppError::Model(ModelError::FeatureMismatch {
                expected: FEATURE_COUNT,
                got,
            }));
        }
        Ok(Self { classifier })
    }

    /// Validate the form and, if it passes, run inference.
    ///
    /// Missing fields and out-of-range values are returned as
    /// `Submission::Blocked`, never as errors.
    ///
    /// # Errors
    /// Returns error only if the classifier itself fails.
    pub fn submit(&self, form: &ClinicalForm) -> Result<Submission, AppError> {
        let draft = form.map();

        let missing: Vec<FieldId> = draft
            .issues()
            .iter()
            .filter_map(|issue| match issue {
                crate::domain::ValidationIssue::Missing(field) => Some(*field),
                _ => None,
            })
            .collect();

        let Some(vector) = draft.to_vector() else {
            tracing::info!("Submission blocked: {} field(s) missing", missing.len());
            return Ok(Submission::Blocked(SubmissionWarning::MissingFields(missing)));
        };

        let range_warnings = draft.range_warnings();
        if !range_warnings.is_empty() {
            tracing::info!(
                "Submission blocked: {} value(s) out of range",
                range_warnings.len()
            );
            return Ok(Submission::Blocked(SubmissionWarning::OutOfRange(
                range_warnings,
            )));
        }

        self.predict(&vector).map(Submission::Predicted)
    }

    /// Run the classifier on a complete feature vector.
    ///
    /// # Errors
    /// Returns error if the classifier fails or yields a code outside 0..=4.
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, AppError> {
        tracing::debug!("Invoking classifier on one {}-feature row", FEATURE_COUNT);
        let code = self.classifier.predict(features)?;
        let result = PredictionResult::from_code(code).map_err(AppError::InvalidSeverity)?;

        tracing::info!(
            "Prediction complete: code={}, assessment={}",
            result.code,
            result.assessment()
        );

        Ok(result)
    }
}
