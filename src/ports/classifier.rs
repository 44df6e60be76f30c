//! Classifier port: Trait for the pre-trained heart-disease model.
//!
//! This trait abstracts the model artifact format (XGBoost JSON) from the
//! application logic.

use crate::adapters::ModelError;
use crate::domain::FeatureVector;

/// Trait for a loaded, read-only classifier.
///
/// Implementations are immutable after construction and shared across the
/// whole process.
pub trait Classifier: Send + Sync {
    /// Number of input columns the model was trained on.
    fn num_features(&self) -> usize;

    /// Predict a class code for each row of a feature matrix.
    ///
    /// # Errors
    /// Returns `ModelError::FeatureMismatch` if a row has the wrong width.
    fn predict_rows(&self, rows: &[&[f64]]) -> Result<Vec<u32>, ModelError>;

    /// Predict the class code for a single feature vector.
    ///
    /// The vector is presented to the model as a one-row matrix.
    ///
    /// # Errors
    /// Returns error if the model rejects the input.
    fn predict(&self, features: &FeatureVector) -> Result<u32, ModelError> {
        let rows = [features.as_slice()];
        self.predict_rows(&rows)?
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::Evaluation("classifier returned no prediction".into()))
    }
}
