//! Prediction result types.
//!
//! Represents the output of the heart-disease classifier.

use serde::{Deserialize, Serialize};

/// Highest severity code the classifier can produce.
pub const MAX_SEVERITY: u8 = 4;

/// Interpretation of a severity code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskAssessment {
    /// Code 0: no indication of heart disease
    NotAtRisk,
    /// Codes 1-4: increasing severity
    AtRisk { level: u8 },
}

impl RiskAssessment {
    /// Get the human-readable message shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NotAtRisk => "The person is not at risk of heart disease.".to_string(),
            Self::AtRisk { level } => {
                format!("The person is at risk of heart disease of level {level}.")
            }
        }
    }

    #[must_use]
    pub fn is_at_risk(&self) -> bool {
        matches!(self, Self::AtRisk { .. })
    }
}

impl std::fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAtRisk => write!(f, "NOT AT RISK"),
            Self::AtRisk { level } => write!(f, "AT RISK (LEVEL {level})"),
        }
    }
}

/// Classifier output for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Raw class code (0..=4)
    pub code: u8,

    /// When the prediction was made
    pub assessed_at: chrono::DateTime<chrono::Utc>,
}

impl PredictionResult {
    /// Wrap a raw class code.
    ///
    /// # Errors
    /// Returns the code back if it is outside 0..=4.
    pub fn from_code(code: u32) -> Result<Self, u32> {
        match u8::try_from(code) {
            Ok(c) if c <= MAX_SEVERITY => Ok(Self {
                code: c,
                assessed_at: chrono::Utc::now(),
            }),
            _ => Err(code),
        }
    }

    #[must_use]
    pub fn assessment(&self) -> RiskAssessment {
        if self.code == 0 {
            RiskAssessment::NotAtRisk
        } else {
            RiskAssessment::AtRisk { level: self.code }
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.assessment().message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_zero_is_not_at_risk() {
        let result = PredictionResult::from_code(0).expect("0 is valid");
        assert_eq!(result.assessment(), RiskAssessment::NotAtRisk);
        assert_eq!(result.message(), "The person is not at risk of heart disease.");
    }

    #[test]
    fn test_positive_codes_carry_level() {
        let result = PredictionResult::from_code(3).expect("3 is valid");
        assert!(result.assessment().is_at_risk());
        assert!(result
            .message()
            .contains("at risk of heart disease of level 3"));

        for code in 1..=4 {
            let r = PredictionResult::from_code(code).expect("valid");
            assert_eq!(r.assessment(), RiskAssessment::AtRisk { level: code as u8 });
        }
    }

    #[test]
    fn test_out_of_range_codes_rejected() {
        assert_eq!(PredictionResult::from_code(5), Err(5));
        assert_eq!(PredictionResult::from_code(300), Err(300));
    }
}
