//! Clinical form fields and their mapping onto the model's feature layout.
//!
//! Based on the UCI heart-disease dataset (Cleveland, Hungary, Switzerland,
//! VA Long Beach). The classifier was trained on 15 columns in a fixed order;
//! this module owns that order, the per-field categorical tables and the
//! physiological bounds for the numeric inputs.

use serde::{Deserialize, Serialize};

/// Number of entries in the model's input row.
pub const FEATURE_COUNT: usize = 15;

/// Selection shown before the user picks a categorical option.
pub const PLACEHOLDER: &str = "Choose an option";

/// Column names in the order the classifier was trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "sex",
    "cp",
    "trestbps",
    "chol",
    "fbs",
    "restecg",
    "thalch",
    "exang",
    "oldpeak",
    "slope",
    "ca",
    "thal",
    "dataset",
    "feature_14",
];

/// Numeric clinical inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericField {
    /// Age in years
    Age,
    /// Resting blood pressure in mm Hg (trestbps)
    RestingBp,
    /// Serum cholesterol in mg/dl (chol)
    Cholesterol,
    /// Maximum heart rate achieved (thalch)
    MaxHeartRate,
    /// ST depression induced by exercise relative to rest (oldpeak)
    StDepression,
}

impl NumericField {
    pub const COUNT: usize = 5;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Age,
        Self::RestingBp,
        Self::Cholesterol,
        Self::MaxHeartRate,
        Self::StDepression,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::RestingBp => "Resting Blood Pressure",
            Self::Cholesterol => "Serum Cholesterol in mg/dl",
            Self::MaxHeartRate => "Maximum Heart Rate Achieved",
            Self::StDepression => "Depression Induced by Exercise Relative to Rest",
        }
    }

    /// Inclusive physiological bounds.
    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Self::Age => (20.0, 120.0),
            Self::RestingBp => (50.0, 200.0),
            Self::Cholesterol => (100.0, 600.0),
            Self::MaxHeartRate => (50.0, 220.0),
            Self::StDepression => (0.0, 6.0),
        }
    }

    /// Whether the field only takes whole numbers.
    #[must_use]
    pub fn is_integral(self) -> bool {
        !matches!(self, Self::StDepression)
    }

    #[must_use]
    pub fn help(self) -> &'static str {
        match self {
            Self::Age => "years (20-120)",
            Self::RestingBp => "mm Hg (50-200)",
            Self::Cholesterol => "mg/dl (100-600)",
            Self::MaxHeartRate => "bpm during exercise (50-220)",
            Self::StDepression => "ST depression vs rest (0.0-6.0)",
        }
    }

    /// Message shown when a value falls outside [`Self::bounds`].
    #[must_use]
    pub fn range_message(self) -> &'static str {
        match self {
            Self::Age => "Age must be between 20 and 120.",
            Self::RestingBp => "Resting blood pressure must be between 50 and 200.",
            Self::Cholesterol => "Serum cholesterol must be between 100 and 600.",
            Self::MaxHeartRate => "Maximum heart rate must be between 50 and 220.",
            Self::StDepression => "Depression must be between 0.0 and 6.0.",
        }
    }

    #[must_use]
    pub fn in_range(self, value: f64) -> bool {
        let (min, max) = self.bounds();
        (min..=max).contains(&value)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Categorical clinical inputs, each backed by a fixed lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoricalField {
    Sex,
    ChestPain,
    FastingBloodSugar,
    RestingEcg,
    ExerciseAngina,
    StSlope,
    Vessels,
    Thalassemia,
    Dataset,
}

impl CategoricalField {
    pub const COUNT: usize = 9;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Sex,
        Self::ChestPain,
        Self::FastingBloodSugar,
        Self::RestingEcg,
        Self::ExerciseAngina,
        Self::StSlope,
        Self::Vessels,
        Self::Thalassemia,
        Self::Dataset,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sex => "Sex",
            Self::ChestPain => "Chest Pain Type",
            Self::FastingBloodSugar => "Fasting Blood Sugar > 120 mg/dl?",
            Self::RestingEcg => "Resting Electrocardiographic Results",
            Self::ExerciseAngina => "Exercise Induced Angina",
            Self::StSlope => "Slope of Peak Exercise ST Segment",
            Self::Vessels => "Number of Major Vessels Colored by Fluoroscopy",
            Self::Thalassemia => "Thalassemia",
            Self::Dataset => "Dataset",
        }
    }

    /// Options in display order, paired with their encoded value.
    #[must_use]
    pub fn options(self) -> &'static [(&'static str, u8)] {
        match self {
            Self::Sex => &[("Male", 1), ("Female", 0)],
            Self::ChestPain => &[
                ("Typical Angina", 0),
                ("Atypical Angina", 1),
                ("Non-anginal pain", 2),
                ("Asymptomatic", 3),
            ],
            Self::FastingBloodSugar | Self::ExerciseAngina => &[("Yes", 1), ("No", 0)],
            Self::RestingEcg => &[
                ("Normal", 0),
                ("ST-T wave abnormality", 1),
                ("Left ventricular hypertrophy", 2),
            ],
            Self::StSlope => &[("Upsloping", 0), ("Flat", 1), ("Downsloping", 2)],
            Self::Vessels => &[("0", 0), ("1", 1), ("2", 2), ("3", 3), ("4", 4)],
            Self::Thalassemia => &[
                ("Normal", 0),
                ("Fixed defect", 1),
                ("Reversible defect", 2),
            ],
            Self::Dataset => &[
                ("Cleveland", 0),
                ("Hungary", 1),
                ("Switzerland", 2),
                ("VA Long Beach", 3),
            ],
        }
    }

    #[must_use]
    pub fn help(self) -> Option<&'static str> {
        match self {
            Self::ChestPain => Some(
                "Typical Angina: pain from decreased blood flow to the heart. \
                 Atypical Angina: not typical for decreased blood flow. \
                 Non-anginal pain: not related to the heart. Asymptomatic: no chest pain.",
            ),
            Self::RestingEcg => Some(
                "Normal: no ECG abnormalities. ST-T wave abnormality: may indicate ischemia \
                 or myocardial infarction. Left ventricular hypertrophy: enlarged left ventricle.",
            ),
            Self::ExerciseAngina => {
                Some("Yes: chest pain induced by exercise. No: no chest pain during exercise.")
            }
            Self::StSlope => Some(
                "Upsloping: better heart function during exercise. Flat: no significant change. \
                 Downsloping: potentially worsening heart function.",
            ),
            Self::Thalassemia => Some(
                "Normal: no thalassemia. Fixed defect: past myocardial infarction. \
                 Reversible defect: ischemia detected during testing.",
            ),
            Self::Dataset => Some("Choose the relevant dataset"),
            _ => None,
        }
    }

    /// Map a selection to its encoded value.
    ///
    /// The placeholder and any unknown string map to `None`.
    #[must_use]
    pub fn map(self, choice: &str) -> Option<u8> {
        self.options()
            .iter()
            .find(|(label, _)| *label == choice)
            .map(|(_, code)| *code)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A single form field, numeric or categorical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldId {
    Numeric(NumericField),
    Categorical(CategoricalField),
}

impl FieldId {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Numeric(f) => f.label(),
            Self::Categorical(f) => f.label(),
        }
    }
}

/// What feeds one column of the model row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSlot {
    Field(FieldId),
    /// Constant column the trained model expects; always 0.0.
    Placeholder,
}

/// Column sources in training order (see [`FEATURE_NAMES`]).
pub const FEATURE_LAYOUT: [FeatureSlot; FEATURE_COUNT] = [
    FeatureSlot::Field(FieldId::Numeric(NumericField::Age)),
    FeatureSlot::Field(FieldId::Categorical(CategoricalField::Sex)),
    FeatureSlot::Field(FieldId::Categorical(CategoricalField::ChestPain)),
    FeatureSlot::Field(FieldId::Numeric(NumericField::RestingBp)),
    FeatureSlot::Field(FieldId::Numeric(NumericField::Cholesterol)),
    FeatureSlot::Field(FieldId::Categorical(CategoricalField::FastingBloodSugar)),
    FeatureSlot::Field(FieldId::Categorical(CategoricalField::RestingEcg)),
    FeatureSlot::Field(FieldId::Numeric(NumericField::MaxHeartRate)),
    FeatureSlot::Field(FieldId::Categorical(CategoricalField::ExerciseAngina)),
    FeatureSlot::Field(FieldId::Numeric(NumericField::StDepression)),
    FeatureSlot::Field(FieldId::Categorical(CategoricalField::StSlope)),
    FeatureSlot::Field(FieldId::Categorical(CategoricalField::Vessels)),
    FeatureSlot::Field(FieldId::Categorical(CategoricalField::Thalassemia)),
    FeatureSlot::Field(FieldId::Categorical(CategoricalField::Dataset)),
    FeatureSlot::Placeholder,
];

/// A problem found while mapping the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationIssue {
    /// Field left empty or at its placeholder selection.
    Missing(FieldId),
    /// Numeric value outside its physiological bounds.
    OutOfRange { field: NumericField, value: f64 },
}

impl ValidationIssue {
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "{} is required.", field.label()),
            Self::OutOfRange { field, .. } => f.write_str(field.range_message()),
        }
    }
}

/// Raw values entered by the user, before mapping.
///
/// Numeric entries are `None` when empty; categorical entries hold the
/// selected option string (or `None` / [`PLACEHOLDER`] when unselected).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalForm {
    numeric: [Option<f64>; NumericField::COUNT],
    categorical: [Option<String>; CategoricalField::COUNT],
}

impl ClinicalForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_numeric(&mut self, field: NumericField, value: Option<f64>) {
        self.numeric[field.index()] = value;
    }

    pub fn select(&mut self, field: CategoricalField, choice: impl Into<String>) {
        self.categorical[field.index()] = Some(choice.into());
    }

    pub fn clear_selection(&mut self, field: CategoricalField) {
        self.categorical[field.index()] = None;
    }

    #[must_use]
    pub fn numeric(&self, field: NumericField) -> Option<f64> {
        self.numeric[field.index()]
    }

    #[must_use]
    pub fn selection(&self, field: CategoricalField) -> Option<&str> {
        self.categorical[field.index()].as_deref()
    }

    /// Builder-style numeric setter.
    #[must_use]
    pub fn with_numeric(mut self, field: NumericField, value: f64) -> Self {
        self.set_numeric(field, Some(value));
        self
    }

    /// Builder-style categorical setter.
    #[must_use]
    pub fn with_choice(mut self, field: CategoricalField, choice: &str) -> Self {
        self.select(field, choice);
        self
    }

    /// Map every field through its table into a draft row.
    ///
    /// Never fails: gaps become missing entries and range problems become
    /// issues, so the caller decides whether to submit.
    #[must_use]
    pub fn map(&self) -> FeatureDraft {
        let mut slots = [None; FEATURE_COUNT];
        let mut issues = Vec::new();

        for (slot, source) in slots.iter_mut().zip(FEATURE_LAYOUT.iter()) {
            *slot = match *source {
                FeatureSlot::Placeholder => Some(0.0),
                FeatureSlot::Field(FieldId::Numeric(field)) => {
                    let value = self.numeric(field).filter(|v| v.is_finite());
                    match value {
                        Some(v) if !field.in_range(v) => {
                            issues.push(ValidationIssue::OutOfRange { field, value: v })
                        }
                        Some(_) => {}
                        None => issues.push(ValidationIssue::Missing(FieldId::Numeric(field))),
                    }
                    value
                }
                FeatureSlot::Field(FieldId::Categorical(field)) => {
                    let code = self.selection(field).and_then(|choice| field.map(choice));
                    if code.is_none() {
                        issues.push(ValidationIssue::Missing(FieldId::Categorical(field)));
                    }
                    code.map(f64::from)
                }
            };
        }

        FeatureDraft { slots, issues }
    }

    /// The worked example patient used for the sample-data action.
    #[must_use]
    pub fn sample() -> Self {
        Self::new()
            .with_numeric(NumericField::Age, 55.0)
            .with_choice(CategoricalField::Sex, "Male")
            .with_choice(CategoricalField::ChestPain, "Typical Angina")
            .with_numeric(NumericField::RestingBp, 130.0)
            .with_numeric(NumericField::Cholesterol, 250.0)
            .with_choice(CategoricalField::FastingBloodSugar, "No")
            .with_choice(CategoricalField::RestingEcg, "Normal")
            .with_numeric(NumericField::MaxHeartRate, 150.0)
            .with_choice(CategoricalField::ExerciseAngina, "No")
            .with_numeric(NumericField::StDepression, 1.0)
            .with_choice(CategoricalField::StSlope, "Flat")
            .with_choice(CategoricalField::Vessels, "0")
            .with_choice(CategoricalField::Thalassemia, "Normal")
            .with_choice(CategoricalField::Dataset, "Cleveland")
    }
}

/// Result of mapping a form: a possibly incomplete row plus any issues.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureDraft {
    slots: [Option<f64>; FEATURE_COUNT],
    issues: Vec<ValidationIssue>,
}

impl FeatureDraft {
    #[must_use]
    pub fn slots(&self) -> &[Option<f64>; FEATURE_COUNT] {
        &self.slots
    }

    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// True when every column has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Messages for out-of-range numeric values.
    #[must_use]
    pub fn range_warnings(&self) -> Vec<String> {
        self.issues
            .iter()
            .filter(|i| !i.is_missing())
            .map(ToString::to_string)
            .collect()
    }

    /// The finished row, if no column is missing.
    #[must_use]
    pub fn to_vector(&self) -> Option<FeatureVector> {
        let mut values = [0.0; FEATURE_COUNT];
        for (out, slot) in values.iter_mut().zip(self.slots.iter()) {
            *out = (*slot)?;
        }
        Some(FeatureVector(values))
    }
}

/// Fully populated model input in training order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Create a vector from raw values.
    ///
    /// # Errors
    /// Returns error if the slice length is not 15 or a value is not finite.
    pub fn from_slice(v: &[f64]) -> Result<Self, String> {
        if v.len() != FEATURE_COUNT {
            return Err(format!("Expected {FEATURE_COUNT} features, got {}", v.len()));
        }
        if let Some(pos) = v.iter().position(|x| !x.is_finite()) {
            return Err(format!("Feature {} is not a finite number", FEATURE_NAMES[pos]));
        }
        let mut values = [0.0; FEATURE_COUNT];
        values.copy_from_slice(v);
        Ok(Self(values))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}
