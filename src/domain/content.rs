//! Informational content from the exercise catalog and nutrition analyzer.
//!
//! Both services return loosely shaped JSON; the only schema enforced here is
//! presence of the fields that get rendered.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One exercise from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default = "Exercise::default_name")]
    pub name: String,

    #[serde(default = "Exercise::default_body_part")]
    pub body_part: String,

    #[serde(default = "Exercise::default_equipment")]
    pub equipment: String,

    #[serde(default = "Exercise::default_target")]
    pub target: String,

    #[serde(default)]
    pub instructions: Vec<String>,

    #[serde(default)]
    pub gif_url: String,
}

impl Exercise {
    fn default_name() -> String {
        "No name available".to_string()
    }

    fn default_body_part() -> String {
        "No body part listed".to_string()
    }

    fn default_equipment() -> String {
        "No equipment listed".to_string()
    }

    fn default_target() -> String {
        "No target muscle listed".to_string()
    }

    /// Read one catalog record field by field.
    ///
    /// A field that is absent, `null` or not a string falls back to its
    /// default; non-string instruction steps are skipped.
    #[must_use]
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let text = |key: &str, default: fn() -> String| {
            record
                .get(key)
                .and_then(Value::as_str)
                .map_or_else(default, str::to_string)
        };

        let instructions = record
            .get("instructions")
            .and_then(Value::as_array)
            .map(|steps| {
                steps
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: text("name", Self::default_name),
            body_part: text("bodyPart", Self::default_body_part),
            equipment: text("equipment", Self::default_equipment),
            target: text("target", Self::default_target),
            instructions,
            gif_url: text("gifUrl", String::new),
        }
    }
}

/// Outcome of one exercise catalog request.
#[derive(Debug, Clone, PartialEq)]
pub enum ExerciseFetch {
    Exercises(Vec<Exercise>),
    /// 200 with an empty or non-list payload
    Empty,
    /// Non-200 response
    Failed { status: u16 },
}

impl ExerciseFetch {
    /// Interpret a raw HTTP response.
    ///
    /// Records that are not JSON objects are skipped; see [`Exercise::from_record`].
    ///
    /// # Errors
    /// Returns error if a 200 body is not valid JSON.
    pub fn from_response(status: u16, body: &str) -> Result<Self, serde_json::Error> {
        if status != 200 {
            return Ok(Self::Failed { status });
        }

        let payload: Value = serde_json::from_str(body)?;
        let Value::Array(items) = payload else {
            return Ok(Self::Empty);
        };

        let exercises: Vec<Exercise> = items
            .iter()
            .filter_map(Value::as_object)
            .map(Exercise::from_record)
            .collect();

        if exercises.is_empty() {
            Ok(Self::Empty)
        } else {
            Ok(Self::Exercises(exercises))
        }
    }

    /// Status line for outcomes that carry no entries.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Exercises(_) => None,
            Self::Empty => Some("No exercises found in the response.".to_string()),
            Self::Failed { status } => {
                Some(format!("Failed to fetch data. Status Code: {status}"))
            }
        }
    }
}

/// A recipe submitted for nutritional analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub title: String,
    pub ingredients: Vec<String>,
}

impl RecipeRequest {
    pub const DEFAULT_TITLE: &'static str = "Healthy Salad";
    pub const DEFAULT_INGREDIENTS: &'static str = "1 cup spinach, 1/2 cup tomatoes, 1 tablespoon olive oil, 1/2 avocado, 1 tablespoon lemon juice";

    /// Build a request from free text: comma separated, trimmed, empty pieces dropped.
    #[must_use]
    pub fn parse(title: &str, ingredients: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            ingredients: split_ingredients(ingredients),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// JSON body expected by the analyzer.
    #[must_use]
    pub fn body(&self) -> Value {
        serde_json::json!({ "ingr": self.ingredients })
    }
}

/// Split a comma separated ingredient list.
#[must_use]
pub fn split_ingredients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// One line of nutritional output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientEntry {
    pub code: String,
    pub label: String,
    pub quantity: f64,
    pub unit: String,
}

impl std::fmt::Display for NutrientEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.2} {}", self.label, self.quantity, self.unit)
    }
}

/// Nutrient totals for a recipe, in the order the service reported them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionReport {
    pub title: String,
    pub nutrients: Vec<NutrientEntry>,
}

impl NutritionReport {
    #[must_use]
    pub fn heading(&self) -> String {
        format!("Nutritional Information for {}", self.title)
    }
}

/// Outcome of one nutrition analysis request.
#[derive(Debug, Clone, PartialEq)]
pub enum NutritionFetch {
    Report(NutritionReport),
    /// 200 without a `totalNutrients` mapping
    NoData,
    /// Non-200 response, with the raw body for display
    Failed { status: u16, body: String },
}

impl NutritionFetch {
    /// Interpret a raw HTTP response for the recipe titled `title`.
    ///
    /// # Errors
    /// Returns error if a 200 body is not valid JSON.
    pub fn from_response(status: u16, body: &str, title: &str) -> Result<Self, serde_json::Error> {
        if status != 200 {
            return Ok(Self::Failed {
                status,
                body: body.to_string(),
            });
        }

        let payload: Value = serde_json::from_str(body)?;
        let Some(Value::Object(totals)) = payload.get("totalNutrients") else {
            return Ok(Self::NoData);
        };

        let nutrients = totals
            .iter()
            .filter_map(|(code, entry)| {
                let label = entry.get("label")?.as_str()?;
                let quantity = entry.get("quantity")?.as_f64()?;
                let unit = entry.get("unit")?.as_str()?;
                Some(NutrientEntry {
                    code: code.clone(),
                    label: label.to_string(),
                    quantity,
                    unit: unit.to_string(),
                })
            })
            .collect();

        Ok(Self::Report(NutritionReport {
            title: title.to_string(),
            nutrients,
        }))
    }

    /// Lines to display, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Report(report) => std::iter::once(report.heading())
                .chain(report.nutrients.iter().map(ToString::to_string))
                .collect(),
            Self::NoData => vec!["No nutritional information available.".to_string()],
            Self::Failed { status, body } => vec![
                format!("Failed to fetch data. Status Code: {status}"),
                format!("Error: {body}"),
            ],
        }
    }
}
