//! Content service: exercise suggestions and recipe nutrition.
//!
//! Thin orchestration over the two remote ports. Each call is one request;
//! nothing is cached between calls.

use std::sync::Arc;

use crate::domain::{ExerciseFetch, NutritionFetch, RecipeRequest};
use crate::ports::{ExerciseCatalog, NutritionAnalyzer};
use crate::AppError;

/// Outcome of pressing Analyze.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// The ingredients box held nothing usable; no request was sent.
    MissingIngredients,
    Fetched(NutritionFetch),
}

impl Analysis {
    /// Lines to display, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::MissingIngredients => vec!["Please enter some ingredients.".to_string()],
            Self::Fetched(fetch) => fetch.lines(),
        }
    }
}

/// Service for the informational views.
pub struct ContentService<E, N>
where
    E: ExerciseCatalog,
    N: NutritionAnalyzer,
{
    exercises: Arc<E>,
    nutrition: Arc<N>,
}

impl<E, N> ContentService<E, N>
where
    E: ExerciseCatalog,
    N: NutritionAnalyzer,
{
    #[must_use]
    pub fn new(exercises: Arc<E>, nutrition: Arc<N>) -> Self {
        Self {
            exercises,
            nutrition,
        }
    }

    /// Fetch the exercise catalog.
    ///
    /// # Errors
    /// Returns error on transport failure or an undecodable 200 body.
    pub fn fetch_exercises(&self) -> Result<ExerciseFetch, AppError> {
        Ok(self.exercises.fetch_exercises()?)
    }

    /// Analyze a recipe given the raw title and comma-separated ingredients.
    ///
    /// # Errors
    /// Returns error on transport failure or an undecodable 200 body.
    pub fn analyze(&self, title: &str, ingredients: &str) -> Result<Analysis, AppError> {
        let recipe = RecipeRequest::parse(title, ingredients);
        if recipe.is_empty() {
            tracing::info!("Nutrition analysis skipped: no ingredients");
            return Ok(Analysis::MissingIngredients);
        }

        Ok(Analysis::Fetched(self.nutrition.analyze(&recipe)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FetchError;
    use crate::domain::{Exercise, NutrientEntry, NutritionReport};
    use std::sync::Mutex;

    struct StaticCatalog(ExerciseFetch);

    impl ExerciseCatalog for StaticCatalog {
        fn fetch_exercises(&self) -> Result<ExerciseFetch, FetchError> {
            Ok(self.0.clone())
        }
    }

    /// Records every recipe it is asked to analyze.
    #[derive(Default)]
    struct RecordingAnalyzer {
        seen: Mutex<Vec<RecipeRequest>>,
    }

    impl NutritionAnalyzer for RecordingAnalyzer {
        fn analyze(&self, recipe: &RecipeRequest) -> Result<NutritionFetch, FetchError> {
            self.seen.lock().expect("lock").push(recipe.clone());
            Ok(NutritionFetch::Report(NutritionReport {
                title: recipe.title.clone(),
                nutrients: vec![NutrientEntry {
                    code: "ENERC_KCAL".to_string(),
                    label: "Energy".to_string(),
                    quantity: 120.0,
                    unit: "kcal".to_string(),
                }],
            }))
        }
    }

    fn create_test_service(
        catalog: ExerciseFetch,
    ) -> (
        ContentService<StaticCatalog, RecordingAnalyzer>,
        Arc<RecordingAnalyzer>,
    ) {
        let analyzer = Arc::new(RecordingAnalyzer::default());
        let service = ContentService::new(Arc::new(StaticCatalog(catalog)), analyzer.clone());
        (service, analyzer)
    }

    #[test]
    fn test_empty_ingredients_send_nothing() {
        let (service, analyzer) = create_test_service(ExerciseFetch::Empty);

        let outcome = service.analyze("Soup", " ,  , ").expect("Should not error");
        assert_eq!(outcome, Analysis::MissingIngredients);
        assert_eq!(outcome.lines(), vec!["Please enter some ingredients."]);
        assert!(analyzer.seen.lock().expect("lock").is_empty());
    }

    #[test]
    fn test_analyze_splits_and_trims() {
        let (service, analyzer) = create_test_service(ExerciseFetch::Empty);

        let outcome = service
            .analyze("Fried Rice", "1 cup rice, 2 eggs")
            .expect("Should analyze");

        let seen = analyzer.seen.lock().expect("lock");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].ingredients, vec!["1 cup rice", "2 eggs"]);
        assert_eq!(
            outcome.lines(),
            vec![
                "Nutritional Information for Fried Rice".to_string(),
                "Energy: 120.00 kcal".to_string(),
            ]
        );
    }

    #[test]
    fn test_fetch_exercises_passes_outcome_through() {
        let exercise = Exercise {
            name: "push up".to_string(),
            body_part: "chest".to_string(),
            equipment: "body weight".to_string(),
            target: "pectorals".to_string(),
            instructions: vec![],
            gif_url: String::new(),
        };
        let (service, _) = create_test_service(ExerciseFetch::Exercises(vec![exercise.clone()]));

        assert_eq!(
            service.fetch_exercises().expect("Should fetch"),
            ExerciseFetch::Exercises(vec![exercise])
        );
    }
}
