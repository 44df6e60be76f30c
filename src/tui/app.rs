//! Main TUI application state machine.
//!
//! Handles:
//! - Page navigation
//! - Input event handling
//! - Service integration (blocking, one request per interaction)

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::edamam::EdamamClient;
use crate::adapters::exercisedb::ExerciseDbClient;
use crate::adapters::xgboost::XgbClassifier;
use crate::application::{ContentService, PredictionService};
use crate::config::AppConfig;
use crate::AppError;

use super::ui::{
    about::render_about,
    exercises::{render_exercises, ExercisesState},
    nutrition::{render_nutrition, NutritionState, NutritionStatus},
    prediction::{render_prediction_form, FormOutcome, PredictionFormState},
    render_disclaimer, render_navigation,
};

const PAGE_SCROLL: u16 = 10;

/// Services and model metadata shared by every view.
pub struct AppContext {
    pub prediction: PredictionService<XgbClassifier>,
    pub content: ContentService<ExerciseDbClient, EdamamClient>,
    /// SHA-256 of the loaded model artifact
    pub model_fingerprint: String,
}

impl AppContext {
    /// Assemble a context from already constructed adapters.
    ///
    /// # Errors
    /// Returns error if the classifier does not take 15 features.
    pub fn new(
        classifier: XgbClassifier,
        exercises: ExerciseDbClient,
        nutrition: EdamamClient,
    ) -> Result<Self, AppError> {
        let model_fingerprint = classifier.fingerprint().to_string();
        Ok(Self {
            prediction: PredictionService::new(Arc::new(classifier))?,
            content: ContentService::new(Arc::new(exercises), Arc::new(nutrition)),
            model_fingerprint,
        })
    }

    /// Load the model and build both HTTP clients from configuration.
    ///
    /// # Errors
    /// Returns error if the model cannot be loaded or an endpoint is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let classifier = XgbClassifier::load(&config.model_path)?;
        Self::new(
            classifier,
            ExerciseDbClient::from_config(config)?,
            EdamamClient::from_config(config)?,
        )
    }
}

/// Entries of the navigation sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    About,
    Prediction,
    Exercises,
    Nutrition,
}

impl Page {
    pub const ALL: [Self; 4] = [Self::About, Self::Prediction, Self::Exercises, Self::Nutrition];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Prediction => "Heart Disease Prediction",
            Self::Exercises => "Exercises",
            Self::Nutrition => "Nutritional Analysis",
        }
    }

    fn from_function_key(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }
}

/// The active view, owning its own state.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    About,
    Prediction(PredictionFormState),
    Exercises(ExercisesState),
    Nutrition(NutritionState),
}

impl View {
    /// Fresh state for `page`.
    #[must_use]
    pub fn open(page: Page) -> Self {
        match page {
            Page::About => Self::About,
            Page::Prediction => Self::Prediction(PredictionFormState::default()),
            Page::Exercises => Self::Exercises(ExercisesState::Loading),
            Page::Nutrition => Self::Nutrition(NutritionState::default()),
        }
    }

    #[must_use]
    pub fn page(&self) -> Page {
        match self {
            Self::About => Page::About,
            Self::Prediction(_) => Page::Prediction,
            Self::Exercises(_) => Page::Exercises,
            Self::Nutrition(_) => Page::Nutrition,
        }
    }
}

/// Blocking work deferred until a loading frame has been drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    FetchExercises,
    AnalyzeNutrition,
}

/// Main application state
pub struct App {
    context: AppContext,

    view: View,

    should_quit: bool,

    pending: Option<PendingAction>,
}

impl App {
    #[must_use]
    pub fn new(context: AppContext) -> Self {
        Self {
            context,
            view: View::About,
            should_quit: false,
            pending: None,
        }
    }

    /// The active view.
    #[must_use]
    pub fn view(&self) -> &View {
        &self.view
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        // Mouse capture stays off so links can be selected and copied.
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        // Leave no typed clinical values behind in memory.
        self.switch_to(Page::About);

        result
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            // The loading frame is on screen; now do the blocking call.
            if let Some(action) = self.pending.take() {
                self.perform(action);
                continue;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the sidebar, the active view and the disclaimer.
    pub fn draw(&self, f: &mut Frame) {
        let area = f.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(0)])
            .split(rows[0]);

        let titles: Vec<&str> = Page::ALL.iter().map(|p| p.title()).collect();
        let selected = Page::ALL
            .iter()
            .position(|p| *p == self.view.page())
            .unwrap_or_default();
        render_navigation(f, columns[0], &titles, selected);

        let content_area = columns[1];
        match &self.view {
            View::About => render_about(f, content_area, &self.context.model_fingerprint),
            View::Prediction(state) => render_prediction_form(f, content_area, state),
            View::Exercises(state) => render_exercises(f, content_area, state),
            View::Nutrition(state) => render_nutrition(f, content_area, state),
        }

        render_disclaimer(f, rows[1]);
    }

    /// Replace the active view with fresh state for `page`.
    pub fn switch_to(&mut self, page: Page) {
        if self.view.page() == page {
            return;
        }

        if let View::Prediction(state) = &mut self.view {
            state.clear_sensitive();
        }

        tracing::debug!("Switching view to {}", page.title());
        self.view = View::open(page);
        self.pending = match page {
            Page::Exercises => Some(PendingAction::FetchExercises),
            _ => None,
        };
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        if let KeyCode::F(n) = key {
            if let Some(page) = Page::from_function_key(n) {
                self.switch_to(page);
            }
            return;
        }

        match &mut self.view {
            View::About => {
                if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
                    self.should_quit = true;
                }
            }
            View::Prediction(state) => match key {
                KeyCode::Up | KeyCode::BackTab => state.prev_field(),
                KeyCode::Down | KeyCode::Tab => state.next_field(),
                KeyCode::Left => state.prev_option(),
                KeyCode::Right => state.next_option(),
                KeyCode::Char('s') | KeyCode::Char('S') => state.load_sample_data(),
                KeyCode::Char(c) => state.input_char(c),
                KeyCode::Backspace => state.delete_char(),
                KeyCode::Delete => state.clear_field(),
                KeyCode::Enter => self.submit_prediction(),
                _ => {}
            },
            View::Exercises(state) => match key {
                KeyCode::Up => state.scroll_up(1),
                KeyCode::Down => state.scroll_down(1),
                KeyCode::PageUp => state.scroll_up(PAGE_SCROLL),
                KeyCode::PageDown => state.scroll_down(PAGE_SCROLL),
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    *state = ExercisesState::Loading;
                    self.pending = Some(PendingAction::FetchExercises);
                }
                _ => {}
            },
            View::Nutrition(state) => match key {
                KeyCode::Tab | KeyCode::BackTab => state.toggle_focus(),
                KeyCode::Up => state.scroll_up(1),
                KeyCode::Down => state.scroll_down(1),
                KeyCode::PageUp => state.scroll_up(PAGE_SCROLL),
                KeyCode::PageDown => state.scroll_down(PAGE_SCROLL),
                KeyCode::Char(c) => state.input_char(c),
                KeyCode::Backspace => state.delete_char(),
                KeyCode::Delete => state.clear_field(),
                KeyCode::Enter => {
                    state.status = NutritionStatus::Loading;
                    self.pending = Some(PendingAction::AnalyzeNutrition);
                }
                _ => {}
            },
        }
    }

    fn submit_prediction(&mut self) {
        let View::Prediction(state) = &mut self.view else {
            return;
        };

        match self.context.prediction.submit(&state.to_form()) {
            Ok(submission) => state.apply(submission),
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                state.outcome = Some(FormOutcome::Failed(e.to_string()));
            }
        }
    }

    /// Run a deferred request and store its outcome in the active view.
    ///
    /// Does nothing if the view changed since the request was queued.
    fn perform(&mut self, action: PendingAction) {
        match (action, &mut self.view) {
            (PendingAction::FetchExercises, View::Exercises(state)) => {
                *state = match self.context.content.fetch_exercises() {
                    Ok(fetch) => ExercisesState::loaded(fetch),
                    Err(e) => ExercisesState::Error {
                        message: fetch_failure(&e),
                    },
                };
            }
            (PendingAction::AnalyzeNutrition, View::Nutrition(state)) => {
                match self.context.content.analyze(&state.title, &state.ingredients) {
                    Ok(analysis) => state.show(analysis),
                    Err(e) => {
                        state.status = NutritionStatus::Error {
                            message: fetch_failure(&e),
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

/// Inline message for a request that never produced an HTTP status.
fn fetch_failure(err: &AppError) -> String {
    tracing::error!("Content request failed: {}", err);
    match err {
        AppError::Fetch(inner) => format!("Failed to fetch data: {inner}"),
        other => format!("Failed to fetch data: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Analysis;
    use crate::domain::RiskAssessment;
    use ratatui::backend::TestBackend;

    const DEMO_MODEL: &[u8] = include_bytes!("../../models/demo_model.json");

    fn create_test_app() -> App {
        let config = AppConfig::default();
        let classifier = XgbClassifier::from_slice(DEMO_MODEL).expect("Should parse demo model");
        let context = AppContext::new(
            classifier,
            ExerciseDbClient::from_config(&config).expect("Should build client"),
            EdamamClient::from_config(&config).expect("Should build client"),
        )
        .expect("Should build context");
        App::new(context)
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    #[test]
    fn test_starts_on_about() {
        let app = create_test_app();
        assert_eq!(app.view(), &View::About);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_function_keys_switch_pages() {
        let mut app = create_test_app();

        press(&mut app, KeyCode::F(2));
        assert_eq!(app.view().page(), Page::Prediction);

        press(&mut app, KeyCode::F(4));
        assert_eq!(app.view().page(), Page::Nutrition);
        assert_eq!(app.pending, None);

        press(&mut app, KeyCode::F(3));
        assert_eq!(app.view(), &View::Exercises(ExercisesState::Loading));
        assert_eq!(app.pending, Some(PendingAction::FetchExercises));

        press(&mut app, KeyCode::F(9));
        assert_eq!(app.view().page(), Page::Exercises);
    }

    #[test]
    fn test_sample_submission_predicts() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);

        let View::Prediction(state) = app.view() else {
            panic!("expected the prediction view");
        };
        let Some(FormOutcome::Predicted(result)) = &state.outcome else {
            panic!("expected a prediction outcome");
        };
        assert_eq!(result.assessment(), RiskAssessment::NotAtRisk);
    }

    #[test]
    fn test_empty_form_submission_warns() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Enter);

        let View::Prediction(state) = app.view() else {
            panic!("expected the prediction view");
        };
        assert_eq!(
            state.outcome,
            Some(FormOutcome::Warning(
                "Please fill out all fields before submitting.".to_string()
            ))
        );
    }

    #[test]
    fn test_switching_away_discards_form() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::F(1));
        press(&mut app, KeyCode::F(2));

        assert_eq!(
            app.view(),
            &View::Prediction(PredictionFormState::default())
        );
    }

    #[test]
    fn test_empty_ingredients_need_no_request() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::F(4));
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Enter);

        let action = app.pending.take().expect("analysis queued");
        app.perform(action);

        let View::Nutrition(state) = app.view() else {
            panic!("expected the nutrition view");
        };
        assert_eq!(
            state.status,
            NutritionStatus::Done {
                analysis: Analysis::MissingIngredients,
                scroll: 0
            }
        );
    }

    #[test]
    fn test_stale_action_is_dropped() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::F(3));
        press(&mut app, KeyCode::F(1));
        app.perform(PendingAction::FetchExercises);
        assert_eq!(app.view(), &View::About);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::F(4));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit(), "q is text in the nutrition form");

        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());
    }

    #[test]
    fn test_draw_highlights_sidebar() {
        let app = create_test_app();
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).expect("terminal");
        terminal.draw(|f| app.draw(f)).expect("draw");

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        for page in Page::ALL {
            assert!(rendered.contains(page.title()), "missing {}", page.title());
        }
        assert!(rendered.contains("DISCLAIMER"));
    }

    #[test]
    fn test_every_page_shows_quit_hint() {
        let mut app = create_test_app();

        for key in [KeyCode::F(2), KeyCode::F(3), KeyCode::F(4)] {
            press(&mut app, key);
            let mut terminal = Terminal::new(TestBackend::new(160, 40)).expect("terminal");
            terminal.draw(|f| app.draw(f)).expect("draw");

            let rendered: String = terminal
                .backend()
                .buffer()
                .content()
                .iter()
                .map(|c| c.symbol())
                .collect();
            assert!(
                rendered.contains("Ctrl+Q") && rendered.contains("Quit"),
                "no quit hint on {}",
                app.view().page().title()
            );
        }
    }
}
