//! Nutritional analysis view.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{render_header, render_key_hints};
use crate::application::Analysis;
use crate::domain::{NutritionFetch, RecipeRequest};
use crate::tui::styles::MedicalTheme;

/// Which text box receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutritionInput {
    Title,
    Ingredients,
}

/// Result panel state.
#[derive(Debug, Clone, PartialEq)]
pub enum NutritionStatus {
    Idle,
    Loading,
    Done { analysis: Analysis, scroll: u16 },
    Error { message: String },
}

/// Nutrition view state
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionState {
    pub title: String,
    pub ingredients: String,
    pub focus: NutritionInput,
    pub status: NutritionStatus,
}

impl Default for NutritionState {
    fn default() -> Self {
        Self {
            title: RecipeRequest::DEFAULT_TITLE.to_string(),
            ingredients: RecipeRequest::DEFAULT_INGREDIENTS.to_string(),
            focus: NutritionInput::Ingredients,
            status: NutritionStatus::Idle,
        }
    }
}

impl NutritionState {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            NutritionInput::Title => NutritionInput::Ingredients,
            NutritionInput::Ingredients => NutritionInput::Title,
        };
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            NutritionInput::Title => &mut self.title,
            NutritionInput::Ingredients => &mut self.ingredients,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if !c.is_control() {
            self.focused_mut().push(c);
        }
    }

    pub fn delete_char(&mut self) {
        self.focused_mut().pop();
    }

    pub fn clear_field(&mut self) {
        self.focused_mut().clear();
    }

    pub fn scroll_down(&mut self, lines: u16) {
        if let NutritionStatus::Done { scroll, .. } = &mut self.status {
            *scroll = scroll.saturating_add(lines);
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        if let NutritionStatus::Done { scroll, .. } = &mut self.status {
            *scroll = scroll.saturating_sub(lines);
        }
    }

    pub fn show(&mut self, analysis: Analysis) {
        self.status = NutritionStatus::Done {
            analysis,
            scroll: 0,
        };
    }
}

/// Render the nutrition view
pub fn render_nutrition(f: &mut Frame, area: Rect, state: &NutritionState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Title input
            Constraint::Length(5), // Ingredients input
            Constraint::Min(0),    // Results
            Constraint::Length(2), // Key hints
        ])
        .split(area);

    render_header(f, chunks[0], "Nutritional Analysis for Recipes", "");
    render_input(
        f,
        chunks[1],
        "Enter Recipe Title",
        &state.title,
        state.focus == NutritionInput::Title,
    );
    render_input(
        f,
        chunks[2],
        "Enter Recipe Ingredients",
        &state.ingredients,
        state.focus == NutritionInput::Ingredients,
    );
    render_results(f, chunks[3], &state.status);
    render_key_hints(
        f,
        chunks[4],
        &[
            ("Tab", "Switch Field"),
            ("Enter", "Analyze Nutritional Information"),
            ("↑↓", "Scroll"),
            ("Del", "Clear Field"),
            ("Ctrl+Q", "Quit"),
        ],
    );
}

fn render_input(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let (border_style, title_style) = if focused {
        (MedicalTheme::border_focused(), MedicalTheme::focused())
    } else {
        (MedicalTheme::border(), MedicalTheme::text_secondary())
    };

    let mut spans = vec![Span::styled(value.to_string(), MedicalTheme::text())];
    if focused {
        spans.push(Span::styled("▌", MedicalTheme::cursor()));
    }

    let p = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .title(Span::styled(format!(" {label} "), title_style))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(p, area);
}

fn render_results(f: &mut Frame, area: Rect, status: &NutritionStatus) {
    let (lines, scroll): (Vec<Line>, u16) = match status {
        NutritionStatus::Idle => (vec![], 0),
        NutritionStatus::Loading => (
            vec![Line::from(Span::styled(
                "Analyzing ingredients...",
                MedicalTheme::info(),
            ))],
            0,
        ),
        NutritionStatus::Done { analysis, scroll } => (result_lines(analysis), *scroll),
        NutritionStatus::Error { message } => (
            vec![Line::from(Span::styled(message.clone(), MedicalTheme::danger()))],
            0,
        ),
    };

    let p = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    f.render_widget(p, area);
}

fn result_lines(analysis: &Analysis) -> Vec<Line<'static>> {
    let style = match analysis {
        Analysis::MissingIngredients => MedicalTheme::danger(),
        Analysis::Fetched(NutritionFetch::Report(_)) => MedicalTheme::text(),
        Analysis::Fetched(NutritionFetch::NoData) => MedicalTheme::warning(),
        Analysis::Fetched(NutritionFetch::Failed { .. }) => MedicalTheme::danger(),
    };

    analysis
        .lines()
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let is_heading = i == 0 && matches!(analysis, Analysis::Fetched(NutritionFetch::Report(_)));
            if is_heading {
                Line::from(Span::styled(text, MedicalTheme::subtitle()))
            } else {
                Line::from(Span::styled(text, style))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_defaults_prefill_salad_recipe() {
        let state = NutritionState::default();
        assert_eq!(state.title, "Healthy Salad");
        assert!(state.ingredients.starts_with("1 cup spinach"));
        assert_eq!(state.status, NutritionStatus::Idle);
    }

    #[test]
    fn test_typing_goes_to_focused_box() {
        let mut state = NutritionState::default();
        state.clear_field();
        for c in "2 eggs".chars() {
            state.input_char(c);
        }
        state.toggle_focus();
        state.clear_field();
        state.input_char('X');
        state.delete_char();
        state.input_char('Y');

        assert_eq!(state.ingredients, "2 eggs");
        assert_eq!(state.title, "Y");
    }

    #[test]
    fn test_render_failed_response() {
        let mut state = NutritionState::default();
        state.show(Analysis::Fetched(NutritionFetch::Failed {
            status: 401,
            body: "unauthorized".to_string(),
        }));

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal
            .draw(|f| render_nutrition(f, f.area(), &state))
            .expect("draw");

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(rendered.contains("Failed to fetch data. Status Code: 401"));
        assert!(rendered.contains("Error: unauthorized"));
    }
}
