//! Recommended exercises view.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{render_header, render_key_hints};
use crate::domain::{Exercise, ExerciseFetch};
use crate::tui::styles::MedicalTheme;

/// Exercises view state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExercisesState {
    /// Request pending
    #[default]
    Loading,
    /// Request completed (possibly with a non-200 status)
    Loaded { fetch: ExerciseFetch, scroll: u16 },
    /// Transport failure
    Error { message: String },
}

impl ExercisesState {
    pub fn loaded(fetch: ExerciseFetch) -> Self {
        Self::Loaded { fetch, scroll: 0 }
    }

    pub fn scroll_down(&mut self, lines: u16) {
        if let Self::Loaded { scroll, .. } = self {
            *scroll = scroll.saturating_add(lines);
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        if let Self::Loaded { scroll, .. } = self {
            *scroll = scroll.saturating_sub(lines);
        }
    }
}

/// Lines for one catalog entry, ending with a separator.
pub fn exercise_lines(exercise: &Exercise) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(exercise.name.clone(), MedicalTheme::subtitle())),
        labeled("Target Muscle", &exercise.target),
        labeled("Body Part", &exercise.body_part),
        labeled("Equipment", &exercise.equipment),
        Line::from(Span::styled("Instructions:", MedicalTheme::text_secondary())),
    ];

    lines.extend(
        exercise
            .instructions
            .iter()
            .enumerate()
            .map(|(i, step)| Line::from(Span::styled(format!("{}. {step}", i + 1), MedicalTheme::text()))),
    );

    if !exercise.gif_url.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Media: ", MedicalTheme::text_secondary()),
            Span::styled(exercise.gif_url.clone(), MedicalTheme::info()),
        ]));
    }

    lines.push(Line::from(Span::styled("---", MedicalTheme::text_muted())));
    lines
}

fn labeled(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), MedicalTheme::text_secondary()),
        Span::styled(value.to_string(), MedicalTheme::text()),
    ])
}

/// Render the exercises view
pub fn render_exercises(f: &mut Frame, area: Rect, state: &ExercisesState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(2), // Key hints
        ])
        .split(area);

    render_header(
        f,
        chunks[0],
        "Recommended Exercises for Heart Disease Patients",
        "",
    );

    let (lines, scroll) = match state {
        ExercisesState::Loading => (
            vec![Line::from(Span::styled(
                "Fetching exercises...",
                MedicalTheme::info(),
            ))],
            0,
        ),
        ExercisesState::Loaded { fetch, scroll } => {
            let lines = match fetch {
                ExerciseFetch::Exercises(list) => list.iter().flat_map(exercise_lines).collect(),
                other => vec![Line::from(Span::styled(
                    other.message().unwrap_or_default(),
                    MedicalTheme::warning(),
                ))],
            };
            (lines, *scroll)
        }
        ExercisesState::Error { message } => (
            vec![Line::from(Span::styled(message.clone(), MedicalTheme::danger()))],
            0,
        ),
    };

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(content, chunks[1]);

    render_key_hints(
        f,
        chunks[2],
        &[
            ("↑↓", "Scroll"),
            ("PgUp/PgDn", "Page"),
            ("R", "Refresh"),
            ("Ctrl+Q", "Quit"),
        ],
    );
}
