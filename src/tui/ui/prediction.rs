//! Heart disease prediction form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use zeroize::Zeroize;

use super::{render_header, render_key_hints};
use crate::application::Submission;
use crate::domain::{
    CategoricalField, ClinicalForm, FeatureSlot, FieldId, NumericField, PredictionResult,
    FEATURE_LAYOUT, PLACEHOLDER,
};
use crate::tui::styles::MedicalTheme;

/// Longest accepted numeric entry.
const MAX_INPUT_LEN: usize = 6;

/// Editable value of one form row.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Numeric { field: NumericField, text: String },
    /// `index` 0 is the placeholder; `i > 0` is `options()[i - 1]`.
    Choice { field: CategoricalField, index: usize },
}

impl FieldInput {
    #[must_use]
    pub fn id(&self) -> FieldId {
        match self {
            Self::Numeric { field, .. } => FieldId::Numeric(*field),
            Self::Choice { field, .. } => FieldId::Categorical(*field),
        }
    }

    fn display(&self) -> Option<&str> {
        match self {
            Self::Numeric { text, .. } if text.is_empty() => None,
            Self::Numeric { text, .. } => Some(text.as_str()),
            Self::Choice { index: 0, .. } => None,
            Self::Choice { field, index } => field.options().get(index - 1).map(|(l, _)| *l),
        }
    }

    fn hint(&self) -> &'static str {
        match self {
            Self::Numeric { field, .. } => field.help(),
            Self::Choice { .. } => PLACEHOLDER,
        }
    }
}

/// Result panel content.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Warning(String),
    Predicted(PredictionResult),
    Failed(String),
}

/// Prediction form state
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionFormState {
    pub fields: Vec<FieldInput>,
    pub selected_field: usize,
    pub outcome: Option<FormOutcome>,
}

impl Default for PredictionFormState {
    fn default() -> Self {
        let fields = FEATURE_LAYOUT
            .iter()
            .filter_map(|slot| match slot {
                FeatureSlot::Field(FieldId::Numeric(field)) => Some(FieldInput::Numeric {
                    field: *field,
                    text: String::new(),
                }),
                FeatureSlot::Field(FieldId::Categorical(field)) => Some(FieldInput::Choice {
                    field: *field,
                    index: 0,
                }),
                FeatureSlot::Placeholder => None,
            })
            .collect();

        Self {
            fields,
            selected_field: 0,
            outcome: None,
        }
    }
}

impl PredictionFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Type into the current numeric field.
    ///
    /// Whole-number fields take digits only; the ST depression field also
    /// takes a single decimal point.
    pub fn input_char(&mut self, c: char) {
        if let FieldInput::Numeric { field, text } = &mut self.fields[self.selected_field] {
            let accepted = c.is_ascii_digit()
                || (c == '.' && !field.is_integral() && !text.contains('.'));
            if accepted && text.len() < MAX_INPUT_LEN {
                text.push(c);
                self.outcome = None;
            }
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        if let FieldInput::Numeric { text, .. } = &mut self.fields[self.selected_field] {
            text.pop();
        }
    }

    /// Reset the current field to empty / placeholder.
    pub fn clear_field(&mut self) {
        match &mut self.fields[self.selected_field] {
            FieldInput::Numeric { text, .. } => text.zeroize(),
            FieldInput::Choice { index, .. } => *index = 0,
        }
    }

    /// Step the current choice forward, wrapping back to the placeholder.
    pub fn next_option(&mut self) {
        if let FieldInput::Choice { field, index } = &mut self.fields[self.selected_field] {
            *index = (*index + 1) % (field.options().len() + 1);
            self.outcome = None;
        }
    }

    /// Step the current choice backward, wrapping to the last option.
    pub fn prev_option(&mut self) {
        if let FieldInput::Choice { field, index } = &mut self.fields[self.selected_field] {
            let len = field.options().len() + 1;
            *index = (*index + len - 1) % len;
            self.outcome = None;
        }
    }

    /// Collect the entries into a form for validation.
    ///
    /// Unparseable numeric text is treated as empty.
    #[must_use]
    pub fn to_form(&self) -> ClinicalForm {
        let mut form = ClinicalForm::new();
        for input in &self.fields {
            match input {
                FieldInput::Numeric { field, text } => {
                    form.set_numeric(*field, text.parse::<f64>().ok());
                }
                FieldInput::Choice { field, .. } => {
                    if let Some(choice) = input.display() {
                        form.select(*field, choice);
                    }
                }
            }
        }
        form
    }

    /// Fill every field with the sample patient.
    pub fn load_sample_data(&mut self) {
        let sample = ClinicalForm::sample();
        for input in self.fields.iter_mut() {
            match input {
                FieldInput::Numeric { field, text } => {
                    text.zeroize();
                    if let Some(value) = sample.numeric(*field) {
                        *text = if field.is_integral() {
                            format!("{value:.0}")
                        } else {
                            format!("{value:.1}")
                        };
                    }
                }
                FieldInput::Choice { field, index } => {
                    *index = sample
                        .selection(*field)
                        .and_then(|choice| field.options().iter().position(|(l, _)| *l == choice))
                        .map_or(0, |pos| pos + 1);
                }
            }
        }
        self.outcome = None;
    }

    /// Show the outcome of a submission.
    pub fn apply(&mut self, submission: Submission) {
        self.outcome = Some(match submission {
            Submission::Blocked(warning) => FormOutcome::Warning(warning.message()),
            Submission::Predicted(result) => FormOutcome::Predicted(result),
        });
    }

    /// Wipe typed values from memory and reset every field.
    pub fn clear_sensitive(&mut self) {
        for input in self.fields.iter_mut() {
            match input {
                FieldInput::Numeric { text, .. } => text.zeroize(),
                FieldInput::Choice { index, .. } => *index = 0,
            }
        }
        self.outcome = None;
        self.selected_field = 0;
    }
}

/// Render the prediction form
pub fn render_prediction_form(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(4), // Help for the selected field
            Constraint::Length(3), // Outcome
            Constraint::Length(2), // Key hints
        ])
        .split(area);

    render_header(
        f,
        chunks[0],
        "Heart Disease Prediction",
        "Enter the following parameters to predict the likelihood of heart disease.",
    );
    render_form_fields(f, chunks[1], state);
    render_field_help(f, chunks[2], state);
    render_outcome(f, chunks[3], state.outcome.as_ref());
    render_key_hints(
        f,
        chunks[4],
        &[
            ("↑↓", "Navigate"),
            ("←→", "Choose"),
            ("Enter", "Submit"),
            ("S", "Sample Data"),
            ("Del", "Clear Field"),
            ("Ctrl+Q", "Quit"),
        ],
    );
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FieldInput],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, input) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", input.id().label()), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value = match input.display() {
            Some(v) => Span::styled(v.to_string(), MedicalTheme::text()),
            None => Span::styled(input.hint(), MedicalTheme::text_muted()),
        };

        let mut spans = vec![Span::raw(" ")];
        match (input, is_selected) {
            (FieldInput::Choice { .. }, true) => {
                spans.push(Span::styled("◂ ", MedicalTheme::cursor()));
                spans.push(value);
                spans.push(Span::styled(" ▸", MedicalTheme::cursor()));
            }
            (FieldInput::Numeric { .. }, true) => {
                spans.push(value);
                spans.push(Span::styled("▌", MedicalTheme::cursor()));
            }
            _ => spans.push(value),
        }

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[i]);
    }
}

fn render_field_help(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let help = match &state.fields[state.selected_field] {
        FieldInput::Numeric { field, .. } => field.help().to_string(),
        FieldInput::Choice { field, .. } => field.help().map(str::to_string).unwrap_or_else(|| {
            field
                .options()
                .iter()
                .map(|(label, _)| *label)
                .collect::<Vec<_>>()
                .join(" / ")
        }),
    };

    let p = Paragraph::new(Span::styled(help, MedicalTheme::text_secondary()))
        .block(
            Block::default()
                .title(Span::styled(" Help ", MedicalTheme::subtitle()))
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

fn render_outcome(f: &mut Frame, area: Rect, outcome: Option<&FormOutcome>) {
    let line = match outcome {
        None => Line::from(Span::styled(
            "Press Enter to submit.",
            MedicalTheme::text_muted(),
        )),
        Some(FormOutcome::Warning(message)) => Line::from(vec![
            Span::styled("! ", MedicalTheme::warning()),
            Span::styled(message.clone(), MedicalTheme::warning()),
        ]),
        Some(FormOutcome::Predicted(result)) => Line::from(vec![
            Span::styled(result.message(), MedicalTheme::risk(result.assessment())),
            Span::styled(
                format!("  ({})", result.assessed_at.format("%H:%M:%S UTC")),
                MedicalTheme::text_muted(),
            ),
        ]),
        Some(FormOutcome::Failed(message)) => Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(message.clone(), MedicalTheme::danger()),
        ]),
    };

    let p = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
