//! UI module: View components for the TUI.

pub mod about;
pub mod exercises;
pub mod nutrition;
pub mod prediction;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

/// One-line view header with a bottom rule.
pub fn render_header(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let mut spans = vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(title.to_string(), MedicalTheme::title()),
    ];
    if !subtitle.is_empty() {
        spans.push(Span::styled(" │ ", MedicalTheme::text_muted()));
        spans.push(Span::styled(
            subtitle.to_string(),
            MedicalTheme::text_secondary(),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

/// Sidebar with one entry per page; `selected` is highlighted.
pub fn render_navigation(f: &mut Frame, area: Rect, titles: &[&str], selected: usize) {
    let items: Vec<ListItem> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let key = format!(" F{} ", i + 1);
            let style = if i == selected {
                MedicalTheme::selected()
            } else {
                MedicalTheme::text()
            };
            ListItem::new(Line::from(vec![
                Span::styled(key, MedicalTheme::key_hint()),
                Span::styled(format!(" {title} "), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(Span::styled(" Navigation ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(list, area);
}

/// Key hints footer with a top rule.
pub fn render_key_hints(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!("[{key}] "), MedicalTheme::key_hint()),
                Span::styled(format!("{desc} "), MedicalTheme::key_desc()),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: This tool provides indicative estimates and does not replace professional medical evaluation.",
            MedicalTheme::text_muted(),
        )]),
        Line::from(vec![Span::styled(
            "Exercise and nutrition data come from third-party services.",
            MedicalTheme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
