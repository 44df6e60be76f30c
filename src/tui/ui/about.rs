//! About view: what the app does and which model is loaded.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::render_header;
use crate::tui::styles::MedicalTheme;

pub const TITLE: &str = "Heart Health Companion";

const DESCRIPTION: [&str; 4] = [
    "This app uses advanced machine learning algorithms and a dataset of historical patient records to predict the likelihood of various heart diseases with improved accuracy.",
    "It enables healthcare providers and individuals to identify potential risks early, offering valuable insights to take proactive measures, adopt healthier lifestyles, and seek timely medical intervention.",
    "Predicting these conditions at an early stage can significantly reduce complications, improve treatment outcomes, and enhance quality of life.",
    "This app aims to bridge the gap between data-driven insights and practical healthcare solutions, empowering users to prioritize heart health.",
];

const ILLUSTRATION_URL: &str = "https://aanmc.org/wp-content/uploads/2017/12/iStock-628328284.jpg";

/// Render the About view.
pub fn render_about(f: &mut Frame, area: Rect, model_fingerprint: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Description
            Constraint::Length(4), // Model panel
        ])
        .split(area);

    render_header(f, chunks[0], TITLE, "About the App");

    let mut text = Vec::with_capacity(DESCRIPTION.len() * 2 + 2);
    for paragraph in DESCRIPTION {
        text.push(Line::from(Span::styled(paragraph, MedicalTheme::text())));
        text.push(Line::from(""));
    }
    text.push(Line::from(vec![
        Span::styled("Heart Health: ", MedicalTheme::text_secondary()),
        Span::styled(ILLUSTRATION_URL, MedicalTheme::info()),
    ]));

    let description = Paragraph::new(text)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(description, chunks[1]);

    let model = Paragraph::new(vec![Line::from(vec![
        Span::styled("SHA-256: ", MedicalTheme::text_secondary()),
        Span::styled(model_fingerprint.to_string(), MedicalTheme::text_muted()),
    ])])
    .block(
        Block::default()
            .title(Span::styled(" Model ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(model, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_about_shows_title_and_fingerprint() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");

        terminal
            .draw(|f| render_about(f, f.area(), "abc123def"))
            .expect("draw");

        let buffer = terminal.backend().buffer().clone();
        let rendered: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(rendered.contains(TITLE));
        assert!(rendered.contains("abc123def"));
    }
}
