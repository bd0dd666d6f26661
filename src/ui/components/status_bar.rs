use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::AppState;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = vec![];

        // Busy indicator while any fresh fetch is outstanding
        if state.is_fetching() {
            spans.push(Span::styled(
                format!(" {} Refreshing... ", state.spinner_char()),
                Style::default().fg(Color::Cyan),
            ));
        }

        spans.push(Span::styled(
            " r",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            ":Refresh ",
            Style::default().fg(Color::DarkGray),
        ));

        spans.push(Span::styled(
            "q",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(":Quit ", Style::default().fg(Color::DarkGray)));

        if let Some(last_updated) = &state.last_updated {
            spans.push(Span::styled(
                format!(" Last updated: {} ", last_updated),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));

        frame.render_widget(paragraph, area);
    }
}
