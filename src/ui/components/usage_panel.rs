//! Bucket panel showing one fill bar per rate-limit window.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use quotawatch_core::usage::Severity;

use crate::state::{AppState, PanelRow, ViewState};

/// Fixed label width for alignment (longest label "Session" = 7 chars)
const LABEL_WIDTH: usize = 7;

/// Usage panel widget
pub struct UsagePanel;

impl UsagePanel {
    /// Render the usage panel
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(" Claude Usage ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Gray));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        match state.view() {
            ViewState::Loading => {
                let line = Line::from(Span::styled(
                    " Loading usage...",
                    Style::default().fg(Color::DarkGray),
                ));
                frame.render_widget(Paragraph::new(vec![line]), inner);
            }
            ViewState::Error(msg) => {
                let lines = vec![
                    Line::from(Span::styled(
                        format!(" Error: {}", msg),
                        Style::default().fg(Color::Red),
                    )),
                    Line::from(Span::styled(
                        " Press r to retry",
                        Style::default().fg(Color::DarkGray),
                    )),
                ];
                frame.render_widget(Paragraph::new(lines), inner);
            }
            ViewState::Showing(_) => {
                // Column widths are shared across rows so the bars line up
                let percent_width = state
                    .panels
                    .iter()
                    .map(|p| p.display.percent_text.len())
                    .max()
                    .unwrap_or(0);
                let reset_width = state
                    .panels
                    .iter()
                    .map(|p| p.display.reset_text.chars().count())
                    .max()
                    .unwrap_or(0);

                let lines: Vec<Line> = state
                    .panels
                    .iter()
                    .enumerate()
                    .filter_map(|(i, row)| {
                        if i as u16 >= inner.height {
                            return None;
                        }
                        Some(Self::render_row(row, inner.width, percent_width, reset_width))
                    })
                    .collect();

                frame.render_widget(Paragraph::new(lines), inner);
            }
        }
    }

    /// Render a single bucket with uniform bar width across all rows:
    /// " Session ████████░░░░░  79% used  Resets in 2 hr 5 min"
    fn render_row(
        row: &PanelRow,
        width: u16,
        percent_width: usize,
        reset_width: usize,
    ) -> Line<'static> {
        let padded_label = format!("{:w$}", row.label, w = LABEL_WIDTH);
        let percent_str = format!("{:>w$}", row.display.percent_text, w = percent_width);

        let reset_col_width = if reset_width > 0 { reset_width + 1 } else { 0 };
        // " Label   ████░░░░ 100% used reset_col"
        let fixed_width = 1 + LABEL_WIDTH + 1 + 1 + percent_width + 1 + reset_col_width;
        let bar_width = if width as usize > fixed_width + 4 {
            width as usize - fixed_width
        } else {
            4
        };

        let filled = (bar_width as u32 * row.display.fill as u32 / 100) as usize;
        let empty = bar_width.saturating_sub(filled);

        let dim = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM);

        let mut spans = vec![
            Span::styled(
                format!(" {} ", padded_label),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::DIM),
            ),
            Span::styled(
                "█".repeat(filled),
                Style::default().fg(severity_color(row.display.severity)),
            ),
            Span::styled("░".repeat(empty), dim),
            Span::styled(
                format!(" {}", percent_str),
                Style::default().fg(Color::White),
            ),
        ];

        // Right-pad reset text for column alignment
        if reset_width > 0 {
            let padded_reset = format!(" {:w$}", row.display.reset_text, w = reset_width);
            spans.push(Span::styled(
                padded_reset,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::DIM),
            ));
        }

        Line::from(spans)
    }
}

/// Bar color for a severity level
fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Low => Color::Green,
        Severity::Mid => Color::Yellow,
        Severity::High => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_colors() {
        assert_eq!(severity_color(Severity::Low), Color::Green);
        assert_eq!(severity_color(Severity::Mid), Color::Yellow);
        assert_eq!(severity_color(Severity::High), Color::Red);
    }
}
