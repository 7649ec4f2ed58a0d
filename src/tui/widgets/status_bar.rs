// Status and help bars (single rows at the top and bottom of the screen).

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{Focus, ViewState};

/// Render the status bar: player count and backend base URL.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let text = format!(
        " Soccer Players: {} | Backend: {}",
        state.players.len(),
        state.base_url
    );
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Render the help bar with the bindings for the focused zone.
pub fn render_help(frame: &mut Frame, area: Rect, state: &ViewState) {
    let text = match state.focus {
        Focus::Table => {
            " q:Quit | Up/Down:Select | d:Delete | Enter:Details | Tab:Add Player"
        }
        Focus::Form(_) => {
            " Esc:Back | Tab:Next Field | Enter:Next/Submit | Ctrl+S:Submit"
        }
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
