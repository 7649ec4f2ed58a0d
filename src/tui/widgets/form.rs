// Add-player form widget.
//
// One line per field with the focused field highlighted. The position
// selector cycles through "Select Position" and the four labels. A
// birthdate that does not parse as an ISO date is tinted as a hint; it
// never blocks submission (the gate only checks for presence).

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::player::{birthdate_is_iso, Position};
use crate::tui::{Focus, FormField, ViewState};

/// Placeholder shown while no position is selected (code 0).
const SELECT_POSITION: &str = "Select Position";

/// Render the add-player form into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = match state.focus {
        Focus::Form(field) => Some(field),
        Focus::Table => None,
    };

    let lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|field| field_line(*field, state, focused == Some(*field)))
        .collect();

    let border_style = if focused.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Add New Player"),
    );

    frame.render_widget(paragraph, area);
}

fn field_line(field: FormField, state: &ViewState, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let (value, value_style) = field_value(field, state);
    let mut spans = vec![
        Span::styled(format!(" {:<10} ", field.label()), label_style),
        Span::styled(value, value_style),
    ];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

/// Display text and style for one field's current value.
pub fn field_value(field: FormField, state: &ViewState) -> (String, Style) {
    match field {
        FormField::Name => (state.form.name.clone(), Style::default()),
        FormField::LastName => (state.form.last_name.clone(), Style::default()),
        FormField::Birthdate => {
            let value = state.form.birthdate.clone();
            let style = if value.is_empty() || birthdate_is_iso(&value) {
                Style::default()
            } else {
                Style::default().fg(Color::Red)
            };
            (value, style)
        }
        FormField::Features => (state.form.features.clone(), Style::default()),
        FormField::Position => {
            if state.form.position_code == 0 {
                (
                    SELECT_POSITION.to_string(),
                    Style::default().add_modifier(Modifier::DIM),
                )
            } else {
                (
                    format!(
                        "{} - {}",
                        state.form.position_code,
                        Position::label_for(state.form.position_code)
                    ),
                    Style::default(),
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
