// Roster table widget: one row per player in collection order.
//
// Columns: ID, Name, Last Name, Birthdate, Features, Position (label).
// The selected row is highlighted; the border lights up when the table
// has focus.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::tui::{Focus, ViewState};

/// Render the roster table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let header = Row::new(vec![
        Cell::from("ID"),
        Cell::from("Name"),
        Cell::from("Last Name"),
        Cell::from("Birthdate"),
        Cell::from("Features"),
        Cell::from("Position"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let style = if i == state.selected {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(p.soccer_player_id.to_string()),
                Cell::from(p.name.clone()),
                Cell::from(p.last_name.clone()),
                Cell::from(p.birthdate.clone()),
                Cell::from(p.features.clone()),
                Cell::from(p.position.to_string()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Length(12),
        Constraint::Min(12),
        Constraint::Length(14),
    ];

    let border_style = if state.focus == Focus::Table {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!("Soccer Players ({})", state.players.len())),
    );

    frame.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
