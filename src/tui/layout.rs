// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                               |
// +--------------------------------------------------+
// | Soccer Players table (fill)                      |
// |                                                  |
// +--------------------------------------------------+
// | Add New Player form (8 rows)                     |
// +--------------------------------------------------+
// | Help Bar (1 row)                                 |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the add-player form: five field rows plus the border.
const FORM_HEIGHT: u16 = 8;

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: player count and backend base URL.
    pub status_bar: Rect,
    /// The roster table.
    pub table: Rect,
    /// The add-player form.
    pub form: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // status bar
            Constraint::Min(5),              // table
            Constraint::Length(FORM_HEIGHT), // form
            Constraint::Length(1),           // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        table: vertical[1],
        form: vertical[2],
        help_bar: vertical[3],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
