// Modal overlays: failure notices, the detail view, and the fatal screen.
//
// Notices and the detail popup render centered on top of the main layout
// and are dismissed by any key. The fatal screen replaces the whole frame.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

/// Render a blocking failure notice centered on the screen.
pub fn render_notice(frame: &mut Frame, area: Rect, message: &str) {
    let width = (message.len().min(200) as u16 + 6).max(24).min(area.width);
    let popup_area = centered_rect(width, 5, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            " Error ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(format!("\n {message}"))
        .wrap(Wrap { trim: false })
        .block(block);

    frame.render_widget(paragraph, popup_area);
}

/// Render the raw-record detail popup centered on the screen.
pub fn render_detail(frame: &mut Frame, area: Rect, text: &str) {
    let height = (text.lines().count().min(200) as u16 + 2).max(5).min(area.height);
    let width = (text.lines().map(|l| l.len()).max().unwrap_or(0).min(200) as u16 + 4)
        .max(30)
        .min(area.width);
    let popup_area = centered_rect(width, height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Player Details ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(text.to_string())
        .wrap(Wrap { trim: false })
        .block(block);

    frame.render_widget(paragraph, popup_area);
}

/// Render the terminal error screen shown after a failed initial load.
pub fn render_fatal(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(format!("Error: {message}"))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Compute a centered rectangle of the given size within `area`, clamped
/// to the available space.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
