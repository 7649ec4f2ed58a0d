// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the controller's roster state.
// The controller pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders at ~30 fps. Presentation-only
// concerns (field focus, row selection, popups) live here and never reach
// the controller.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::player::{DraftPlayer, PlayerRecord};
use crate::protocol::{UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

/// The form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    LastName,
    Birthdate,
    Features,
    Position,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::LastName,
        FormField::Birthdate,
        FormField::Features,
        FormField::Position,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::LastName => "Last Name",
            FormField::Birthdate => "Birthdate",
            FormField::Features => "Features",
            FormField::Position => "Position",
        }
    }

    pub fn next(self) -> FormField {
        match self {
            FormField::Name => FormField::LastName,
            FormField::LastName => FormField::Birthdate,
            FormField::Birthdate => FormField::Features,
            FormField::Features => FormField::Position,
            FormField::Position => FormField::Name,
        }
    }

    pub fn prev(self) -> FormField {
        match self {
            FormField::Name => FormField::Position,
            FormField::LastName => FormField::Name,
            FormField::Birthdate => FormField::LastName,
            FormField::Features => FormField::Birthdate,
            FormField::Position => FormField::Features,
        }
    }
}

/// Which part of the screen owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The roster table (row navigation, delete, detail).
    Table,
    /// One field of the add-player form.
    Form(FormField),
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the controller state for rendering.
///
/// Updated incrementally via `UiUpdate` messages. The `render_frame`
/// function reads this struct to draw the screen.
pub struct ViewState {
    /// Mirror of the collection state, in collection order.
    pub players: Vec<PlayerRecord>,
    /// Selected table row index (clamped to the table length).
    pub selected: usize,
    /// Mirror of the draft, used as the form's edit buffers.
    pub form: DraftPlayer,
    pub focus: Focus,
    /// Blocking notice for a failed operation; any key dismisses.
    pub notice: Option<String>,
    /// Pretty-printed JSON for the detail popup; any key dismisses.
    pub detail: Option<String>,
    /// Set when the initial load failed; replaces the whole display.
    pub fatal: Option<String>,
    /// Base URL shown in the status bar.
    pub base_url: String,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            players: Vec::new(),
            selected: 0,
            form: DraftPlayer::default(),
            focus: Focus::Table,
            notice: None,
            detail: None,
            fatal: None,
            base_url: String::new(),
        }
    }
}

impl ViewState {
    /// Identifier of the selected row, if the table has one.
    pub fn selected_player_id(&self) -> Option<u32> {
        self.players.get(self.selected).map(|p| p.soccer_player_id)
    }

    /// Whether a modal overlay (notice or detail) is up.
    pub fn popup_open(&self) -> bool {
        self.notice.is_some() || self.detail.is_some()
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.players.len() {
            self.selected = self.players.len().saturating_sub(1);
        }
    }

    /// Whether this key press should quit the application.
    ///
    /// Ctrl+C always quits. On the fatal screen `q` and Esc quit. While an
    /// overlay is up or a form field has focus, `q` is just input and the
    /// key goes to `input::handle_key` instead.
    pub fn key_quits(&self, key: &KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        if self.fatal.is_some() {
            return matches!(key.code, KeyCode::Char('q') | KeyCode::Esc);
        }
        if self.popup_open() {
            return false;
        }
        self.focus == Focus::Table && key.code == KeyCode::Char('q')
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::RosterLoaded(players) => {
            state.players = players;
            state.clamp_selection();
        }
        UiUpdate::LoadFailed(message) => {
            state.fatal = Some(message);
        }
        UiUpdate::PlayerAdded(record) => {
            state.players.push(record);
            // The controller reset its draft; mirror that in the form.
            state.form.reset();
        }
        UiUpdate::PlayerRemoved(id) => {
            state.players.retain(|p| p.soccer_player_id != id);
            state.clamp_selection();
        }
        UiUpdate::DetailReady(text) => {
            state.detail = Some(text);
        }
        UiUpdate::OperationFailed(message) => {
            state.notice = Some(message);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame.
///
/// A fatal load failure replaces everything with the error screen; popups
/// draw on top of the normal layout.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    if let Some(ref message) = state.fatal {
        widgets::popup::render_fatal(frame, frame.area(), message);
        return;
    }

    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::roster::render(frame, layout.table, state);
    widgets::form::render(frame, layout.form, state);
    widgets::status_bar::render_help(frame, layout.help_bar, state);

    if let Some(ref text) = state.detail {
        widgets::popup::render_detail(frame, frame.area(), text);
    }
    if let Some(ref message) = state.notice {
        widgets::popup::render_notice(frame, frame.area(), message);
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    base_url: String,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState {
        base_url,
        ..ViewState::default()
    };

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => {
                        apply_ui_update(&mut view_state, ui_update);
                    }
                    None => {
                        // Channel closed: controller is shutting down.
                        break;
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if view_state.key_quits(&key_event) {
                            let _ = cmd_tx.send(UserCommand::Quit).await;
                            break;
                        }
                        input::handle_key(key_event, &mut view_state, &cmd_tx).await;
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events need no action; resize is
                        // picked up on the next draw.
                    }
                    Some(Err(_)) | None => {
                        break;
                    }
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
