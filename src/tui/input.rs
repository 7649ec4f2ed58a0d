// Keyboard input handling.
//
// Key routing order: the fatal screen swallows everything (quit keys are
// handled by the caller), then an open popup consumes the key that
// dismisses it, then the key goes to whichever zone has focus. Required-
// field enforcement lives here, in the submit gate, and nowhere else.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::player::{DraftField, MAX_POSITION_CODE};
use crate::protocol::UserCommand;
use crate::tui::{Focus, FormField, ViewState};

/// Notice shown when submit is attempted with a hole in the form.
pub const REQUIRED_FIELDS_NOTICE: &str = "All fields are required";

/// Handle a key event, updating the view state and sending commands.
pub async fn handle_key(
    key: KeyEvent,
    state: &mut ViewState,
    cmd_tx: &mpsc::Sender<UserCommand>,
) {
    if state.fatal.is_some() {
        return;
    }

    // Blocking overlays: any key dismisses, and nothing else happens.
    if state.notice.take().is_some() {
        return;
    }
    if state.detail.take().is_some() {
        return;
    }

    match state.focus {
        Focus::Table => handle_table_key(key, state, cmd_tx).await,
        Focus::Form(field) => handle_form_key(key, field, state, cmd_tx).await,
    }
}

// ---------------------------------------------------------------------------
// Table keys
// ---------------------------------------------------------------------------

async fn handle_table_key(
    key: KeyEvent,
    state: &mut ViewState,
    cmd_tx: &mpsc::Sender<UserCommand>,
) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.selected = state.selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.selected + 1 < state.players.len() {
                state.selected += 1;
            }
        }
        KeyCode::Delete | KeyCode::Char('d') => {
            if let Some(id) = state.selected_player_id() {
                let _ = cmd_tx.send(UserCommand::Delete(id)).await;
            }
        }
        KeyCode::Enter | KeyCode::Char('v') => {
            if let Some(id) = state.selected_player_id() {
                let _ = cmd_tx.send(UserCommand::ViewDetails(id)).await;
            }
        }
        KeyCode::Tab | KeyCode::Char('a') => {
            state.focus = Focus::Form(FormField::Name);
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Form keys
// ---------------------------------------------------------------------------

async fn handle_form_key(
    key: KeyEvent,
    field: FormField,
    state: &mut ViewState,
    cmd_tx: &mpsc::Sender<UserCommand>,
) {
    // Ctrl+S submits from any field.
    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        try_submit(state, cmd_tx).await;
        return;
    }

    match key.code {
        KeyCode::Esc => {
            state.focus = Focus::Table;
        }
        KeyCode::Tab | KeyCode::Down => {
            state.focus = Focus::Form(field.next());
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus = Focus::Form(field.prev());
        }
        KeyCode::Enter => {
            // Enter advances through the form; from the last field it submits.
            if field == FormField::Position {
                try_submit(state, cmd_tx).await;
            } else {
                state.focus = Focus::Form(field.next());
            }
        }
        _ => {
            edit_field(key, field, state, cmd_tx).await;
        }
    }
}

/// Apply a key to the focused field's buffer and forward the whole-field
/// patch to the controller. Keys with no meaning for the field do nothing.
async fn edit_field(
    key: KeyEvent,
    field: FormField,
    state: &mut ViewState,
    cmd_tx: &mpsc::Sender<UserCommand>,
) {
    let patch = match field {
        FormField::Position => {
            let code = state.form.position_code;
            let next = match key.code {
                // The selector cycles 0 ("Select Position") through the
                // four codes.
                KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('l') => {
                    (code + 1) % (MAX_POSITION_CODE + 1)
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    (code + MAX_POSITION_CODE) % (MAX_POSITION_CODE + 1)
                }
                KeyCode::Char(c @ '0'..='4') => c as u32 - '0' as u32,
                _ => return,
            };
            state.form.position_code = next;
            DraftField::PositionCode(next)
        }
        FormField::Name => {
            if !edit_text(&mut state.form.name, key) {
                return;
            }
            DraftField::Name(state.form.name.clone())
        }
        FormField::LastName => {
            if !edit_text(&mut state.form.last_name, key) {
                return;
            }
            DraftField::LastName(state.form.last_name.clone())
        }
        FormField::Birthdate => {
            if !edit_text(&mut state.form.birthdate, key) {
                return;
            }
            DraftField::Birthdate(state.form.birthdate.clone())
        }
        FormField::Features => {
            if !edit_text(&mut state.form.features, key) {
                return;
            }
            DraftField::Features(state.form.features.clone())
        }
    };
    let _ = cmd_tx.send(UserCommand::Edit(patch)).await;
}

/// Mutate a text buffer for a key press. Returns whether it changed.
fn edit_text(buffer: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

/// The submit gate: refuse (with a notice) while any field is empty or no
/// position is selected, otherwise hand the draft to the controller.
async fn try_submit(state: &mut ViewState, cmd_tx: &mpsc::Sender<UserCommand>) {
    if !state.form.is_complete() {
        state.notice = Some(REQUIRED_FIELDS_NOTICE.to_string());
        return;
    }
    let _ = cmd_tx.send(UserCommand::Submit).await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
