// Message types exchanged between the controller loop, spawned request
// tasks, and the TUI render loop.
//
// Failures cross channels as display strings: the typed `ApiError` stays
// inside the request task, and the rest of the system only surfaces text.

use crate::player::{DraftField, PlayerRecord};

// ---------------------------------------------------------------------------
// Request-task completions
// ---------------------------------------------------------------------------

/// Completion of one spawned remote operation. Delivery order is response
/// arrival order; nothing re-sequences concurrent operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    /// Initial full-collection read.
    Loaded(Result<Vec<PlayerRecord>, String>),
    /// Create; the record carries the server-assigned identifier.
    Created(Result<PlayerRecord, String>),
    /// Delete of one identifier.
    Deleted { id: u32, result: Result<(), String> },
    /// Point read for the detail view.
    Detail(Result<PlayerRecord, String>),
}

// ---------------------------------------------------------------------------
// User commands
// ---------------------------------------------------------------------------

/// Commands sent from the TUI to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Replace one draft field.
    Edit(DraftField),
    /// Submit the draft as a create operation.
    Submit,
    /// Delete the record with this identifier.
    Delete(u32),
    /// Fetch one record for the detail popup.
    ViewDetails(u32),
    /// Shut down.
    Quit,
}

// ---------------------------------------------------------------------------
// UI updates
// ---------------------------------------------------------------------------

/// State changes pushed from the controller to the TUI mirror.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Initial load succeeded; replace the table contents wholesale.
    RosterLoaded(Vec<PlayerRecord>),
    /// Initial load failed; replace the entire display with this error.
    LoadFailed(String),
    /// A create was confirmed; append the row and clear the form.
    PlayerAdded(PlayerRecord),
    /// A delete was confirmed; drop the row with this identifier.
    PlayerRemoved(u32),
    /// Pretty-printed JSON of a fetched record, for the detail popup.
    DetailReady(String),
    /// A non-fatal operation failed; show a blocking notice.
    OperationFailed(String),
}
