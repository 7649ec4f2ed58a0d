// Authoritative client-side state: the collection cache plus the draft.
//
// Mutated only by the controller loop in response to confirmed server
// operations (collection) and draft patches (draft). The TUI holds a
// read-only mirror.

use tracing::info;

use crate::player::{DraftField, DraftPlayer, PlayerRecord};

/// Collection state, draft state, and the fatal-load latch.
#[derive(Debug, Default)]
pub struct RosterState {
    /// Local cache of the remote collection: server fetch order, then
    /// append order for subsequent creates.
    pub players: Vec<PlayerRecord>,
    /// The record under construction in the form.
    pub draft: DraftPlayer,
    /// Set when the initial load fails; never cleared. While set, the view
    /// shows a single stable error screen and commands are ignored.
    pub load_error: Option<String>,
}

impl RosterState {
    pub fn new() -> Self {
        RosterState::default()
    }

    /// Whether the initial load failed and the view is in its terminal
    /// error state.
    pub fn is_fatal(&self) -> bool {
        self.load_error.is_some()
    }

    /// Replace the collection wholesale with the server's response.
    pub fn replace_all(&mut self, players: Vec<PlayerRecord>) {
        info!("Collection loaded: {} players", players.len());
        self.players = players;
    }

    /// Latch the terminal load-failure state.
    pub fn mark_load_failed(&mut self, message: String) {
        self.load_error = Some(message);
    }

    /// Apply one field patch to the draft.
    pub fn patch_draft(&mut self, field: DraftField) {
        self.draft.apply(field);
    }

    /// A create was confirmed: append the server-returned record (which
    /// carries the server-assigned identifier) and reset the draft.
    pub fn apply_created(&mut self, record: PlayerRecord) {
        info!(
            "Player created: id={} {} {}",
            record.soccer_player_id, record.name, record.last_name
        );
        self.players.push(record);
        self.draft.reset();
    }

    /// A delete was confirmed: remove the matching entry by identifier
    /// equality. Returns whether an entry was removed.
    pub fn apply_deleted(&mut self, id: u32) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.soccer_player_id != id);
        let removed = self.players.len() < before;
        if removed {
            info!("Player deleted: id={id}");
        }
        removed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
