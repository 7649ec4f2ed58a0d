// Player records, the position lookup table, and draft-state types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Position table
// ---------------------------------------------------------------------------

/// The fixed position table: code paired with its label. Code 0 (and any
/// code outside the table) resolves to the unset position.
const POSITION_TABLE: [(u32, &str); 4] = [
    (1, "ARQUERO"),
    (2, "DEFENSA"),
    (3, "MEDIOCAMPISTA"),
    (4, "DELANTERO"),
];

/// Highest valid position code; the form selector cycles 0..=MAX_POSITION_CODE.
pub const MAX_POSITION_CODE: u32 = 4;

/// A player's field position: integer code plus resolved label.
///
/// Serializes as `{"id": N, "type": "LABEL"}` to match the backend's wire
/// format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: u32,
    #[serde(rename = "type")]
    pub label: String,
}

impl Position {
    /// The "unselected" position: code 0, empty label.
    pub fn unset() -> Self {
        Position {
            id: 0,
            label: String::new(),
        }
    }

    /// Resolve a code against the static table. Unrecognized codes
    /// (including 0) fall back to the unset position rather than erroring.
    pub fn from_code(code: u32) -> Self {
        POSITION_TABLE
            .iter()
            .find(|(id, _)| *id == code)
            .map(|(id, label)| Position {
                id: *id,
                label: (*label).to_string(),
            })
            .unwrap_or_else(Position::unset)
    }

    /// Label for a code, without allocating a `Position`. Empty for
    /// unrecognized codes.
    pub fn label_for(code: u32) -> &'static str {
        POSITION_TABLE
            .iter()
            .find(|(id, _)| *id == code)
            .map(|(_, label)| *label)
            .unwrap_or("")
    }

    /// Whether a concrete position has been selected.
    pub fn is_set(&self) -> bool {
        self.id != 0
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::unset()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

// ---------------------------------------------------------------------------
// PlayerRecord
// ---------------------------------------------------------------------------

/// One row of the managed collection, as the backend serves it.
///
/// `soccer_player_id` is assigned solely by the server; 0 marks a record
/// that has not been persisted (a draft being submitted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub soccer_player_id: u32,
    pub name: String,
    pub last_name: String,
    /// ISO date as text; the backend stores and returns it verbatim.
    pub birthdate: String,
    pub features: String,
    pub position: Position,
}

// ---------------------------------------------------------------------------
// Draft state
// ---------------------------------------------------------------------------

/// The record under construction in the form. Client-owned until
/// submission; reset to all-empty only after the server confirms a create.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftPlayer {
    pub name: String,
    pub last_name: String,
    pub birthdate: String,
    pub features: String,
    pub position_code: u32,
}

impl DraftPlayer {
    /// Apply a single-field patch, replacing that field wholesale.
    pub fn apply(&mut self, field: DraftField) {
        match field {
            DraftField::Name(v) => self.name = v,
            DraftField::LastName(v) => self.last_name = v,
            DraftField::Birthdate(v) => self.birthdate = v,
            DraftField::Features(v) => self.features = v,
            DraftField::PositionCode(code) => {
                // Unrecognized codes collapse to 0, like the resolved label.
                self.position_code = Position::from_code(code).id;
            }
        }
    }

    /// Reset to the all-empty / code-0 form.
    pub fn reset(&mut self) {
        *self = DraftPlayer::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == DraftPlayer::default()
    }

    /// Whether every field is filled and a concrete position is selected.
    /// Used only by the input layer's submit gate.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty()
            && !self.last_name.is_empty()
            && !self.birthdate.is_empty()
            && !self.features.is_empty()
            && self.position_code != 0
    }

    /// Build the submission payload: identifier 0 (the server assigns the
    /// real one) and the position label re-resolved from the code.
    pub fn to_record(&self) -> PlayerRecord {
        PlayerRecord {
            soccer_player_id: 0,
            name: self.name.clone(),
            last_name: self.last_name.clone(),
            birthdate: self.birthdate.clone(),
            features: self.features.clone(),
            position: Position::from_code(self.position_code),
        }
    }
}

/// Tagged single-field update for the draft record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Name(String),
    LastName(String),
    Birthdate(String),
    Features(String),
    PositionCode(u32),
}

// ---------------------------------------------------------------------------
// Presentation helpers
// ---------------------------------------------------------------------------

/// Whether a birthdate string parses as an ISO calendar date. Display
/// feedback only; submission is never blocked on it.
pub fn birthdate_is_iso(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_resolves_all_valid_codes() {
        assert_eq!(Position::from_code(1).label, "ARQUERO");
        assert_eq!(Position::from_code(2).label, "DEFENSA");
        assert_eq!(Position::from_code(3).label, "MEDIOCAMPISTA");
        assert_eq!(Position::from_code(4).label, "DELANTERO");
        for code in 1..=4 {
            assert_eq!(Position::from_code(code).id, code);
        }
    }

    #[test]
    fn from_code_zero_is_unset() {
        let pos = Position::from_code(0);
        assert_eq!(pos.id, 0);
        assert!(pos.label.is_empty());
        assert!(!pos.is_set());
    }

    #[test]
    fn from_code_unrecognized_falls_back_to_unset() {
        for code in [5, 17, 255, u32::MAX] {
            let pos = Position::from_code(code);
            assert_eq!(pos.id, 0, "code {code} should fall back");
            assert!(pos.label.is_empty());
        }
    }

    #[test]
    fn label_for_matches_table() {
        assert_eq!(Position::label_for(4), "DELANTERO");
        assert_eq!(Position::label_for(0), "");
        assert_eq!(Position::label_for(99), "");
    }

    #[test]
    fn position_wire_format() {
        let pos = Position::from_code(4);
        let json = serde_json::to_value(&pos).unwrap();
        assert_eq!(json, serde_json::json!({"id": 4, "type": "DELANTERO"}));
    }

    #[test]
    fn player_record_wire_format_is_camel_case() {
        let record = PlayerRecord {
            soccer_player_id: 7,
            name: "Leo".into(),
            last_name: "Messi".into(),
            birthdate: "1987-06-24".into(),
            features: "fast".into(),
            position: Position::from_code(4),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "soccerPlayerId": 7,
                "name": "Leo",
                "lastName": "Messi",
                "birthdate": "1987-06-24",
                "features": "fast",
                "position": {"id": 4, "type": "DELANTERO"}
            })
        );
    }

    #[test]
    fn player_record_deserializes_from_backend_json() {
        let json = r#"{
            "soccerPlayerId": 12,
            "name": "Ada",
            "lastName": "Lovelace",
            "birthdate": "1990-01-15",
            "features": "vision",
            "position": {"id": 3, "type": "MEDIOCAMPISTA"}
        }"#;
        let record: PlayerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.soccer_player_id, 12);
        assert_eq!(record.last_name, "Lovelace");
        assert_eq!(record.position.id, 3);
        assert_eq!(record.position.label, "MEDIOCAMPISTA");
    }

    #[test]
    fn draft_apply_replaces_single_fields() {
        let mut draft = DraftPlayer::default();
        draft.apply(DraftField::Name("Leo".into()));
        draft.apply(DraftField::LastName("Messi".into()));
        assert_eq!(draft.name, "Leo");
        assert_eq!(draft.last_name, "Messi");
        assert!(draft.birthdate.is_empty());

        draft.apply(DraftField::Name("Lionel".into()));
        assert_eq!(draft.name, "Lionel");
        assert_eq!(draft.last_name, "Messi");
    }

    #[test]
    fn draft_position_patch_resolves_through_the_table() {
        let mut draft = DraftPlayer::default();
        draft.apply(DraftField::PositionCode(4));
        assert_eq!(draft.position_code, 4);
        // Unrecognized codes fall back to 0, never stored raw.
        draft.apply(DraftField::PositionCode(9));
        assert_eq!(draft.position_code, 0);
    }

    #[test]
    fn draft_reset_returns_to_empty() {
        let mut draft = DraftPlayer {
            name: "Leo".into(),
            last_name: "Messi".into(),
            birthdate: "1987-06-24".into(),
            features: "fast".into(),
            position_code: 4,
        };
        draft.reset();
        assert!(draft.is_empty());
        assert_eq!(draft.position_code, 0);
    }

    #[test]
    fn draft_is_complete_requires_every_field() {
        let mut draft = DraftPlayer {
            name: "Leo".into(),
            last_name: "Messi".into(),
            birthdate: "1987-06-24".into(),
            features: "fast".into(),
            position_code: 4,
        };
        assert!(draft.is_complete());

        draft.features.clear();
        assert!(!draft.is_complete());
        draft.features = "fast".into();

        draft.position_code = 0;
        assert!(!draft.is_complete());
    }

    #[test]
    fn to_record_resolves_label_from_code() {
        let draft = DraftPlayer {
            name: "Leo".into(),
            last_name: "Messi".into(),
            birthdate: "1987-06-24".into(),
            features: "fast".into(),
            position_code: 4,
        };
        let record = draft.to_record();
        assert_eq!(record.soccer_player_id, 0);
        assert_eq!(record.position.id, 4);
        assert_eq!(record.position.label, "DELANTERO");
    }

    #[test]
    fn to_record_with_unrecognized_code_sends_unset_position() {
        let draft = DraftPlayer {
            name: "X".into(),
            last_name: "Y".into(),
            birthdate: "2000-01-01".into(),
            features: "z".into(),
            position_code: 42,
        };
        let record = draft.to_record();
        assert_eq!(record.position.id, 0);
        assert!(record.position.label.is_empty());
    }

    #[test]
    fn birthdate_is_iso_accepts_calendar_dates() {
        assert!(birthdate_is_iso("1987-06-24"));
        assert!(birthdate_is_iso("2000-02-29"));
        assert!(!birthdate_is_iso("2001-02-29"));
        assert!(!birthdate_is_iso("24/06/1987"));
        assert!(!birthdate_is_iso("yesterday"));
        assert!(!birthdate_is_iso(""));
    }
}
