// Controller loop: owns the authoritative roster state and orchestrates
// remote operations.
//
// Each remote operation is one spawned task that reports back over the
// `ApiEvent` channel. There is no cross-operation coordination: several
// operations may be in flight at once and their completions are applied in
// whatever order the responses arrive (last-applied-wins on the collection).

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::PlayerApi;
use crate::protocol::{ApiEvent, UiUpdate, UserCommand};
use crate::roster::RosterState;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The controller's state: the roster plus the handles needed to spawn
/// request tasks.
pub struct AppState {
    pub roster: RosterState,
    /// Shared API client; request tasks hold a clone of the Arc.
    pub api: Arc<PlayerApi>,
    /// Sender side of the completion channel; request tasks use a clone to
    /// report back.
    pub api_tx: mpsc::Sender<ApiEvent>,
}

impl AppState {
    pub fn new(api: PlayerApi, api_tx: mpsc::Sender<ApiEvent>) -> Self {
        AppState {
            roster: RosterState::new(),
            api: Arc::new(api),
            api_tx,
        }
    }

    /// Spawn the one-time full-collection read.
    pub fn spawn_initial_load(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            let result = api.list().await.map_err(|e| e.to_string());
            let _ = tx.send(ApiEvent::Loaded(result)).await;
        });
    }

    /// Spawn a create for the current draft. The position label is
    /// re-resolved from its code when the payload is built.
    fn spawn_create(&self) {
        let payload = self.roster.draft.to_record();
        info!(
            "Submitting new player: {} {} (position code {})",
            payload.name, payload.last_name, payload.position.id
        );
        let api = Arc::clone(&self.api);
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            let result = api.create(&payload).await.map_err(|e| e.to_string());
            let _ = tx.send(ApiEvent::Created(result)).await;
        });
    }

    fn spawn_delete(&self, id: u32) {
        info!("Deleting player id={id}");
        let api = Arc::clone(&self.api);
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            let result = api.delete(id).await.map_err(|e| e.to_string());
            let _ = tx.send(ApiEvent::Deleted { id, result }).await;
        });
    }

    fn spawn_detail(&self, id: u32) {
        info!("Fetching details for player id={id}");
        let api = Arc::clone(&self.api);
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch(id).await.map_err(|e| e.to_string());
            let _ = tx.send(ApiEvent::Detail(result)).await;
        });
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the controller loop.
///
/// Issues the initial load, then listens on two channels with
/// `tokio::select!`: completions from request tasks and commands from the
/// TUI. Pushes `UiUpdate`s through `ui_tx` for the render loop.
pub async fn run(
    mut api_rx: mpsc::Receiver<ApiEvent>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Controller loop started");

    state.spawn_initial_load();

    loop {
        tokio::select! {
            event = api_rx.recv() => {
                match event {
                    Some(event) => handle_api_event(&mut state, event, &ui_tx).await,
                    None => {
                        info!("Completion channel closed, shutting down");
                        break;
                    }
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => handle_user_command(&mut state, cmd),
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    info!("Controller loop exiting");
    Ok(())
}

/// Apply one request-task completion to the roster and notify the TUI.
///
/// Once the initial load has failed, the view is a single stable error
/// screen: every later completion (from operations that were already in
/// flight) is discarded.
pub async fn handle_api_event(
    state: &mut AppState,
    event: ApiEvent,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    if state.roster.is_fatal() {
        warn!("Discarding completion after fatal load failure: {event:?}");
        return;
    }

    match event {
        ApiEvent::Loaded(Ok(players)) => {
            state.roster.replace_all(players.clone());
            let _ = ui_tx.send(UiUpdate::RosterLoaded(players)).await;
        }
        ApiEvent::Loaded(Err(message)) => {
            warn!("Initial load failed: {message}");
            state.roster.mark_load_failed(message.clone());
            let _ = ui_tx.send(UiUpdate::LoadFailed(message)).await;
        }
        ApiEvent::Created(Ok(record)) => {
            state.roster.apply_created(record.clone());
            let _ = ui_tx.send(UiUpdate::PlayerAdded(record)).await;
        }
        ApiEvent::Created(Err(message)) => {
            warn!("Create failed: {message}");
            // Draft state is left untouched so the user can retry.
            let _ = ui_tx
                .send(UiUpdate::OperationFailed(format!(
                    "Error saving soccer player: {message}"
                )))
                .await;
        }
        ApiEvent::Deleted { id, result: Ok(()) } => {
            state.roster.apply_deleted(id);
            let _ = ui_tx.send(UiUpdate::PlayerRemoved(id)).await;
        }
        ApiEvent::Deleted {
            id,
            result: Err(message),
        } => {
            warn!("Delete of id={id} failed: {message}");
            // No optimistic removal happened, so nothing to roll back.
            let _ = ui_tx
                .send(UiUpdate::OperationFailed(format!(
                    "Error deleting soccer player: {message}"
                )))
                .await;
        }
        ApiEvent::Detail(Ok(record)) => match serde_json::to_string_pretty(&record) {
            Ok(text) => {
                let _ = ui_tx.send(UiUpdate::DetailReady(text)).await;
            }
            Err(e) => {
                let _ = ui_tx
                    .send(UiUpdate::OperationFailed(format!("Error: {e}")))
                    .await;
            }
        },
        ApiEvent::Detail(Err(message)) => {
            warn!("Detail fetch failed: {message}");
            let _ = ui_tx
                .send(UiUpdate::OperationFailed(format!("Error: {message}")))
                .await;
        }
    }
}

/// Apply one user command. Commands are ignored after a fatal load failure
/// (quit is handled in the main loop and still works).
pub fn handle_user_command(state: &mut AppState, cmd: UserCommand) {
    if state.roster.is_fatal() {
        warn!("Ignoring command after fatal load failure: {cmd:?}");
        return;
    }

    match cmd {
        UserCommand::Edit(field) => {
            state.roster.patch_draft(field);
        }
        UserCommand::Submit => {
            state.spawn_create();
        }
        UserCommand::Delete(id) => {
            state.spawn_delete(id);
        }
        UserCommand::ViewDetails(id) => {
            state.spawn_detail(id);
        }
        UserCommand::Quit => {
            // Handled in the main loop.
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{DraftField, PlayerRecord, Position};

    fn record(id: u32, name: &str) -> PlayerRecord {
        PlayerRecord {
            soccer_player_id: id,
            name: name.into(),
            last_name: format!("{name}son"),
            birthdate: "1990-01-01".into(),
            features: "test".into(),
            position: Position::from_code(1),
        }
    }

    /// AppState wired to channels; the API client points at an unused
    /// address, which is fine for handler-level tests that never spawn.
    fn test_state() -> (AppState, mpsc::Receiver<ApiEvent>) {
        let (api_tx, api_rx) = mpsc::channel(16);
        let state = AppState::new(PlayerApi::new("http://127.0.0.1:1/api/v1"), api_tx);
        (state, api_rx)
    }

    #[tokio::test]
    async fn loaded_ok_replaces_collection_and_notifies() {
        let (mut state, _api_rx) = test_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        let players = vec![record(1, "A"), record(2, "B")];
        handle_api_event(&mut state, ApiEvent::Loaded(Ok(players.clone())), &ui_tx).await;

        assert_eq!(state.roster.players, players);
        assert_eq!(ui_rx.recv().await, Some(UiUpdate::RosterLoaded(players)));
    }

    #[tokio::test]
    async fn loaded_err_latches_fatal_state() {
        let (mut state, _api_rx) = test_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_api_event(
            &mut state,
            ApiEvent::Loaded(Err("network response was not ok (status 500)".into())),
            &ui_tx,
        )
        .await;

        assert!(state.roster.is_fatal());
        assert!(matches!(ui_rx.recv().await, Some(UiUpdate::LoadFailed(_))));
    }

    #[tokio::test]
    async fn completions_after_fatal_are_discarded() {
        let (mut state, _api_rx) = test_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_api_event(&mut state, ApiEvent::Loaded(Err("boom".into())), &ui_tx).await;
        let _ = ui_rx.recv().await;

        handle_api_event(&mut state, ApiEvent::Created(Ok(record(7, "Leo"))), &ui_tx).await;

        assert!(state.roster.players.is_empty());
        assert!(ui_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn commands_after_fatal_are_ignored() {
        let (mut state, _api_rx) = test_state();
        let (ui_tx, _ui_rx) = mpsc::channel(16);

        handle_api_event(&mut state, ApiEvent::Loaded(Err("boom".into())), &ui_tx).await;
        handle_user_command(&mut state, UserCommand::Edit(DraftField::Name("Leo".into())));

        assert!(state.roster.draft.is_empty());
    }

    #[tokio::test]
    async fn created_ok_appends_resets_draft_and_notifies() {
        let (mut state, _api_rx) = test_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_user_command(&mut state, UserCommand::Edit(DraftField::Name("Leo".into())));
        let created = record(7, "Leo");
        handle_api_event(&mut state, ApiEvent::Created(Ok(created.clone())), &ui_tx).await;

        assert_eq!(state.roster.players.len(), 1);
        assert_eq!(state.roster.players[0].soccer_player_id, 7);
        assert!(state.roster.draft.is_empty());
        assert_eq!(ui_rx.recv().await, Some(UiUpdate::PlayerAdded(created)));
    }

    #[tokio::test]
    async fn created_err_leaves_collection_and_draft_untouched() {
        let (mut state, _api_rx) = test_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_api_event(&mut state, ApiEvent::Loaded(Ok(vec![record(1, "A")])), &ui_tx).await;
        let _ = ui_rx.recv().await;
        handle_user_command(&mut state, UserCommand::Edit(DraftField::Name("Leo".into())));

        handle_api_event(
            &mut state,
            ApiEvent::Created(Err("network response was not ok (status 500)".into())),
            &ui_tx,
        )
        .await;

        assert_eq!(state.roster.players.len(), 1);
        assert_eq!(state.roster.draft.name, "Leo");
        match ui_rx.recv().await {
            Some(UiUpdate::OperationFailed(msg)) => {
                assert!(msg.starts_with("Error saving soccer player:"));
            }
            other => panic!("expected OperationFailed, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn deleted_ok_removes_by_identifier() {
        let (mut state, _api_rx) = test_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_api_event(
            &mut state,
            ApiEvent::Loaded(Ok(vec![record(1, "A"), record(2, "B"), record(3, "C")])),
            &ui_tx,
        )
        .await;
        let _ = ui_rx.recv().await;

        handle_api_event(
            &mut state,
            ApiEvent::Deleted { id: 2, result: Ok(()) },
            &ui_tx,
        )
        .await;

        let ids: Vec<u32> = state
            .roster
            .players
            .iter()
            .map(|p| p.soccer_player_id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(ui_rx.recv().await, Some(UiUpdate::PlayerRemoved(2)));
    }

    #[tokio::test]
    async fn deleted_err_leaves_collection_unchanged() {
        let (mut state, _api_rx) = test_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_api_event(&mut state, ApiEvent::Loaded(Ok(vec![record(1, "A")])), &ui_tx).await;
        let _ = ui_rx.recv().await;

        handle_api_event(
            &mut state,
            ApiEvent::Deleted {
                id: 1,
                result: Err("network response was not ok (status 500)".into()),
            },
            &ui_tx,
        )
        .await;

        assert_eq!(state.roster.players.len(), 1);
        match ui_rx.recv().await {
            Some(UiUpdate::OperationFailed(msg)) => {
                assert!(msg.starts_with("Error deleting soccer player:"));
            }
            other => panic!("expected OperationFailed, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn detail_ok_surfaces_pretty_json() {
        let (mut state, _api_rx) = test_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_api_event(&mut state, ApiEvent::Detail(Ok(record(5, "Eve"))), &ui_tx).await;

        match ui_rx.recv().await {
            Some(UiUpdate::DetailReady(text)) => {
                assert!(text.contains("\"soccerPlayerId\": 5"));
                assert!(text.contains("\"name\": \"Eve\""));
            }
            other => panic!("expected DetailReady, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn detail_err_surfaces_notice() {
        let (mut state, _api_rx) = test_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_api_event(&mut state, ApiEvent::Detail(Err("boom".into())), &ui_tx).await;

        assert_eq!(
            ui_rx.recv().await,
            Some(UiUpdate::OperationFailed("Error: boom".into()))
        );
    }

    #[tokio::test]
    async fn edit_commands_patch_the_draft() {
        let (mut state, _api_rx) = test_state();

        handle_user_command(&mut state, UserCommand::Edit(DraftField::Name("Leo".into())));
        handle_user_command(
            &mut state,
            UserCommand::Edit(DraftField::Birthdate("1987-06-24".into())),
        );
        handle_user_command(&mut state, UserCommand::Edit(DraftField::PositionCode(4)));

        assert_eq!(state.roster.draft.name, "Leo");
        assert_eq!(state.roster.draft.birthdate, "1987-06-24");
        assert_eq!(state.roster.draft.position_code, 4);
    }

    #[tokio::test]
    async fn interleaved_deletes_apply_in_arrival_order() {
        // Two deletes in flight; completions may arrive in either order and
        // each is applied as it lands.
        let (mut state, _api_rx) = test_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(16);

        handle_api_event(
            &mut state,
            ApiEvent::Loaded(Ok(vec![record(1, "A"), record(2, "B")])),
            &ui_tx,
        )
        .await;
        let _ = ui_rx.recv().await;

        handle_api_event(
            &mut state,
            ApiEvent::Deleted { id: 2, result: Ok(()) },
            &ui_tx,
        )
        .await;
        handle_api_event(
            &mut state,
            ApiEvent::Deleted { id: 1, result: Ok(()) },
            &ui_tx,
        )
        .await;

        assert!(state.roster.players.is_empty());
    }
}
