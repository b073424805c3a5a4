use crate::interface_adapters::protocol::{GameSnapshot, UpdateResponse};
use crate::interface_adapters::state::AppState;
use axum::{Json, extract::State};
use std::sync::Arc;

// Advance the simulation by one polled tick (or no-op when throttled
// or finished) and return the resulting state.
pub async fn update(State(state): State<Arc<AppState>>) -> Json<UpdateResponse> {
    let (update_occurred, snapshot) = {
        let mut game = state.game.lock().await;
        let occurred = game.update();
        (occurred, game.snapshot())
    };

    Json(UpdateResponse {
        update_occurred,
        state: snapshot,
    })
}

// Read the full observable state without advancing anything.
pub async fn read_state(State(state): State<Arc<AppState>>) -> Json<GameSnapshot> {
    let game = state.game.lock().await;
    Json(game.snapshot())
}

// Tear the game down and rebuild it from scratch.
pub async fn reset(State(state): State<Arc<AppState>>) -> Json<GameSnapshot> {
    let mut game = state.game.lock().await;
    game.reset();
    Json(game.snapshot())
}
