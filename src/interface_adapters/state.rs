use crate::use_cases::GameState;
use tokio::sync::Mutex;

// Shared application state for the HTTP handlers. The mutex is the
// single serialization boundary: every tick, read and reset runs to
// completion while holding it.
pub struct AppState {
    pub game: Mutex<GameState>,
}
