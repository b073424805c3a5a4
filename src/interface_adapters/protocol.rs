// Wire protocol DTOs for the polled game API.

use crate::domain::Position;
use crate::use_cases::ledger::LedgerTable;
use serde::Serialize;
use std::collections::BTreeMap;

/// Full observable game state, served by `/state` and piggybacked on
/// every `/update` and `/reset` response.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    /// Withheld (`null`) until the beast becomes visible.
    pub beast: Option<Position>,
    pub beast_hidden: bool,
    pub engineers: Vec<EngineerView>,
    pub turn_counter: u64,
    pub grid_size: (i32, i32),
    pub game_over: bool,
    /// Names in the order they were caught.
    pub capture_order: Vec<String>,
    pub current_turn_entity: String,
    /// Current chase target per pursuer; `null` while spiral-searching.
    pub pursuer_targets: BTreeMap<String, Option<String>>,
    /// Sighting memory per pursuer.
    pub detected_engineers: BTreeMap<String, Vec<SightingView>>,
    pub ledger: LedgerTable,
    pub end_game_turns: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineerView {
    pub name: String,
    pub emoji: String,
    pub position: Position,
    pub alive: bool,
    pub is_zombie: bool,
    pub last_moved: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SightingView {
    pub name: String,
    pub position: Position,
    pub last_seen_turn: u64,
}

/// `/update` response: whether this call advanced the simulation
/// (throttled or post-game calls report `false`), plus the snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateResponse {
    pub update_occurred: bool,
    #[serde(flatten)]
    pub state: GameSnapshot,
}
