// Use cases layer: application workflows for the hunt server.

pub mod game;
pub mod ledger;
pub mod pursuit;
pub mod strategies;

pub use game::{GamePhase, GameState};
pub use strategies::default_roster;
