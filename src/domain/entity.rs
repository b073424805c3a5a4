// Simulation entities: the beast, the engineers, and what they become.

use crate::domain::grid::{Direction, Position};
use crate::domain::strategy::StrategyFn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Beast,
    Engineer,
    Zombie,
}

/// One remembered engineer inside a pursuer's detection radius.
///
/// Entries live only while the engineer stays in range and alive; the
/// pursuit engine deletes them the moment either stops being true.
#[derive(Debug, Clone)]
pub struct Sighting {
    pub name: String,
    pub position: Position,
    pub last_seen_turn: u64,
}

/// Cursor for the expanding square spiral a pursuer walks when it has
/// no target. Leg lengths grow 1,1,2,2,3,3,… (two legs per length).
#[derive(Debug, Clone, Copy)]
pub struct SpiralCursor {
    pub direction: Direction,
    pub leg_length: u32,
    pub steps_in_leg: u32,
}

impl Default for SpiralCursor {
    fn default() -> Self {
        Self {
            direction: Direction::Right,
            leg_length: 1,
            steps_in_leg: 0,
        }
    }
}

pub struct Entity {
    pub name: String,
    pub emoji: &'static str,
    pub position: Position,
    pub kind: EntityKind,
    pub alive: bool,
    /// Turn counter value at the last successful move; throttles zombies.
    pub last_moved_turn: u64,
    pub score: i64,

    // Pursuer-only state (unused while kind is Engineer).
    pub sightings: Vec<Sighting>,
    pub current_target: Option<String>,
    pub spiral: SpiralCursor,

    /// Movement brain while kind is Engineer; pursuers ignore it.
    pub strategy: Option<StrategyFn>,
}

impl Entity {
    pub fn engineer(
        name: impl Into<String>,
        emoji: &'static str,
        position: Position,
        strategy: StrategyFn,
    ) -> Self {
        Self {
            name: name.into(),
            emoji,
            position,
            kind: EntityKind::Engineer,
            alive: true,
            last_moved_turn: 0,
            score: 0,
            sightings: Vec::new(),
            current_target: None,
            spiral: SpiralCursor::default(),
            strategy: Some(strategy),
        }
    }

    pub fn beast(position: Position) -> Self {
        Self {
            name: "Beast".to_string(),
            emoji: "🐺",
            position,
            kind: EntityKind::Beast,
            alive: true,
            last_moved_turn: 0,
            score: 0,
            sightings: Vec::new(),
            current_target: None,
            spiral: SpiralCursor::default(),
            strategy: None,
        }
    }

    pub fn is_pursuer(&self) -> bool {
        matches!(self.kind, EntityKind::Beast | EntityKind::Zombie)
    }

    /// True for an engineer that has not been caught and is still alive.
    pub fn is_live_engineer(&self) -> bool {
        self.alive && self.kind == EntityKind::Engineer
    }
}
