// The contract every pluggable engineer brain satisfies.

use crate::domain::grid::{Direction, Position};

/// Read-only view handed to a strategy each time its engineer acts.
///
/// `threats[0]` is always the beast; any remaining entries are zombies
/// in arbitrary order. The turn index is part of the uniform contract
/// so time-dependent strategies need no special casing.
#[derive(Debug, Clone, Copy)]
pub struct StrategyView<'a> {
    pub self_pos: Position,
    pub threats: &'a [Position],
    pub others: &'a [Position],
    pub grid_size: (i32, i32),
    pub turn: u64,
}

impl StrategyView<'_> {
    pub fn in_bounds(&self, pos: Position) -> bool {
        let (width, height) = self.grid_size;
        (0..width).contains(&pos.x) && (0..height).contains(&pos.y)
    }

    /// Valid candidate moves from the current cell, staying-put included.
    pub fn candidate_moves(&self) -> Vec<(Option<Direction>, Position)> {
        let mut moves = vec![(None, self.self_pos)];
        for dir in Direction::ALL {
            let next = self.self_pos.offset(dir);
            if self.in_bounds(next) {
                moves.push((Some(dir), next));
            }
        }
        moves
    }
}

/// A strategy is a pure function: no side effects, `None` means stay.
/// The return type makes invalid outputs unrepresentable.
pub type StrategyFn = fn(&StrategyView) -> Option<Direction>;
