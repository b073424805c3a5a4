// Domain layer: core simulation types and rules.

pub mod entity;
pub mod grid;
pub mod strategy;
pub mod tuning;

pub use entity::{Entity, EntityKind, Sighting, SpiralCursor};
pub use grid::{Direction, Grid, Position};
pub use strategy::{StrategyFn, StrategyView};
pub use tuning::GameTuning;
