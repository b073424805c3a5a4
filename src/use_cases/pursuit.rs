// Perception & pursuit: the shared brain of the beast and every zombie.

use crate::domain::{Direction, Entity, Grid, Position, Sighting, SpiralCursor};
use tracing::debug;

/// Stable per-tick snapshot of the engineers a pursuer may perceive
/// (live and not yet converted). Taken before any pursuer mutation so
/// mid-tick conversions cannot skew the scan.
#[derive(Debug, Clone)]
pub struct Contact {
    pub name: String,
    pub position: Position,
}

/// Computes the pursuer's next direction and updates its sighting
/// memory, current target and spiral cursor in place.
pub fn next_move(
    pursuer: &mut Entity,
    contacts: &[Contact],
    grid: &Grid,
    radius: f64,
    turn: u64,
) -> Direction {
    refresh_sightings(pursuer, contacts, radius, turn);

    match freshest_sighting(pursuer) {
        Some(target) => {
            let direction = chase_direction(pursuer.position, target.1);
            debug!(
                pursuer = %pursuer.name,
                target = %target.0,
                ?direction,
                "chasing freshest sighting"
            );
            pursuer.current_target = Some(target.0);
            direction
        }
        None => {
            pursuer.current_target = None;
            spiral_step(&mut pursuer.spiral, pursuer.position, grid)
        }
    }
}

/// Updates or creates a sighting for every contact inside the radius
/// and drops every remembered engineer now out of range or gone.
/// Memory decays only by range or death, never by time.
fn refresh_sightings(pursuer: &mut Entity, contacts: &[Contact], radius: f64, turn: u64) {
    let origin = pursuer.position;
    let mut in_range: Vec<&Contact> = Vec::new();
    for contact in contacts {
        if Grid::distance(origin, contact.position) <= radius {
            in_range.push(contact);
        }
    }

    pursuer
        .sightings
        .retain(|s| in_range.iter().any(|c| c.name == s.name));

    for contact in in_range {
        match pursuer
            .sightings
            .iter_mut()
            .find(|s| s.name == contact.name)
        {
            Some(sighting) => {
                sighting.position = contact.position;
                sighting.last_seen_turn = turn;
            }
            None => pursuer.sightings.push(Sighting {
                name: contact.name.clone(),
                position: contact.position,
                last_seen_turn: turn,
            }),
        }
    }
}

/// Largest `last_seen_turn` wins; ties fall to the oldest memory entry
/// (stable vector order), so selection is deterministic.
fn freshest_sighting(pursuer: &Entity) -> Option<(String, Position)> {
    let mut best: Option<&Sighting> = None;
    for sighting in &pursuer.sightings {
        match best {
            Some(current) if sighting.last_seen_turn <= current.last_seen_turn => {}
            _ => best = Some(sighting),
        }
    }
    best.map(|s| (s.name.clone(), s.position))
}

/// Greedy Chebyshev-style closing move: dominant axis first, and the
/// `|dx| == |dy|` tie deliberately resolves to the vertical branch.
pub fn chase_direction(from: Position, to: Position) -> Direction {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() > dy.abs() {
        if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// One step of the expanding square spiral. An out-of-bounds next cell
/// rotates the cursor clockwise and retries without consuming the
/// turn; a completed leg rotates and grows the leg length by one on
/// the Down→Left and Up→Right rotations only.
pub fn spiral_step(cursor: &mut SpiralCursor, from: Position, grid: &Grid) -> Direction {
    let mut direction = cursor.direction;
    let mut rotations = 0;
    while !grid.contains(from.offset(direction)) {
        direction = direction.clockwise();
        rotations += 1;
        if rotations == 4 {
            // Degenerate grid with no valid neighbor; the clamped step
            // upstream turns this into a stay-in-place.
            return direction;
        }
    }
    cursor.direction = direction;

    cursor.steps_in_leg += 1;
    if cursor.steps_in_leg >= cursor.leg_length {
        cursor.steps_in_leg = 0;
        let completed = cursor.direction;
        cursor.direction = completed.clockwise();
        if matches!(completed, Direction::Down | Direction::Up) {
            cursor.leg_length += 1;
        }
    }

    direction
}
