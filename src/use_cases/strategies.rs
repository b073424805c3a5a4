// Built-in engineer roster. Each brain is an independent pure function
// of the shared view; the scheduler treats them all identically.

use crate::domain::{Direction, Grid, Position, StrategyFn, StrategyView};
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy)]
pub struct RosterEntry {
    pub name: &'static str,
    pub emoji: &'static str,
    pub strategy: StrategyFn,
}

/// The shipped line-up, in fixed creation (and scheduling) order.
pub fn default_roster() -> Vec<RosterEntry> {
    vec![
        RosterEntry {
            name: "rapid ryan",
            emoji: "🥺",
            strategy: rapid_ryan,
        },
        RosterEntry {
            name: "Saboteur",
            emoji: "😈",
            strategy: saboteur,
        },
        RosterEntry {
            name: "Random Savage",
            emoji: "🦾",
            strategy: random_savage,
        },
        RosterEntry {
            name: "Mr Sinister",
            emoji: "🦹‍♂️",
            strategy: mr_sinister,
        },
        RosterEntry {
            name: "mui_shaggy",
            emoji: "🎃",
            strategy: mui_shaggy,
        },
        RosterEntry {
            name: "Leeroy",
            emoji: "🐔",
            strategy: leeroy,
        },
        RosterEntry {
            name: "Leprechaun",
            emoji: "☘️",
            strategy: leprechaun,
        },
        RosterEntry {
            name: "Brave Sir Robin",
            emoji: "🦤",
            strategy: brave_sir_robin,
        },
        RosterEntry {
            name: "Edgy Engineer",
            emoji: "💃",
            strategy: edgy_engineer,
        },
        RosterEntry {
            name: "Aaahhhhh",
            emoji: "😨",
            strategy: aaahhhhh,
        },
    ]
}

fn manhattan(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Steps onto the cell furthest from the beast, refusing cells on any
/// threat and, while alternatives exist, cells adjacent to a zombie.
fn rapid_ryan(view: &StrategyView) -> Option<Direction> {
    let beast = view.threats[0];
    let zombies = &view.threats[1..];

    let destinations = view.candidate_moves();
    let off_threats: Vec<&(Option<Direction>, Position)> = destinations
        .iter()
        .filter(|(_, dest)| !view.threats.contains(dest))
        .collect();

    let mut clear_of_zombies: Vec<&(Option<Direction>, Position)> = off_threats
        .iter()
        .copied()
        .filter(|(_, dest)| !zombies.iter().any(|z| manhattan(*dest, *z) <= 1))
        .collect();
    // Everything is next to a zombie: tolerate adjacency over standing
    // on one. Everything is on a threat: give up and stay.
    if clear_of_zombies.is_empty() {
        clear_of_zombies = off_threats;
    }

    clear_of_zombies
        .into_iter()
        .max_by_key(|(_, dest)| manhattan(*dest, beast))
        .and_then(|(dir, _)| *dir)
}

/// Steers by a unit vector against the summed threat mass: flees when
/// cornered alone, regroups with the others when threatened, and baits
/// the beast from outside its reach.
fn saboteur(view: &StrategyView) -> Option<Direction> {
    const THRESHOLD: f64 = 4.0;

    let summed = |positions: &[Position]| -> (f64, f64) {
        let x: f64 = positions.iter().map(|p| f64::from(p.x)).sum();
        let y: f64 = positions.iter().map(|p| f64::from(p.y)).sum();
        (
            f64::from(view.self_pos.x) - x,
            f64::from(view.self_pos.y) - y,
        )
    };
    let unit = |(x, y): (f64, f64)| -> (f64, f64) {
        let norm = (x * x + y * y).sqrt();
        (x / norm, y / norm)
    };

    let away_from_threats = unit(summed(view.threats));
    let threat_distance = {
        let (x, y) = summed(view.threats);
        (x * x + y * y).sqrt()
    };

    let vector = if threat_distance <= THRESHOLD && view.others.is_empty() {
        // Alone and in reach: flee, but drop any axis already pinned
        // against a wall so the other one decides.
        let (mut vx, mut vy) = away_from_threats;
        if view.self_pos.x == 0 || view.self_pos.x == view.grid_size.0 - 1 {
            vx = 0.0;
        }
        if view.self_pos.y == 0 || view.self_pos.y == view.grid_size.1 - 1 {
            vy = 0.0;
        }
        (vx, vy)
    } else if threat_distance <= THRESHOLD {
        let (x, y) = unit(summed(view.others));
        (-x, -y)
    } else {
        (-away_from_threats.0, -away_from_threats.1)
    };

    if vector.0.abs() > vector.1.abs() {
        if vector.0 < 0.0 {
            Some(Direction::Left)
        } else {
            Some(Direction::Right)
        }
    } else if vector.0.abs() < vector.1.abs() {
        if vector.1 < 0.0 {
            Some(Direction::Up)
        } else {
            Some(Direction::Down)
        }
    } else {
        // Perfect diagonal: flip a coin between its two components. A
        // zero (or degenerate) vector stays put.
        let horizontal = match vector.0 {
            x if x > 0.0 => Direction::Right,
            x if x < 0.0 => Direction::Left,
            _ => return None,
        };
        let vertical = match vector.1 {
            y if y > 0.0 => Direction::Down,
            y if y < 0.0 => Direction::Up,
            _ => return None,
        };
        [horizontal, vertical].choose(&mut rand::thread_rng()).copied()
    }
}

fn random_savage(_view: &StrategyView) -> Option<Direction> {
    Direction::ALL.choose(&mut rand::thread_rng()).copied()
}

/// Lurks just inside the detection ring, then shadows the nearest
/// engineer while holding a safe distance from the closest threat.
fn mr_sinister(view: &StrategyView) -> Option<Direction> {
    const DETECTION_RANGE: f64 = 5.0;
    const SAFE_DISTANCE: f64 = 5.0;

    let moves = view.candidate_moves();
    let closest_threat = view
        .threats
        .iter()
        .copied()
        .min_by(|a, b| {
            Grid::distance(view.self_pos, *a).total_cmp(&Grid::distance(view.self_pos, *b))
        })?;
    let distance_to_threat = Grid::distance(view.self_pos, closest_threat);

    // Phase 1: close to the edge of the detection ring.
    if distance_to_threat > DETECTION_RANGE {
        return moves
            .iter()
            .min_by(|(_, a), (_, b)| {
                (Grid::distance(*a, closest_threat) - DETECTION_RANGE)
                    .abs()
                    .total_cmp(&(Grid::distance(*b, closest_threat) - DETECTION_RANGE).abs())
            })
            .and_then(|(dir, _)| *dir);
    }

    // Phase 2: drift toward the nearest engineer, safety first.
    if let Some(nearest) = view.others.iter().copied().min_by(|a, b| {
        Grid::distance(view.self_pos, *a).total_cmp(&Grid::distance(view.self_pos, *b))
    }) {
        let score = |dest: Position| {
            let to_engineer = Grid::distance(dest, nearest);
            let safety = (Grid::distance(dest, closest_threat) - SAFE_DISTANCE).abs();
            to_engineer + safety * 2.0
        };
        if let Some((dir, dest)) = moves
            .iter()
            .min_by(|(_, a), (_, b)| score(*a).total_cmp(&score(*b)))
        {
            if Grid::distance(*dest, closest_threat) >= SAFE_DISTANCE {
                return *dir;
            }
        }
    }

    let safe: Vec<&(Option<Direction>, Position)> = moves
        .iter()
        .filter(|(_, dest)| Grid::distance(*dest, closest_threat) >= SAFE_DISTANCE)
        .collect();
    if let Some((dir, _)) = safe.choose(&mut rand::thread_rng()) {
        return *dir;
    }

    moves
        .iter()
        .max_by(|(_, a), (_, b)| {
            Grid::distance(*a, closest_threat).total_cmp(&Grid::distance(*b, closest_threat))
        })
        .and_then(|(dir, _)| *dir)
}

/// Scores each sidestep by the distance it opens from the beast,
/// zeroing steps blocked by a wall or brushing a zombie, then takes
/// the best axis (wall clearance breaks ties).
fn mui_shaggy(view: &StrategyView) -> Option<Direction> {
    let beast = view.threats[0];
    let zombies = &view.threats[1..];
    let Position { x, y } = view.self_pos;
    let (max_x, max_y) = (view.grid_size.0 - 1, view.grid_size.1 - 1);

    let score = |dest: Position, space: i32| -> f64 {
        let nearest_zombie = zombies
            .iter()
            .map(|z| Grid::distance(dest, *z))
            .fold(f64::INFINITY, f64::min);
        if space == 0 || nearest_zombie <= 1.0 {
            0.0
        } else {
            Grid::distance(dest, beast)
        }
    };
    let left = score(view.self_pos.offset(Direction::Left), x);
    let right = score(view.self_pos.offset(Direction::Right), max_x - x);
    let up = score(view.self_pos.offset(Direction::Up), y);
    let down = score(view.self_pos.offset(Direction::Down), max_y - y);

    let (x_len, x_dir, x_space) = if left > right || (left == right && x > max_x - x) {
        (left, Direction::Left, x)
    } else {
        (right, Direction::Right, max_x - x)
    };
    let (y_len, y_dir, y_space) = if up > down || (up == down && y > max_y - y) {
        (up, Direction::Up, y)
    } else {
        (down, Direction::Down, max_y - y)
    };

    // Cornered on both axes: bolt sideways anyway.
    if x_len <= 1.0 && y_len <= 1.0 {
        return Some(x_dir);
    }
    if x_len > y_len {
        Some(x_dir)
    } else if x_len < y_len {
        Some(y_dir)
    } else if x_space > y_space {
        Some(x_dir)
    } else {
        Some(y_dir)
    }
}

/// Runs away for the first ten turns, then charges the nearest threat.
fn leeroy(view: &StrategyView) -> Option<Direction> {
    let Some(closest_threat) = view.threats.iter().copied().min_by(|a, b| {
        Grid::distance(view.self_pos, *a).total_cmp(&Grid::distance(view.self_pos, *b))
    }) else {
        return Some(Direction::Right);
    };

    let moves = view.candidate_moves();
    let picked = if view.turn < 10 {
        moves.iter().max_by(|(_, a), (_, b)| {
            Grid::distance(*a, closest_threat).total_cmp(&Grid::distance(*b, closest_threat))
        })
    } else {
        moves.iter().min_by(|(_, a), (_, b)| {
            Grid::distance(*a, closest_threat).total_cmp(&Grid::distance(*b, closest_threat))
        })
    };
    picked.and_then(|(dir, _)| *dir)
}

/// Hugs the walls. Against the pursuer nearest on the x axis it slides
/// along whichever wall it stands on, away from the danger; in the
/// interior it dodges perpendicular to the pursuer's dominant axis.
/// Corners get explicit escapes once the pursuer is within reach.
fn leprechaun(view: &StrategyView) -> Option<Direction> {
    let (max_x, max_y) = (view.grid_size.0 - 1, view.grid_size.1 - 1);
    let pos = view.self_pos;
    let nearest = view
        .threats
        .iter()
        .copied()
        .min_by_key(|t| (t.x - pos.x).abs())?;
    let dx = pos.x - nearest.x;
    let dy = pos.y - nearest.y;

    if Grid::distance(pos, nearest) <= 5.0 {
        if pos == Position::new(0, 0) {
            return Some(if dx.abs() > dy.abs() {
                Direction::Down
            } else {
                Direction::Right
            });
        }
        if pos == Position::new(max_x, 0) {
            return Some(if dx.abs() > dy.abs() {
                Direction::Down
            } else {
                Direction::Left
            });
        }
        if pos == Position::new(0, max_y) {
            return Some(if dx.abs() > dy.abs() {
                Direction::Up
            } else {
                Direction::Right
            });
        }
        if pos == Position::new(max_x, max_y) {
            return Some(if dx.abs() > dy.abs() {
                Direction::Up
            } else {
                Direction::Left
            });
        }
    }

    if pos.y == 0 && pos.x < max_x {
        Some(if dx > 0 { Direction::Right } else { Direction::Left })
    } else if pos.x == max_x && pos.y < max_y {
        Some(if dy > 0 { Direction::Down } else { Direction::Up })
    } else if pos.y == max_y && pos.x > 0 {
        Some(if dx > 0 { Direction::Right } else { Direction::Left })
    } else if pos.x == 0 && pos.y > 0 {
        Some(if dy > 0 { Direction::Down } else { Direction::Up })
    } else if dx.abs() > dy.abs() {
        Some(if dy > 0 { Direction::Down } else { Direction::Up })
    } else {
        Some(if dx > 0 { Direction::Right } else { Direction::Left })
    }
}

/// Bravely runs away from every threat, hiding behind whichever
/// engineer currently stands closer to the danger.
fn brave_sir_robin(view: &StrategyView) -> Option<Direction> {
    let total_threat_distance =
        |pos: Position| -> f64 { view.threats.iter().map(|t| Grid::distance(pos, *t)).sum() };

    let steps: Vec<(Direction, Position)> = Direction::ALL
        .iter()
        .map(|d| (*d, view.self_pos.offset(*d)))
        .filter(|(_, dest)| view.in_bounds(*dest))
        .collect();

    // Last engineer standing: nothing left but distance.
    if view.others.is_empty() {
        return steps
            .iter()
            .max_by(|(_, a), (_, b)| total_threat_distance(*a).total_cmp(&total_threat_distance(*b)))
            .map(|(dir, _)| *dir);
    }

    let someone_is_closer = view.others.iter().any(|eng| {
        view.threats
            .iter()
            .any(|t| Grid::distance(*eng, *t) < Grid::distance(view.self_pos, *t))
    });
    let closest_engineer = view
        .others
        .iter()
        .copied()
        .min_by(|a, b| {
            Grid::distance(view.self_pos, *a).total_cmp(&Grid::distance(view.self_pos, *b))
        })?;
    let my_distance_to_engineer = Grid::distance(view.self_pos, closest_engineer);

    let mut best: Option<Direction> = None;
    let mut best_distance = -1.0_f64;
    for (dir, dest) in steps {
        if someone_is_closer {
            // Others are soaking the attention; maximize total distance.
            let d = total_threat_distance(dest);
            if d > best_distance {
                best_distance = d;
                best = Some(dir);
            }
        } else if Grid::distance(dest, closest_engineer) < my_distance_to_engineer {
            // I am the most exposed; tuck in behind the nearest engineer.
            best = Some(dir);
        }
    }
    best
}

/// Circles the border clockwise, heading for the bottom edge first.
fn edgy_engineer(view: &StrategyView) -> Option<Direction> {
    let max_x = view.grid_size.0 - 1;
    let max_y = view.grid_size.1 - 1;
    let Position { x, y } = view.self_pos;

    if x != 0 && x != max_x && y != 0 && y != max_y {
        Some(Direction::Down)
    } else if y == max_y && x != max_x {
        Some(Direction::Right)
    } else if x == max_x && y != 0 {
        Some(Direction::Up)
    } else if y == 0 && x != 0 {
        Some(Direction::Left)
    } else if x == 0 && y != max_y {
        Some(Direction::Down)
    } else {
        None
    }
}

/// Panics along one axis per turn parity, toward the bigger crowd.
fn aaahhhhh(view: &StrategyView) -> Option<Direction> {
    let mut rng = rand::thread_rng();
    let Position { x, y } = view.self_pos;

    let left = view.others.iter().filter(|o| o.x < x).count();
    let right = view.others.iter().filter(|o| o.x > x).count();
    let above = view.others.iter().filter(|o| o.y < y).count();
    let below = view.others.iter().filter(|o| o.y > y).count();

    let direction = if view.turn % 2 == 0 {
        if left > right {
            Direction::Right
        } else if left < right {
            Direction::Left
        } else {
            *[Direction::Left, Direction::Right].choose(&mut rng)?
        }
    } else if above > below {
        Direction::Down
    } else if above < below {
        Direction::Up
    } else {
        *[Direction::Up, Direction::Down].choose(&mut rng)?
    };

    if view.in_bounds(view.self_pos.offset(direction)) {
        return Some(direction);
    }
    Direction::ALL
        .into_iter()
        .find(|d| view.in_bounds(view.self_pos.offset(*d)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(
        self_pos: Position,
        threats: &'a [Position],
        others: &'a [Position],
        turn: u64,
    ) -> StrategyView<'a> {
        StrategyView {
            self_pos,
            threats,
            others,
            grid_size: (12, 10),
            turn,
        }
    }

    #[test]
    fn rapid_ryan_flees_the_beast() {
        let threats = [Position::new(0, 5)];
        let v = view(Position::new(5, 5), &threats, &[], 3);
        assert_eq!(rapid_ryan(&v), Some(Direction::Right));
    }

    #[test]
    fn leeroy_charges_after_turn_ten() {
        let threats = [Position::new(0, 5)];
        let v = view(Position::new(5, 5), &threats, &[], 12);
        assert_eq!(leeroy(&v), Some(Direction::Left));

        let early = view(Position::new(5, 5), &threats, &[], 3);
        assert_eq!(leeroy(&early), Some(Direction::Right));
    }

    #[test]
    fn saboteur_baits_the_beast_from_outside_its_reach() {
        // Distance 6 to the only threat: close back in toward it.
        let threats = [Position::new(8, 2)];
        let v = view(Position::new(2, 2), &threats, &[], 0);
        assert_eq!(saboteur(&v), Some(Direction::Right));
    }

    #[test]
    fn saboteur_regroups_when_the_beast_is_close() {
        // Threat one cell away and an engineer out right: run to them.
        let threats = [Position::new(5, 4)];
        let others = [Position::new(9, 5)];
        let v = view(Position::new(5, 5), &threats, &others, 0);
        assert_eq!(saboteur(&v), Some(Direction::Right));
    }

    #[test]
    fn mui_shaggy_takes_the_most_open_sidestep() {
        let threats = [Position::new(3, 5)];
        let v = view(Position::new(5, 5), &threats, &[], 0);
        assert_eq!(mui_shaggy(&v), Some(Direction::Right));
    }

    #[test]
    fn mui_shaggy_refuses_steps_that_brush_a_zombie() {
        // A zombie at (7,5) zeroes the rightward step; the best
        // remaining axis is the vertical one.
        let threats = [Position::new(3, 5), Position::new(7, 5)];
        let v = view(Position::new(5, 5), &threats, &[], 0);
        assert_eq!(mui_shaggy(&v), Some(Direction::Up));
    }

    #[test]
    fn leprechaun_slides_along_its_wall_away_from_the_beast() {
        let threats = [Position::new(3, 0)];
        let v = view(Position::new(5, 0), &threats, &[], 0);
        assert_eq!(leprechaun(&v), Some(Direction::Right));
    }

    #[test]
    fn leprechaun_escapes_a_corner_on_the_weaker_axis() {
        // Beast mostly to the right: break downward out of (0,0).
        let threats = [Position::new(3, 1)];
        let v = view(Position::new(0, 0), &threats, &[], 0);
        assert_eq!(leprechaun(&v), Some(Direction::Down));
    }

    #[test]
    fn leprechaun_dodges_perpendicular_in_the_interior() {
        let threats = [Position::new(2, 5)];
        let v = view(Position::new(5, 5), &threats, &[], 0);
        assert_eq!(leprechaun(&v), Some(Direction::Up));
    }

    #[test]
    fn the_default_roster_fields_ten_engineers() {
        let roster = default_roster();
        assert_eq!(roster.len(), 10);
        let names: Vec<&str> = roster.iter().map(|e| e.name).collect();
        for name in ["Saboteur", "mui_shaggy", "Leprechaun"] {
            assert!(names.contains(&name), "{name} missing from the roster");
        }
    }

    #[test]
    fn edgy_engineer_walks_the_border_clockwise() {
        let threats = [Position::new(6, 6)];
        let cases = [
            (Position::new(5, 5), Direction::Down),  // interior
            (Position::new(5, 9), Direction::Right), // bottom edge
            (Position::new(11, 5), Direction::Up),   // right edge
            (Position::new(5, 0), Direction::Left),  // top edge
            (Position::new(0, 5), Direction::Down),  // left edge
        ];
        for (pos, expected) in cases {
            let v = view(pos, &threats, &[], 0);
            assert_eq!(edgy_engineer(&v), Some(expected), "at {pos:?}");
        }
    }

    #[test]
    fn strategies_never_step_off_the_grid() {
        let grid = Grid::new(12, 10);
        let threats = [Position::new(6, 4), Position::new(2, 2)];
        let others = [Position::new(1, 1), Position::new(10, 8)];
        let corners = [
            Position::new(0, 0),
            Position::new(11, 0),
            Position::new(0, 9),
            Position::new(11, 9),
        ];
        for entry in default_roster() {
            for corner in corners {
                for turn in 0..4 {
                    let v = view(corner, &threats, &others, turn);
                    // A `None` stay is always legal; any direction must
                    // be survivable through the clamped step.
                    let next = grid.step(corner, (entry.strategy)(&v));
                    assert!(grid.contains(next), "{} left the grid", entry.name);
                }
            }
        }
    }
}
