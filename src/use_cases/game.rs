// The turn scheduler and phase state machine driving one hunt.

use crate::domain::{Direction, Entity, EntityKind, GameTuning, Grid, Position, StrategyView};
use crate::interface_adapters::protocol::{EngineerView, GameSnapshot, SightingView};
use crate::use_cases::ledger::{self, LedgerTable};
use crate::use_cases::pursuit::{self, Contact};
use crate::use_cases::strategies::RosterEntry;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Setup,
    BeastHidden,
    BeastVisible,
    GameOver,
}

/// One complete hunt. Owned by whoever drives it (the HTTP layer holds
/// it behind a mutex); all mutation happens inside a single `update`
/// or `reset` call.
pub struct GameState {
    grid: Grid,
    tuning: GameTuning,
    roster: Vec<RosterEntry>,
    beast: Entity,
    engineers: Vec<Entity>,
    phase: GamePhase,
    turn_counter: u64,
    current_turn_index: usize,
    capture_order: Vec<String>,
    /// Next capture-order value; strictly increasing, first catch gets 1.
    next_capture_order: i64,
    finalized: bool,
    last_update: Instant,
    ledger_path: PathBuf,
    ledger: LedgerTable,
}

impl GameState {
    pub fn new(tuning: GameTuning, roster: Vec<RosterEntry>, ledger_path: PathBuf) -> Self {
        let grid = Grid::new(tuning.grid_width, tuning.grid_height);
        let cells = (grid.width as usize) * (grid.height as usize);
        assert!(roster.len() + 1 <= cells, "roster does not fit on the grid");

        // Everyone gets a distinct random cell; collisions retry
        // internally and are never surfaced as errors.
        let positions = random_distinct_positions(grid, roster.len() + 1);
        let engineers: Vec<Entity> = roster
            .iter()
            .zip(&positions)
            .map(|(entry, pos)| Entity::engineer(entry.name, entry.emoji, *pos, entry.strategy))
            .collect();
        let beast = Entity::beast(positions[roster.len()]);

        let mut state = Self {
            grid,
            tuning,
            roster,
            beast,
            engineers,
            phase: GamePhase::Setup,
            turn_counter: 0,
            current_turn_index: 0,
            capture_order: Vec::new(),
            next_capture_order: 1,
            finalized: false,
            last_update: Instant::now(),
            ledger_path,
            ledger: LedgerTable::default(),
        };
        // Setup is transient: the beast exists and may prowl, but it is
        // not lethal until it appears.
        state.phase = GamePhase::BeastHidden;
        info!(
            engineers = state.engineers.len(),
            grid_width = grid.width,
            grid_height = grid.height,
            "hunt started"
        );
        state
    }

    /// Discards everything and rebuilds a fresh hunt with the same
    /// tuning, roster and ledger.
    pub fn reset(&mut self) {
        info!("resetting hunt");
        *self = Self::new(self.tuning, self.roster.clone(), self.ledger_path.clone());
    }

    /// One externally polled tick. Returns whether an update occurred:
    /// throttled calls and post-game calls are no-ops reporting `false`.
    pub fn update(&mut self) -> bool {
        if self.last_update.elapsed() < self.tuning.update_interval {
            return false;
        }
        if self.phase == GamePhase::GameOver {
            self.finalize_once();
            return false;
        }

        self.update_current_entity();
        self.check_collisions();
        self.update_phase();
        self.advance_turn();
        self.last_update = Instant::now();
        true
    }

    fn update_current_entity(&mut self) {
        if self.current_turn_index == 0 {
            self.update_beast();
            return;
        }
        let index = self.current_turn_index - 1;
        match self.engineers[index].kind {
            EntityKind::Engineer => self.update_engineer(index),
            EntityKind::Zombie => self.update_zombie(index),
            EntityKind::Beast => unreachable!("the beast owns slot 0"),
        }
    }

    /// The beast sits out the opening turns, then moves on a
    /// turn-counter schedule that densifies as the game progresses,
    /// with extra pursuit moves on fixed residues.
    fn update_beast(&mut self) {
        let tuning = self.tuning;
        if self.turn_counter < tuning.beast_first_move_turn {
            return;
        }

        let frequency = if self.turn_counter < tuning.beast_ramp_mid {
            2
        } else if self.turn_counter < tuning.beast_ramp_late {
            3
        } else {
            1
        };
        let residue = self.turn_counter % tuning.bonus_move_period;

        if self.turn_counter % frequency == 0 {
            if residue == tuning.random_move_residue {
                let direction = Direction::ALL.choose(&mut rand::thread_rng()).copied();
                self.beast.position = self.grid.step(self.beast.position, direction);
            } else {
                self.pursue_with_beast();
            }
        }
        if residue == tuning.pounce_residue {
            self.pursue_with_beast();
        }
        if tuning.beast_mode && residue == tuning.frenzy_residue {
            self.pursue_with_beast();
        }
    }

    fn pursue_with_beast(&mut self) {
        let contacts = self.contacts();
        let direction = pursuit::next_move(
            &mut self.beast,
            &contacts,
            &self.grid,
            self.tuning.beast_detection_radius,
            self.turn_counter,
        );
        self.beast.position = self.grid.step(self.beast.position, Some(direction));
    }

    fn update_engineer(&mut self, index: usize) {
        if !self.engineers[index].alive {
            return;
        }

        // threats[0] is the beast; zombies follow in roster order.
        let mut threats = vec![self.beast.position];
        threats.extend(
            self.engineers
                .iter()
                .filter(|e| e.kind == EntityKind::Zombie && e.alive)
                .map(|e| e.position),
        );
        let others: Vec<Position> = self
            .engineers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, e)| e.position)
            .collect();

        let grid_size = (self.grid.width, self.grid.height);
        let turn = self.turn_counter;
        let engineer = &mut self.engineers[index];
        let Some(strategy) = engineer.strategy else {
            return;
        };
        let view = StrategyView {
            self_pos: engineer.position,
            threats: &threats,
            others: &others,
            grid_size,
            turn,
        };
        let direction = strategy(&view);
        engineer.position = self.grid.step(engineer.position, direction);
    }

    /// Zombies pursue with the same engine as the beast, at a slower
    /// cadence tied to their own last successful move.
    fn update_zombie(&mut self, index: usize) {
        let since_last = self.turn_counter - self.engineers[index].last_moved_turn;
        if since_last < self.tuning.zombie_move_cadence {
            return;
        }
        let contacts = self.contacts();
        let radius = self.tuning.zombie_detection_radius;
        let turn = self.turn_counter;
        let zombie = &mut self.engineers[index];
        let direction = pursuit::next_move(zombie, &contacts, &self.grid, radius, turn);
        zombie.position = self.grid.step(zombie.position, Some(direction));
        zombie.last_moved_turn = turn;
    }

    /// Stable pre-mutation snapshot of perceivable engineers.
    fn contacts(&self) -> Vec<Contact> {
        self.engineers
            .iter()
            .filter(|e| e.is_live_engineer())
            .map(|e| Contact {
                name: e.name.clone(),
                position: e.position,
            })
            .collect()
    }

    /// Catches are scanned against pre-scan zombie positions, then all
    /// conversions apply together, so an engineer converted this tick
    /// cannot catch a neighbor in the same pass.
    fn check_collisions(&mut self) {
        let beast_lethal = self.phase == GamePhase::BeastVisible;
        let zombie_positions: Vec<Position> = self
            .engineers
            .iter()
            .filter(|e| e.kind == EntityKind::Zombie && e.alive)
            .map(|e| e.position)
            .collect();

        let caught: Vec<usize> = self
            .engineers
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_live_engineer())
            .filter(|(_, e)| {
                (beast_lethal && e.position == self.beast.position)
                    || zombie_positions.contains(&e.position)
            })
            .map(|(index, _)| index)
            .collect();

        for index in caught {
            self.convert_to_zombie(index);
        }
    }

    fn convert_to_zombie(&mut self, index: usize) {
        let order = self.next_capture_order;
        self.next_capture_order += 1;

        let engineer = &mut self.engineers[index];
        engineer.kind = EntityKind::Zombie;
        engineer.emoji = "🧟";
        engineer.strategy = None;
        engineer.score = order;
        info!(engineer = %engineer.name, capture_order = order, "engineer caught");
        let name = engineer.name.clone();
        self.capture_order.push(name);
    }

    fn update_phase(&mut self) {
        if self.phase == GamePhase::BeastHidden
            && self.turn_counter >= self.tuning.beast_appears_turn
        {
            self.phase = GamePhase::BeastVisible;
            info!(turn = self.turn_counter, "the beast appears");
        }

        let live_engineers = self
            .engineers
            .iter()
            .filter(|e| e.is_live_engineer())
            .count();
        if self.phase != GamePhase::GameOver
            && (self.turn_counter >= self.tuning.end_game_turns || live_engineers <= 1)
        {
            self.phase = GamePhase::GameOver;
            info!(turn = self.turn_counter, live_engineers, "game over");
            self.finalize_once();
        }
    }

    fn advance_turn(&mut self) {
        self.current_turn_index = (self.current_turn_index + 1) % (self.engineers.len() + 1);
        if self.current_turn_index == 0 {
            self.turn_counter += 1;
        }
    }

    /// Scoring settles exactly once: survivors outrank every capture
    /// order, and the results land in the append-only ledger. Ledger IO
    /// failure degrades to a logged warning, never a crash.
    fn finalize_once(&mut self) {
        if self.finalized {
            return;
        }
        self.finalized = true;

        for engineer in &mut self.engineers {
            if engineer.kind == EntityKind::Engineer {
                engineer.score += self.next_capture_order + self.tuning.survival_bonus;
            }
        }

        let results: Vec<(String, i64)> = self
            .engineers
            .iter()
            .map(|e| (e.name.clone(), e.score))
            .collect();
        match ledger::record_game(&self.ledger_path, &results) {
            Ok(table) => self.ledger = table,
            Err(error) => warn!(
                %error,
                path = %self.ledger_path.display(),
                "failed to record final scores"
            ),
        }
        info!("final scores settled");
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut pursuer_targets = BTreeMap::new();
        let mut detected_engineers = BTreeMap::new();
        for pursuer in
            std::iter::once(&self.beast).chain(self.engineers.iter().filter(|e| e.is_pursuer()))
        {
            pursuer_targets.insert(pursuer.name.clone(), pursuer.current_target.clone());
            detected_engineers.insert(
                pursuer.name.clone(),
                pursuer
                    .sightings
                    .iter()
                    .map(|s| SightingView {
                        name: s.name.clone(),
                        position: s.position,
                        last_seen_turn: s.last_seen_turn,
                    })
                    .collect(),
            );
        }

        let current_turn_entity = if self.current_turn_index == 0 {
            self.beast.name.clone()
        } else {
            self.engineers[self.current_turn_index - 1].name.clone()
        };

        GameSnapshot {
            beast: (self.phase == GamePhase::BeastVisible).then_some(self.beast.position),
            beast_hidden: self.phase == GamePhase::BeastHidden,
            engineers: self
                .engineers
                .iter()
                .map(|e| EngineerView {
                    name: e.name.clone(),
                    emoji: e.emoji.to_string(),
                    position: e.position,
                    alive: e.alive,
                    is_zombie: e.kind == EntityKind::Zombie,
                    last_moved: e.last_moved_turn,
                })
                .collect(),
            turn_counter: self.turn_counter,
            grid_size: (self.grid.width, self.grid.height),
            game_over: self.phase == GamePhase::GameOver,
            capture_order: self.capture_order.clone(),
            current_turn_entity,
            pursuer_targets,
            detected_engineers,
            ledger: self.ledger.clone(),
            end_game_turns: self.tuning.end_game_turns,
        }
    }
}

fn random_distinct_positions(grid: Grid, count: usize) -> Vec<Position> {
    let mut rng = rand::thread_rng();
    let mut taken: Vec<Position> = Vec::with_capacity(count);
    while taken.len() < count {
        let candidate = Position::new(rng.gen_range(0..grid.width), rng.gen_range(0..grid.height));
        if !taken.contains(&candidate) {
            taken.push(candidate);
        }
    }
    taken
}
