// Gameplay tuning, kept separate from runtime/server configuration
// (ports, ledger paths). Every constant the scheduler consults is
// named here and overridable at game construction.

use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct GameTuning {
    pub grid_width: i32,
    pub grid_height: i32,

    /// Detection radii are kept as two constants; they share a default
    /// but are allowed to diverge.
    pub beast_detection_radius: f64,
    pub zombie_detection_radius: f64,

    /// Turn at which the beast becomes visible (and lethal).
    pub beast_appears_turn: u64,
    /// Turn before which the beast does not move at all.
    pub beast_first_move_turn: u64,
    /// Movement-frequency ramp: every 2nd turn below `ramp_mid`, every
    /// 3rd below `ramp_late`, every turn after that.
    pub beast_ramp_mid: u64,
    pub beast_ramp_late: u64,

    /// Residue schedule for extra beast moves, modulo `bonus_move_period`.
    pub bonus_move_period: u64,
    /// Residue granting a guaranteed extra pursuit move.
    pub pounce_residue: u64,
    /// Residue granting a further extra move while `beast_mode` is on.
    pub frenzy_residue: u64,
    /// Residue on which the scheduled move goes in a random direction.
    pub random_move_residue: u64,
    pub beast_mode: bool,

    /// A zombie moves only when `turn - last_moved_turn` reaches this.
    pub zombie_move_cadence: u64,

    pub end_game_turns: u64,
    pub survival_bonus: i64,

    /// Minimum wall-clock gap between effective update calls.
    pub update_interval: Duration,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            grid_width: 12,
            grid_height: 10,
            beast_detection_radius: 5.0,
            zombie_detection_radius: 5.0,
            beast_appears_turn: 4,
            beast_first_move_turn: 6,
            beast_ramp_mid: 8,
            beast_ramp_late: 10,
            bonus_move_period: 5,
            pounce_residue: 0,
            frenzy_residue: 2,
            random_move_residue: 3,
            beast_mode: true,
            zombie_move_cadence: 2,
            end_game_turns: 50,
            survival_bonus: 2,
            update_interval: Duration::from_millis(100),
        }
    }
}

impl GameTuning {
    /// Instantly-updating tuning for unit tests.
    #[cfg(test)]
    pub fn unthrottled() -> Self {
        Self {
            update_interval: Duration::ZERO,
            ..Self::default()
        }
    }
}
