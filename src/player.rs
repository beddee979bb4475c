use tracing::info;

use crate::components::{Direction, Pos};
use crate::level::LevelState;
use crate::movement::is_valid_move;

pub const POWERUP_SCORE: u32 = 10;

/// Moves the player one cell if the target is open. A successful move bumps
/// both move counters; a blocked one leaves the state untouched.
pub fn try_move(state: &mut LevelState, dir: Direction) -> bool {
    let target = state.player.step(dir);
    if !is_valid_move(target, &state.grid) {
        return false;
    }
    state.player = target;
    state.move_counter = state.move_counter.saturating_add(1);
    state.total_moves = state.total_moves.saturating_add(1);
    true
}

/// Consumes the powerup at `pos`, if any, and awards its score.
pub fn collect_powerup(state: &mut LevelState, pos: Pos) -> bool {
    let Some(idx) = state.powerups.iter().position(|&p| p == pos) else {
        return false;
    };
    state.powerups.remove(idx);
    state.score = state.score.saturating_add(POWERUP_SCORE);
    info!(at = %pos, score = state.score, "powerup collected");
    true
}
