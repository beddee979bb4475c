use rand::Rng;
use tracing::info;

use crate::chase::advance_enemies;
use crate::components::{Direction, Pos};
use crate::level::{LevelGenerator, LevelState};
use crate::player::{collect_powerup, try_move};

/// Reaching the exit on this level wins the game.
pub const FINAL_LEVEL: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    InProgress,
    LevelComplete,
    GameOver,
    GameWon,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::GameOver | Status::GameWon)
    }
}

/// What happened during one player turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub moved: bool,
    pub powerup: Option<Pos>,
    pub enemies_moved: bool,
    pub status: Status,
}

/// One play-through: the current level plus where it stands.
#[derive(Clone, Debug)]
pub struct Session {
    generator: LevelGenerator,
    state: LevelState,
    status: Status,
}

impl Session {
    pub fn new(generator: LevelGenerator, rng: &mut impl Rng) -> Self {
        info!(rows = generator.rows(), cols = generator.cols(), "session started");
        let state = generator.generate(1, rng);
        Self {
            generator,
            state,
            status: Status::InProgress,
        }
    }

    pub fn state(&self) -> &LevelState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Resolves one movement key: player move, powerup pickup, enemy turn,
    /// then the caught/exit checks. Does nothing once the level is over.
    pub fn step(&mut self, dir: Direction) -> StepReport {
        if self.status != Status::InProgress {
            return StepReport {
                moved: false,
                powerup: None,
                enemies_moved: false,
                status: self.status,
            };
        }

        let moved = try_move(&mut self.state, dir);
        let mut powerup = None;
        let landed = self.state.player;
        if moved && collect_powerup(&mut self.state, landed) {
            powerup = Some(landed);
        }

        let mut enemies_moved = false;
        if self.state.move_counter >= self.state.enemy_delay {
            let player = self.state.player;
            advance_enemies(&mut self.state.enemies, player, &self.state.grid);
            self.state.move_counter = 0;
            enemies_moved = true;
        }

        self.status = self.evaluate();
        StepReport {
            moved,
            powerup,
            enemies_moved,
            status: self.status,
        }
    }

    /// Generates the following level after a level is completed. Returns
    /// false when there is no completed level to advance from.
    pub fn next_level(&mut self, rng: &mut impl Rng) -> bool {
        if self.status != Status::LevelComplete {
            return false;
        }
        let level = self.state.level + 1;
        info!(level, "advancing to next level");
        self.state = self.generator.generate(level, rng);
        self.status = Status::InProgress;
        true
    }

    /// Replaces the level, e.g. after loading a save, and works out where
    /// the restored game stands.
    pub fn restore(&mut self, state: LevelState) {
        self.state = state;
        self.status = self.evaluate();
        info!(level = self.state.level, status = ?self.status, "session restored");
    }

    fn evaluate(&mut self) -> Status {
        if !self.state.game_over && self.state.enemy_at(self.state.player) {
            self.state.game_over = true;
            info!(
                level = self.state.level,
                score = self.state.score,
                moves = self.state.total_moves,
                "player caught"
            );
        }
        if self.state.game_over {
            Status::GameOver
        } else if !self.state.player_on_exit() {
            Status::InProgress
        } else if self.state.level < FINAL_LEVEL {
            info!(level = self.state.level, score = self.state.score, "level complete");
            Status::LevelComplete
        } else {
            info!(score = self.state.score, moves = self.state.total_moves, "game won");
            Status::GameWon
        }
    }
}
