//! Level generation.
//!
//! A level is a bordered grid with a random wall fill, a few fixed spawn
//! points and an L-shaped corridor from the start to the exit that is carved
//! last, so every level can be finished whatever the fill produced.

use rand::Rng;
use tracing::info;

use crate::components::{Enemy, Pos, Tile, WallKind};
use crate::error::{GameError, Result};
use crate::grid::Grid;

pub const GRID_ROWS: usize = 20;
pub const GRID_COLS: usize = 20;
/// Smallest side length that still fits every fixed spawn point.
pub const MIN_DIMENSION: usize = 8;
pub const START: Pos = Pos::new(1, 1);
/// Valid player moves between two enemy steps.
pub const ENEMY_MOVE_DELAY: u32 = 1;

const FILL_CHANCE_FIRST_LEVEL: f64 = 0.15;
const FILL_CHANCE_LATER_LEVELS: f64 = 0.25;

/// Everything that makes up one level in play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelState {
    pub grid: Grid,
    pub player: Pos,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<Pos>,
    pub exit: Pos,
    pub score: u32,
    /// Valid moves since the enemies last stepped.
    pub move_counter: u32,
    pub total_moves: u32,
    pub enemy_delay: u32,
    pub level: u32,
    pub game_over: bool,
}

impl LevelState {
    pub fn enemy_at(&self, pos: Pos) -> bool {
        self.enemies.iter().any(|e| e.pos == pos)
    }

    pub fn powerup_at(&self, pos: Pos) -> bool {
        self.powerups.contains(&pos)
    }

    pub fn player_on_exit(&self) -> bool {
        self.player == self.exit
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelGenerator {
    rows: usize,
    cols: usize,
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
        }
    }
}

impl LevelGenerator {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows < MIN_DIMENSION || cols < MIN_DIMENSION {
            return Err(GameError::GridTooSmall {
                rows,
                cols,
                min: MIN_DIMENSION,
            });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn exit(&self) -> Pos {
        Pos::new(self.rows as i32 - 2, self.cols as i32 - 2)
    }

    pub fn generate(&self, level: u32, rng: &mut impl Rng) -> LevelState {
        let mut grid = Grid::new(self.rows, self.cols);
        grid.fill_border(Tile::Wall(WallKind::Soft));
        random_fill(&mut grid, fill_chance(level), rng);
        if level >= 2 {
            overlay_cross_walls(&mut grid);
        }

        let exit = self.exit();
        grid.set(START, Tile::Open);
        grid.set(exit, Tile::Exit);

        let enemies: Vec<Enemy> = enemy_spawns(level, self.rows as i32, self.cols as i32)
            .into_iter()
            .enumerate()
            .map(|(id, pos)| Enemy { id, pos })
            .collect();
        for enemy in &enemies {
            grid.set(enemy.pos, Tile::Open);
        }
        let powerups = powerup_spawns(level, self.rows as i32, self.cols as i32);
        for &pos in &powerups {
            grid.set(pos, Tile::Open);
        }

        carve_guaranteed_path(&mut grid);

        info!(
            level,
            rows = self.rows,
            cols = self.cols,
            enemies = enemies.len(),
            powerups = powerups.len(),
            "generated level"
        );

        LevelState {
            grid,
            player: START,
            enemies,
            powerups,
            exit,
            score: 0,
            move_counter: 0,
            total_moves: 0,
            enemy_delay: ENEMY_MOVE_DELAY,
            level,
            game_over: false,
        }
    }
}

pub fn fill_chance(level: u32) -> f64 {
    if level <= 1 {
        FILL_CHANCE_FIRST_LEVEL
    } else {
        FILL_CHANCE_LATER_LEVELS
    }
}

fn random_fill(grid: &mut Grid, chance: f64, rng: &mut impl Rng) {
    let rows = grid.rows() as i32;
    let cols = grid.cols() as i32;
    for row in 1..rows - 1 {
        for col in 1..cols - 1 {
            let tile = if rng.gen_bool(chance) {
                let kind = if rng.gen_bool(0.5) {
                    WallKind::Soft
                } else {
                    WallKind::Hard
                };
                Tile::Wall(kind)
            } else {
                Tile::Open
            };
            grid.set(Pos::new(row, col), tile);
        }
    }
}

/// Splits the interior into quadrants: a vertical wall with gaps at the row
/// thirds and a horizontal wall with a gap at the first column quarter.
fn overlay_cross_walls(grid: &mut Grid) {
    let rows = grid.rows() as i32;
    let cols = grid.cols() as i32;

    let mid_col = cols / 2;
    for row in 1..rows - 1 {
        if row == rows / 3 || row == (2 * rows) / 3 {
            continue;
        }
        grid.set(Pos::new(row, mid_col), Tile::Wall(WallKind::Soft));
    }

    let mid_row = rows / 2;
    for col in 1..cols - 1 {
        if col == cols / 4 {
            continue;
        }
        grid.set(Pos::new(mid_row, col), Tile::Wall(WallKind::Hard));
    }
}

fn enemy_spawns(level: u32, rows: i32, cols: i32) -> Vec<Pos> {
    if level <= 1 {
        vec![
            Pos::new(1, cols - 2),
            Pos::new(rows / 2, 1),
            Pos::new(rows / 2, cols - 3),
        ]
    } else {
        vec![
            Pos::new(1, cols - 2),
            Pos::new(rows - 2, 1),
            Pos::new(rows / 2, cols - 2),
            Pos::new(rows - 2, cols / 2),
            Pos::new(rows / 3, cols / 3),
        ]
    }
}

fn powerup_spawns(level: u32, rows: i32, cols: i32) -> Vec<Pos> {
    if level <= 1 {
        vec![Pos::new(rows / 2, cols / 2), Pos::new(3, cols - 4)]
    } else {
        vec![
            Pos::new(rows / 2, 2),
            Pos::new(rows - 3, cols - 3),
            Pos::new(2, 2),
        ]
    }
}

/// Opens row 1 and the second-to-last column, then puts the exit back in the
/// corner where they meet. Must run after every other write to the grid.
pub fn carve_guaranteed_path(grid: &mut Grid) {
    let rows = grid.rows() as i32;
    let cols = grid.cols() as i32;
    for col in 1..=cols - 2 {
        grid.set(Pos::new(1, col), Tile::Open);
    }
    for row in 1..=rows - 2 {
        grid.set(Pos::new(row, cols - 2), Tile::Open);
    }
    grid.set(START, Tile::Open);
    grid.set(Pos::new(rows - 2, cols - 2), Tile::Exit);
}
