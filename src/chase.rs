use tracing::debug;

use crate::components::{Enemy, Pos};
use crate::grid::Grid;
use crate::movement::is_valid_move;

/// One greedy step from `enemy` toward `player`.
///
/// Steps along the axis with the larger distance, preferring rows on a tie.
/// If that cell is blocked it tries a column step from the original position
/// instead, and failing that stays put. There is no search: an enemy can
/// stall against a wall indefinitely.
pub fn next_step(enemy: Pos, player: Pos, grid: &Grid) -> Pos {
    let dr = player.row - enemy.row;
    let dc = player.col - enemy.col;

    let mut next = enemy;
    if dr.abs() >= dc.abs() {
        next.row += dr.signum();
    } else {
        next.col += dc.signum();
    }
    if is_valid_move(next, grid) {
        return next;
    }

    let fallback = Pos::new(enemy.row, enemy.col + dc.signum());
    if is_valid_move(fallback, grid) {
        return fallback;
    }
    enemy
}

/// Moves every enemy one step. All targets are computed against the same
/// player position and grid before any enemy is updated.
pub fn advance_enemies(enemies: &mut [Enemy], player: Pos, grid: &Grid) {
    let targets: Vec<Pos> = enemies
        .iter()
        .map(|enemy| next_step(enemy.pos, player, grid))
        .collect();
    for (enemy, target) in enemies.iter_mut().zip(targets) {
        if enemy.pos != target {
            debug!(enemy = enemy.id, from = %enemy.pos, to = %target, "enemy step");
        }
        enemy.pos = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Tile, WallKind};

    fn open_grid() -> Grid {
        let mut grid = Grid::new(20, 20);
        grid.fill_border(Tile::Wall(WallKind::Soft));
        grid
    }

    #[test]
    fn follows_column_when_it_is_the_longer_axis() {
        let grid = open_grid();
        assert_eq!(next_step(Pos::new(5, 5), Pos::new(5, 10), &grid), Pos::new(5, 6));
        assert_eq!(next_step(Pos::new(5, 5), Pos::new(7, 1), &grid), Pos::new(5, 4));
    }

    #[test]
    fn follows_row_when_it_is_the_longer_axis() {
        let grid = open_grid();
        assert_eq!(next_step(Pos::new(5, 5), Pos::new(10, 5), &grid), Pos::new(6, 5));
        assert_eq!(next_step(Pos::new(5, 5), Pos::new(1, 7), &grid), Pos::new(4, 5));
    }

    #[test]
    fn ties_prefer_rows() {
        let grid = open_grid();
        assert_eq!(next_step(Pos::new(5, 5), Pos::new(8, 8), &grid), Pos::new(6, 5));
        assert_eq!(next_step(Pos::new(5, 5), Pos::new(2, 2), &grid), Pos::new(4, 5));
    }

    #[test]
    fn stays_when_already_on_player() {
        let grid = open_grid();
        assert_eq!(next_step(Pos::new(5, 5), Pos::new(5, 5), &grid), Pos::new(5, 5));
    }

    #[test]
    fn blocked_row_step_falls_back_to_column() {
        let mut grid = open_grid();
        grid.set(Pos::new(6, 5), Tile::Wall(WallKind::Hard));
        assert_eq!(next_step(Pos::new(5, 5), Pos::new(9, 7), &grid), Pos::new(5, 6));
    }

    #[test]
    fn blocked_column_step_retries_the_same_column_step() {
        // The fallback is always a column step, so a blocked column move has
        // nothing else to try.
        let mut grid = open_grid();
        grid.set(Pos::new(5, 6), Tile::Wall(WallKind::Soft));
        assert_eq!(next_step(Pos::new(5, 5), Pos::new(6, 10), &grid), Pos::new(5, 5));
    }

    #[test]
    fn stuck_behind_wall_in_a_straight_line() {
        let mut grid = open_grid();
        grid.set(Pos::new(6, 5), Tile::Wall(WallKind::Soft));
        assert_eq!(next_step(Pos::new(5, 5), Pos::new(10, 5), &grid), Pos::new(5, 5));
    }

    #[test]
    fn never_walks_out_of_bounds() {
        let grid = Grid::new(3, 3);
        assert_eq!(next_step(Pos::new(0, 0), Pos::new(-4, 0), &grid), Pos::new(0, 0));
    }

    #[test]
    fn all_enemies_chase_the_same_snapshot() {
        let grid = open_grid();
        let mut enemies = vec![
            Enemy { id: 0, pos: Pos::new(2, 2) },
            Enemy { id: 1, pos: Pos::new(2, 3) },
            Enemy { id: 2, pos: Pos::new(15, 15) },
        ];
        advance_enemies(&mut enemies, Pos::new(2, 4), &grid);
        let positions: Vec<Pos> = enemies.iter().map(|e| e.pos).collect();
        assert_eq!(positions, vec![Pos::new(2, 3), Pos::new(2, 4), Pos::new(14, 15)]);
        let ids: Vec<usize> = enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
