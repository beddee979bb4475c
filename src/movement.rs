use crate::components::Pos;
use crate::grid::Grid;

/// True when `pos` lies inside the grid and is not a wall of either kind.
pub fn is_valid_move(pos: Pos, grid: &Grid) -> bool {
    match grid.get(pos) {
        Some(tile) => !tile.is_wall(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Tile, WallKind};

    fn walled_grid() -> Grid {
        let mut grid = Grid::new(5, 5);
        grid.fill_border(Tile::Wall(WallKind::Soft));
        grid.set(Pos::new(2, 2), Tile::Wall(WallKind::Hard));
        grid.set(Pos::new(3, 3), Tile::Exit);
        grid
    }

    #[test]
    fn rejects_out_of_bounds() {
        let grid = walled_grid();
        for pos in [
            Pos::new(-1, 1),
            Pos::new(1, -1),
            Pos::new(5, 1),
            Pos::new(1, 5),
            Pos::new(i32::MIN, i32::MAX),
        ] {
            assert!(!is_valid_move(pos, &grid), "{pos} should be invalid");
        }
    }

    #[test]
    fn rejects_both_wall_kinds() {
        let grid = walled_grid();
        assert!(!is_valid_move(Pos::new(0, 0), &grid));
        assert!(!is_valid_move(Pos::new(2, 2), &grid));
    }

    #[test]
    fn accepts_open_and_exit() {
        let grid = walled_grid();
        assert!(is_valid_move(Pos::new(1, 1), &grid));
        assert!(is_valid_move(Pos::new(3, 3), &grid));
    }
}
