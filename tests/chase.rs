use run_with_mind::chase::{advance_enemies, next_step};
use run_with_mind::{Enemy, Grid, Pos, Tile, WallKind};

fn open_grid() -> Grid {
    let mut grid = Grid::new(20, 20);
    grid.fill_border(Tile::Wall(WallKind::Soft));
    grid
}

#[test]
fn steps_along_the_column_toward_player() {
    let grid = open_grid();
    assert_eq!(next_step(Pos::new(5, 5), Pos::new(5, 10), &grid), Pos::new(5, 6));
}

#[test]
fn steps_along_the_row_toward_player() {
    let grid = open_grid();
    assert_eq!(next_step(Pos::new(5, 5), Pos::new(10, 5), &grid), Pos::new(6, 5));
}

#[test]
fn chaser_closes_distance_on_open_ground() {
    let grid = open_grid();
    let player = Pos::new(15, 3);
    let mut enemies = vec![Enemy { id: 0, pos: Pos::new(2, 17) }];
    for _ in 0..40 {
        advance_enemies(&mut enemies, player, &grid);
    }
    assert_eq!(enemies[0].pos, player);
}

#[test]
fn chaser_deadlocks_behind_a_wall() {
    let mut grid = open_grid();
    for col in 1..19 {
        grid.set(Pos::new(8, col), Tile::Wall(WallKind::Hard));
    }
    let player = Pos::new(12, 5);
    let mut enemies = vec![Enemy { id: 0, pos: Pos::new(4, 5) }];
    for _ in 0..10 {
        advance_enemies(&mut enemies, player, &grid);
    }
    assert_eq!(enemies[0].pos, Pos::new(7, 5));
}
