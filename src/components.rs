use std::fmt;

/// Grid coordinate. `row` is the first axis, `col` the second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, dir: Direction) -> Pos {
        let (dr, dc) = dir.delta();
        Pos {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Two wall flavours that only differ on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallKind {
    Soft,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Open,
    Wall(WallKind),
    Exit,
}

impl Tile {
    pub fn is_wall(self) -> bool {
        matches!(self, Tile::Wall(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Enemy,
}

impl EntityKind {
    pub fn symbol(self) -> char {
        match self {
            EntityKind::Player => 'P',
            EntityKind::Enemy => 'X',
        }
    }
}

/// A chasing enemy. `id` is its spawn ordinal and keeps list order stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub id: usize,
    pub pos: Pos,
}
