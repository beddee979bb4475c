use crate::components::{Pos, Tile, WallKind};

const OPEN_CHAR: char = ' ';
const SOFT_WALL_CHAR: char = '#';
const HARD_WALL_CHAR: char = '@';
const EXIT_CHAR: char = 'E';

impl Tile {
    pub fn to_char(self) -> char {
        match self {
            Tile::Open => OPEN_CHAR,
            Tile::Wall(WallKind::Soft) => SOFT_WALL_CHAR,
            Tile::Wall(WallKind::Hard) => HARD_WALL_CHAR,
            Tile::Exit => EXIT_CHAR,
        }
    }

    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            OPEN_CHAR => Some(Tile::Open),
            SOFT_WALL_CHAR => Some(Tile::Wall(WallKind::Soft)),
            HARD_WALL_CHAR => Some(Tile::Wall(WallKind::Hard)),
            EXIT_CHAR => Some(Tile::Exit),
            _ => None,
        }
    }
}

/// Fixed-size rectangle of tiles, indexed by [`Pos`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Tile>>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![Tile::Open; cols]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.index(pos).is_some()
    }

    pub fn get(&self, pos: Pos) -> Option<Tile> {
        self.index(pos).map(|(r, c)| self.cells[r][c])
    }

    /// Writes `tile` at `pos`. Out-of-bounds writes are dropped.
    pub fn set(&mut self, pos: Pos, tile: Tile) {
        if let Some((r, c)) = self.index(pos) {
            self.cells[r][c] = tile;
        }
    }

    pub fn row(&self, row: usize) -> &[Tile] {
        &self.cells[row]
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| Pos::new(r as i32, c as i32)))
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        self.in_bounds(pos)
            && (pos.row == 0
                || pos.col == 0
                || pos.row == self.rows as i32 - 1
                || pos.col == self.cols as i32 - 1)
    }

    pub fn fill_border(&mut self, tile: Tile) {
        let last_row = self.rows.saturating_sub(1);
        let last_col = self.cols.saturating_sub(1);
        for r in 0..self.rows {
            self.cells[r][0] = tile;
            self.cells[r][last_col] = tile;
        }
        for c in 0..self.cols {
            self.cells[0][c] = tile;
            self.cells[last_row][c] = tile;
        }
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&t| t == tile)
            .count()
    }

    fn index(&self, pos: Pos) -> Option<(usize, usize)> {
        if pos.row < 0 || pos.col < 0 {
            return None;
        }
        let r = pos.row as usize;
        let c = pos.col as usize;
        if r >= self.rows || c >= self.cols {
            return None;
        }
        Some((r, c))
    }
}
