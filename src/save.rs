//! Plain-text save files.
//!
//! ```text
//! level score move_counter total_moves enemy_delay game_over
//! rows cols
//! <rows lines of cols grid characters>
//! player_row player_col
//! exit_row exit_col
//! enemy_count
//! <one "row col" line per enemy>
//! powerup_count
//! <one "row col" line per powerup>
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::{info, warn};

use crate::components::{Enemy, Pos, Tile};
use crate::error::SaveError;
use crate::grid::Grid;
use crate::level::LevelState;

/// Largest row or column count accepted from a save file. Keeps every cell
/// addressable by a terminal cursor.
const MAX_SAVED_DIMENSION: usize = 255;

pub fn write_level<W: Write>(state: &LevelState, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{} {} {} {} {} {}",
        state.level,
        state.score,
        state.move_counter,
        state.total_moves,
        state.enemy_delay,
        u8::from(state.game_over)
    )?;
    writeln!(out, "{} {}", state.grid.rows(), state.grid.cols())?;
    for r in 0..state.grid.rows() {
        let line: String = state.grid.row(r).iter().map(|t| t.to_char()).collect();
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{} {}", state.player.row, state.player.col)?;
    writeln!(out, "{} {}", state.exit.row, state.exit.col)?;
    writeln!(out, "{}", state.enemies.len())?;
    for enemy in &state.enemies {
        writeln!(out, "{} {}", enemy.pos.row, enemy.pos.col)?;
    }
    writeln!(out, "{}", state.powerups.len())?;
    for pos in &state.powerups {
        writeln!(out, "{} {}", pos.row, pos.col)?;
    }
    Ok(())
}

pub fn read_level<R: BufRead>(input: R) -> Result<LevelState, SaveError> {
    let mut reader = SaveReader {
        lines: input.lines(),
        line_no: 0,
    };

    let header: Vec<u32> = reader.numbers("header", 6)?;
    let (level, score, move_counter, total_moves, enemy_delay, game_over) =
        (header[0], header[1], header[2], header[3], header[4], header[5] != 0);

    let dims: Vec<usize> = reader.numbers("grid size", 2)?;
    let (rows, cols) = (dims[0], dims[1]);
    let allowed = 1..=MAX_SAVED_DIMENSION;
    if !allowed.contains(&rows) || !allowed.contains(&cols) {
        return Err(SaveError::Malformed {
            line: reader.line_no,
            reason: format!("grid size {rows}x{cols} out of range"),
        });
    }

    let mut grid = Grid::new(rows, cols);
    for r in 0..rows {
        let line = reader.raw_line("grid")?;
        if line.chars().count() < cols {
            warn!(line = reader.line_no, "short grid row, padding with open cells");
        }
        for (c, ch) in line.chars().take(cols).enumerate() {
            let tile = Tile::from_char(ch).unwrap_or_else(|| {
                warn!(line = reader.line_no, ch = %ch, "unknown grid character read as open");
                Tile::Open
            });
            grid.set(Pos::new(r as i32, c as i32), tile);
        }
    }

    let player = reader.pos_in("player", &grid)?;
    let exit = reader.pos_in("exit", &grid)?;

    let enemy_count = reader.numbers::<usize>("enemy count", 1)?[0];
    let mut enemies = Vec::new();
    for id in 0..enemy_count {
        enemies.push(Enemy {
            id,
            pos: reader.pos_in("enemies", &grid)?,
        });
    }

    let powerup_count = reader.numbers::<usize>("powerup count", 1)?[0];
    let mut powerups = Vec::new();
    for _ in 0..powerup_count {
        powerups.push(reader.pos_in("powerups", &grid)?);
    }

    Ok(LevelState {
        grid,
        player,
        enemies,
        powerups,
        exit,
        score,
        move_counter,
        total_moves,
        enemy_delay,
        level,
        game_over,
    })
}

pub fn save_to_file(state: &LevelState, path: &Path) -> Result<(), SaveError> {
    let io_err = |source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    write_level(state, &mut out).map_err(io_err)?;
    out.flush().map_err(io_err)?;
    info!(path = %path.display(), level = state.level, "game saved");
    Ok(())
}

pub fn load_from_file(path: &Path) -> Result<LevelState, SaveError> {
    let file = File::open(path).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let state = read_level(BufReader::new(file)).map_err(|e| match e {
        SaveError::Stream(source) => SaveError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    info!(path = %path.display(), level = state.level, "game loaded");
    Ok(state)
}

struct SaveReader<B> {
    lines: io::Lines<B>,
    line_no: usize,
}

impl<B: BufRead> SaveReader<B> {
    fn raw_line(&mut self, section: &'static str) -> Result<String, SaveError> {
        let mut line = self
            .lines
            .next()
            .ok_or(SaveError::Truncated { section })??;
        self.line_no += 1;
        if line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    /// Next non-blank line, split into exactly `count` numbers.
    fn numbers<T: FromStr>(
        &mut self,
        section: &'static str,
        count: usize,
    ) -> Result<Vec<T>, SaveError> {
        let line = loop {
            let line = self.raw_line(section)?;
            if !line.trim().is_empty() {
                break line;
            }
        };
        let values = line
            .split_whitespace()
            .map(|tok| tok.parse::<T>())
            .collect::<Result<Vec<T>, _>>()
            .map_err(|_| SaveError::Malformed {
                line: self.line_no,
                reason: format!("bad number in {section}: {line:?}"),
            })?;
        if values.len() != count {
            return Err(SaveError::Malformed {
                line: self.line_no,
                reason: format!("expected {count} values for {section}, found {}", values.len()),
            });
        }
        Ok(values)
    }

    /// A "row col" line that must name a cell of `grid`.
    fn pos_in(&mut self, section: &'static str, grid: &Grid) -> Result<Pos, SaveError> {
        let v: Vec<i32> = self.numbers(section, 2)?;
        let pos = Pos::new(v[0], v[1]);
        if !grid.in_bounds(pos) {
            return Err(SaveError::Malformed {
                line: self.line_no,
                reason: format!(
                    "{section} position {pos} outside {}x{} grid",
                    grid.rows(),
                    grid.cols()
                ),
            });
        }
        Ok(pos)
    }
}
