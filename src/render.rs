use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::components::{EntityKind, Pos, Tile, WallKind};
use crate::level::LevelState;

const CELL_W: usize = 2;
const TITLE: &str = "Run with Mind";
const BANNER_RULE: &str = "=====================================";
const BANNER_H: usize = 3;
const CONTROLS: &str = "Controls: Move with WASD. Press 'M' for menu (save/load).";

/// Colours for every kind of cell. Passed to the renderer instead of living
/// in globals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub player: Color,
    pub enemy: Color,
    pub powerup: Color,
    pub wall: Color,
    pub exit: Color,
    pub open_light: Color,
    pub open_dark: Color,
    pub banner: Color,
    pub text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            player: Color::Green,
            enemy: Color::Red,
            powerup: Color::Yellow,
            wall: Color::Blue,
            exit: Color::Magenta,
            open_light: Color::White,
            open_dark: Color::DarkGrey,
            banner: Color::Yellow,
            text: Color::Reset,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Entity(EntityKind),
    Powerup,
    Wall(WallKind),
    Exit,
    Open,
}

impl Glyph {
    fn text(self) -> String {
        match self {
            Glyph::Entity(kind) => kind.symbol().to_string(),
            Glyph::Powerup => "*".to_string(),
            Glyph::Wall(kind) => Tile::Wall(kind).to_char().to_string().repeat(CELL_W),
            Glyph::Exit => Tile::Exit.to_char().to_string(),
            Glyph::Open => String::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: Glyph,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        glyph: Glyph::Open,
        fg: Color::Reset,
        bg: Color::Reset,
    };
}

/// What to draw at `pos`. Occupants win over terrain in the order
/// player, enemy, powerup.
pub fn cell_for(state: &LevelState, pos: Pos, theme: &Theme) -> Cell {
    let bg = if (pos.row + pos.col) % 2 == 0 {
        theme.open_light
    } else {
        theme.open_dark
    };
    let on_open = |glyph, fg| Cell { glyph, fg, bg };

    if pos == state.player {
        return on_open(Glyph::Entity(EntityKind::Player), theme.player);
    }
    if state.enemy_at(pos) {
        return on_open(Glyph::Entity(EntityKind::Enemy), theme.enemy);
    }
    if state.powerup_at(pos) {
        return on_open(Glyph::Powerup, theme.powerup);
    }
    match state.grid.get(pos).unwrap_or_default() {
        Tile::Wall(kind) => Cell {
            glyph: Glyph::Wall(kind),
            fg: theme.wall,
            bg: Color::Reset,
        },
        Tile::Exit => Cell {
            glyph: Glyph::Exit,
            fg: theme.exit,
            bg: Color::Reset,
        },
        Tile::Open => on_open(Glyph::Open, theme.text),
    }
}

/// Text lines under the grid: HUD, controls, then any messages.
pub fn footer_lines(state: &LevelState, messages: &[String]) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Score: {}   Level: {}   Moves: {}",
            state.score, state.level, state.total_moves
        ),
        CONTROLS.to_string(),
    ];
    lines.extend(messages.iter().cloned());
    lines
}

/// Terminal columns and rows a frame needs. Saturates at `u16::MAX`, which
/// no terminal reaches, so oversized grids land on the "too small" screen.
fn frame_size(rows: usize, cols: usize, footer: usize) -> (u16, u16) {
    let fit = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
    let w = cols.saturating_mul(CELL_W);
    let h = BANNER_H.saturating_add(rows).saturating_add(footer);
    (fit(w), fit(h))
}

/// Something that can show a level with a few lines of text under it.
pub trait Screen {
    fn draw(&mut self, state: &LevelState, messages: &[String]) -> io::Result<()>;
}

/// Draws frames to a raw-mode terminal, only rewriting cells and lines that
/// changed since the previous frame.
pub struct Renderer<W: Write> {
    out: W,
    theme: Theme,
    last: Vec<Cell>,
    last_lines: Vec<String>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self {
            out,
            theme,
            last: Vec::new(),
            last_lines: Vec::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 0,
        }
    }

    fn draw_cell(&mut self, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = cell.glyph.text();
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + (BANNER_H + y) as u16;
        self.out.queue(MoveTo(x_pos, y_pos))?;
        self.out.queue(SetForegroundColor(cell.fg))?;
        self.out.queue(SetBackgroundColor(cell.bg))?;
        self.out.queue(Print(&text))?;
        let w = UnicodeWidthStr::width(text.as_str());
        if w < CELL_W {
            self.out.queue(Print(" ".repeat(CELL_W - w)))?;
        }
        self.out.queue(ResetColor)?;
        Ok(())
    }

    fn draw_line(&mut self, y: u16, text: &str, color: Color) -> io::Result<()> {
        self.out.queue(MoveTo(self.origin_x, y))?;
        self.out.queue(Clear(ClearType::UntilNewLine))?;
        self.out.queue(SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        self.out.queue(ResetColor)?;
        Ok(())
    }

    fn draw_banner(&mut self) -> io::Result<()> {
        let color = self.theme.banner;
        self.draw_line(self.origin_y, BANNER_RULE, color)?;
        self.draw_line(self.origin_y + 1, &format!("      {TITLE}"), color)?;
        self.draw_line(self.origin_y + 2, BANNER_RULE, color)
    }
}

impl<W: Write> Screen for Renderer<W> {
    fn draw(&mut self, state: &LevelState, messages: &[String]) -> io::Result<()> {
        let rows = state.grid.rows();
        let cols = state.grid.cols();
        let lines = footer_lines(state, messages);
        let (needed_w, needed_h) = frame_size(rows, cols, lines.len());

        let (term_w, term_h) = terminal::size()?;
        let oversized = needed_w == u16::MAX || needed_h == u16::MAX;
        if oversized || term_w < needed_w || term_h < needed_h {
            self.out.queue(MoveTo(0, 0))?;
            self.out.queue(Clear(ClearType::All))?;
            self.out.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            )))?;
            self.out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2;
        let moved = origin_x != self.origin_x || origin_y != self.origin_y;
        if moved || self.last.len() != rows * cols {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            self.out.queue(Clear(ClearType::All))?;
            self.last = vec![Cell::BLANK; rows * cols];
            self.last_lines.clear();
            self.draw_banner()?;
        }

        for y in 0..rows {
            for x in 0..cols {
                let cell = cell_for(state, Pos::new(y as i32, x as i32), &self.theme);
                let idx = y * cols + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(x, y, cell)?;
                }
            }
        }

        let footer_y = self.origin_y + (BANNER_H + rows) as u16;
        let line_count = lines.len().max(self.last_lines.len());
        for i in 0..line_count {
            let text = lines.get(i).map(String::as_str).unwrap_or("");
            if self.last_lines.get(i).map(String::as_str) != Some(text) {
                self.draw_line(footer_y + i as u16, text, self.theme.text)?;
            }
        }
        self.last_lines = lines;
        self.needs_full = false;

        self.out.flush()
    }
}
