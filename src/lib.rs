//! Run with Mind: a terminal maze chase over two levels.
//!
//! The player walks from the top-left corner to the exit in the bottom-right
//! while enemies close in one greedy step per move. Levels are randomly
//! filled but always keep an open corridor along the top row and the right
//! column.

pub mod app;
pub mod chase;
pub mod components;
pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod level;
pub mod movement;
pub mod player;
pub mod render;
pub mod save;
pub mod session;

pub use components::{Direction, Enemy, EntityKind, Pos, Tile, WallKind};
pub use error::{GameError, SaveError};
pub use grid::Grid;
pub use level::{LevelGenerator, LevelState};
pub use session::{Session, Status, StepReport};
