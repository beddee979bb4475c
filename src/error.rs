use std::path::PathBuf;

/// Failures while reading or writing a save file.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("cannot access save file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("save data ended while reading {section}")]
    Truncated { section: &'static str },

    #[error("save data line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error(transparent)]
    Stream(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Grid too small to place every fixed spawn point.
    #[error("grid {rows}x{cols} is smaller than the {min}x{min} minimum")]
    GridTooSmall { rows: usize, cols: usize, min: usize },
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
