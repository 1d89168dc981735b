//! Errors raised while building a game from a [`GameConfig`](super::GameConfig).

use thiserror::Error;

/// Invalid board or snake configuration.
///
/// Game-over is not an error; these only fire at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A dimension that must be strictly positive was zero or negative
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: i64 },

    /// The cell does not fit on the board
    #[error("cell size {cell_size} exceeds board {width}x{height}")]
    CellTooLarge {
        cell_size: i32,
        width: i32,
        height: i32,
    },

    /// The initial snake must have at least a head
    #[error("initial snake length must be at least 1")]
    EmptySnake,

    /// The initial body would stick out past the left wall
    #[error("board has {columns} columns, too narrow for an initial snake of length {length}")]
    BoardTooSmall { columns: i32, length: usize },
}

impl ConfigError {
    #[must_use]
    pub fn non_positive(name: &'static str, value: impl Into<i64>) -> Self {
        Self::NonPositive {
            name,
            value: value.into(),
        }
    }
}
