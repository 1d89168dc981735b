use std::time::Duration;

use super::{error::ConfigError, state::Board};

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Width of the playfield in units
    pub width: i32,
    /// Height of the playfield in units
    pub height: i32,
    /// Size of one grid cell; movement and food snap to it
    pub cell_size: i32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Game turns per second driven by the front end
    pub ticks_per_second: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 500,
            cell_size: 10,
            initial_snake_length: 3,
            ticks_per_second: 10,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_cell_size(mut self, cell_size: i32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Create a small board for testing (10x10 cells)
    pub fn small() -> Self {
        Self::new(100, 100)
    }

    /// Time between two game turns
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }

    /// Check the configuration and derive the board geometry.
    ///
    /// Widths and heights that are not a multiple of the cell size are
    /// truncated to whole cells.
    pub fn board(&self) -> Result<Board, ConfigError> {
        if self.width <= 0 {
            return Err(ConfigError::non_positive("width", self.width));
        }
        if self.height <= 0 {
            return Err(ConfigError::non_positive("height", self.height));
        }
        if self.cell_size <= 0 {
            return Err(ConfigError::non_positive("cell size", self.cell_size));
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::non_positive(
                "ticks per second",
                self.ticks_per_second,
            ));
        }
        if self.cell_size > self.width || self.cell_size > self.height {
            return Err(ConfigError::CellTooLarge {
                cell_size: self.cell_size,
                width: self.width,
                height: self.height,
            });
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        let board = Board::new(self.width, self.height, self.cell_size);

        // Body extends leftward from the centre column
        let room = i64::from(board.columns() / 2) + 1;
        if (self.initial_snake_length as i64) > room {
            return Err(ConfigError::BoardTooSmall {
                columns: board.columns(),
                length: self.initial_snake_length,
            });
        }

        // Food needs at least one free cell at start
        if board.cell_count() <= self.initial_snake_length {
            return Err(ConfigError::BoardTooSmall {
                columns: board.columns(),
                length: self.initial_snake_length,
            });
        }

        Ok(board)
    }
}
