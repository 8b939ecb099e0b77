//! Board geometry and timing.

use std::time::Duration;

use thiserror::Error;

use crate::Coords;

pub const SCREEN_WIDTH: i32 = 600;
pub const SCREEN_HEIGHT: i32 = 400;
pub const CELL_SIZE: i32 = 20;
pub const TICK_INTERVAL_MS: u64 = 175;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    CellSize(i32),
    #[error("board {axis} must be positive, got {value}")]
    Empty { axis: &'static str, value: i32 },
    #[error("board {axis} of {value} is not a multiple of the cell size {cell_size}")]
    Misaligned { axis: &'static str, value: i32, cell_size: i32 },
    #[error("tick interval must be non-zero")]
    ZeroTick,
}

/// Settings for one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Board width in pixels.
    pub width: i32,
    /// Board height in pixels.
    pub height: i32,
    /// Side of one square cell in pixels.
    pub cell_size: i32,
    /// Time between two game updates.
    pub tick: Duration,
    /// Seed for food placement, random when `None`.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            cell_size: CELL_SIZE,
            tick: Duration::from_millis(TICK_INTERVAL_MS),
            seed: None,
        }
    }
}

impl GameConfig {
    #[cfg(test)]
    pub fn with_board(mut self, width: i32, height: i32, cell_size: i32) -> Self {
        self.width = width;
        self.height = height;
        self.cell_size = cell_size;

        self
    }

    #[cfg(test)]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;

        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;

        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::CellSize(self.cell_size));
        }

        for (axis, value) in [("width", self.width), ("height", self.height)].iter().copied() {
            if value <= 0 {
                return Err(ConfigError::Empty { axis, value });
            }
            if value % self.cell_size != 0 {
                return Err(ConfigError::Misaligned { axis, value, cell_size: self.cell_size });
            }
        }

        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }

        Ok(())
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    /// Center cell of the board, always grid aligned.
    pub fn center(&self) -> Coords {
        (self.columns() / 2 * self.cell_size, self.rows() / 2 * self.cell_size)
    }

    pub fn contains(&self, pos: Coords) -> bool {
        (0..self.width).contains(&pos.0) && (0..self.height).contains(&pos.1)
    }
}
