use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::grid::{Cell, GridGeometry};

/// Default number of cells along one side of the board.
pub const DEFAULT_CELLS: u16 = 4;

/// Board side length in pixels, used by pixel-based displays.
pub const BOARD_SIZE: u32 = 720;

/// Default tick interval in milliseconds.
pub const UPDATE_INTERVAL_MS: u64 = 180;

/// Segments the snake starts with, all stacked on the origin.
pub const START_SIZE: usize = 3;

/// Cell the snake spawns on.
pub const ORIGIN: Cell = Cell::new(0, 0);

/// Recommended range for the cell count. Values outside are allowed.
pub const RECOMMENDED_CELLS: std::ops::RangeInclusive<u16> = 4..=32;

/// Startup configuration for one simulation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub cells: u16,
    pub board_size: u32,
    pub update_interval: Duration,
    pub start_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cells: DEFAULT_CELLS,
            board_size: BOARD_SIZE,
            update_interval: Duration::from_millis(UPDATE_INTERVAL_MS),
            start_size: START_SIZE,
        }
    }
}

impl GameConfig {
    /// Returns the default configuration with a different cell count.
    #[must_use]
    pub fn with_cells(cells: u16) -> Self {
        Self {
            cells,
            ..Self::default()
        }
    }

    /// Checks every precondition and derives the board geometry.
    pub fn validate(&self) -> Result<GridGeometry> {
        if self.cells == 0 {
            return Err(ConfigError::ZeroCells);
        }
        if self.cells % 2 != 0 {
            return Err(ConfigError::OddCells(self.cells));
        }
        if self.board_size == 0 {
            return Err(ConfigError::ZeroBoardSize);
        }
        if self.board_size % u32::from(self.cells) != 0 {
            return Err(ConfigError::UnevenCellSize {
                board: self.board_size,
                cells: self.cells,
            });
        }
        if self.update_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }

        let geometry = GridGeometry::new(self.cells, self.board_size);
        if self.start_size == 0 {
            return Err(ConfigError::ZeroStartSize);
        }
        if self.start_size >= geometry.capacity() {
            return Err(ConfigError::StartSizeTooLarge {
                start_size: self.start_size,
                capacity: geometry.capacity(),
            });
        }

        if !RECOMMENDED_CELLS.contains(&self.cells) {
            log::warn!(
                "cell count {} is outside the recommended range {:?}",
                self.cells,
                RECOMMENDED_CELLS
            );
        }

        Ok(geometry)
    }
}
