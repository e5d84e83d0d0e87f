use thiserror::Error;

/// Startup configuration problems. Nothing is simulated until these pass.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell count must be positive")]
    ZeroCells,
    #[error("cell count must be even, got {0}")]
    OddCells(u16),
    #[error("board size must be positive")]
    ZeroBoardSize,
    #[error("board size {board}px is not divisible into {cells} cells")]
    UnevenCellSize { board: u32, cells: u16 },
    #[error("start size must be at least one segment")]
    ZeroStartSize,
    #[error("start size {start_size} does not fit a board of {capacity} cells")]
    StartSizeTooLarge { start_size: usize, capacity: usize },
    #[error("update interval must be positive")]
    ZeroInterval,
}

pub type Result<T> = core::result::Result<T, ConfigError>;
