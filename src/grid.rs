use std::collections::BTreeSet;

use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Coordinates are signed so a head that has stepped off the board can still
/// be represented and rejected by the bounds check.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Cell {
    pub column: i32,
    pub row: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.delta();
        Self {
            column: self.column + dc,
            row: self.row + dr,
        }
    }
}

/// Square board geometry derived from a validated configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridGeometry {
    cells: u16,
    board_size: u32,
}

impl GridGeometry {
    /// Callers must have checked that `cells` divides `board_size` exactly;
    /// see [`crate::config::GameConfig::validate`].
    pub(crate) fn new(cells: u16, board_size: u32) -> Self {
        debug_assert!(cells > 0 && board_size % u32::from(cells) == 0);
        Self { cells, board_size }
    }

    /// Number of cells along one side.
    #[must_use]
    pub fn cells(self) -> u16 {
        self.cells
    }

    /// Side length of one cell in pixels.
    #[must_use]
    pub fn cell_size(self) -> u32 {
        self.board_size / u32::from(self.cells)
    }

    /// Total number of cells on the board.
    #[must_use]
    pub fn capacity(self) -> usize {
        usize::from(self.cells) * usize::from(self.cells)
    }

    /// Returns true when the cell lies inside the board.
    #[must_use]
    pub fn is_in_bounds(self, cell: Cell) -> bool {
        let upper = i32::from(self.cells);
        cell.column >= 0 && cell.row >= 0 && cell.column < upper && cell.row < upper
    }

    /// Every valid coordinate, ordered column-major.
    #[must_use]
    pub fn all_cells(self) -> BTreeSet<Cell> {
        let upper = i32::from(self.cells);
        (0..upper)
            .flat_map(|column| (0..upper).map(move |row| Cell::new(column, row)))
            .collect()
    }

    /// Top-left pixel of `cell`, or `None` when it is off the board.
    #[must_use]
    pub fn pixel_origin(self, cell: Cell) -> Option<(u32, u32)> {
        if !self.is_in_bounds(cell) {
            return None;
        }

        let size = self.cell_size();
        let column = u32::try_from(cell.column).ok()?;
        let row = u32::try_from(cell.row).ok()?;
        Some((column * size, row * size))
    }
}
