use std::collections::{BTreeSet, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grid::Cell;

/// Source of the random choice used for food placement.
pub trait CellPicker {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Uniform picker backed by a standard RNG.
#[derive(Debug, Clone)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    /// Seeds from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a deterministic picker for tests and reproducible games.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl CellPicker for RandomPicker {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Food {
    pub position: Option<Cell>,
}

impl Food {
    /// Creates food at a fixed cell.
    #[must_use]
    pub fn at(position: Cell) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// Moves the food to a random cell of `all_cells` not in `occupied`.
    ///
    /// Returns the new position, or `None` (and clears the food) when every
    /// cell is taken.
    pub fn place<P: CellPicker + ?Sized>(
        &mut self,
        occupied: &HashSet<Cell>,
        all_cells: &BTreeSet<Cell>,
        picker: &mut P,
    ) -> Option<Cell> {
        let free: Vec<Cell> = all_cells
            .iter()
            .filter(|cell| !occupied.contains(*cell))
            .copied()
            .collect();

        self.position = if free.is_empty() {
            None
        } else {
            let index = picker.pick_index(free.len()).min(free.len() - 1);
            Some(free[index])
        };

        log::debug!(
            "food placed at {:?} ({} free cells)",
            self.position,
            free.len()
        );
        self.position
    }

    /// Returns true when the food sits on `cell`.
    #[must_use]
    pub fn is_at(self, cell: Cell) -> bool {
        self.position == Some(cell)
    }
}
