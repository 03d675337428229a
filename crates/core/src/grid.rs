//! Grid module - the occupancy matrix of locked cells
//!
//! The grid is a 16x8 boolean matrix. Uses a flat array for cache locality and
//! zero-allocation.
//! Coordinates: (primary, secondary) where primary ranges 0..15 along gravity and
//! secondary ranges 0..7 laterally. Storage is column-major: one column is the
//! `ROWS` cells sharing a primary index, so collapsing columns is a single
//! `copy_within`.
//!
//! Reads and writes treat the primary axis differently: [`Grid::is_occupied`]
//! reduces primary modulo `COLLS`, while [`Grid::set_occupied`] ignores anything
//! outside the grid.

use arrayvec::ArrayVec;

use crate::types::{COLLS, ROWS};

/// Total number of cells on the grid
const GRID_SIZE: usize = COLLS as usize * ROWS as usize;

const COLUMN_LEN: usize = ROWS as usize;

/// Column indices removed by one sweep, in removal order.
pub type ClearedColumns = ArrayVec<u8, { COLLS as usize }>;

/// The occupancy grid - 16 columns x 8 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, column-major order (primary * ROWS + secondary)
    cells: [bool; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [false; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(primary: usize, secondary: usize) -> usize {
        primary * COLUMN_LEN + secondary
    }

    pub fn colls(&self) -> u8 {
        COLLS
    }

    pub fn rows(&self) -> u8 {
        ROWS
    }

    /// Check whether a cell blocks placement.
    ///
    /// Secondary outside `0..ROWS` always counts as occupied. Primary is reduced
    /// modulo `COLLS` (Euclidean), so `is_occupied(COLLS, s) == is_occupied(0, s)`
    /// and `is_occupied(-1, s) == is_occupied(COLLS - 1, s)`.
    pub fn is_occupied(&self, primary: i8, secondary: i8) -> bool {
        if secondary < 0 || secondary >= ROWS as i8 {
            return true;
        }
        let p = primary.rem_euclid(COLLS as i8) as usize;
        self.cells[Self::index(p, secondary as usize)]
    }

    /// Mark a cell occupied.
    /// Returns false (and writes nothing) if the cell lies outside the grid;
    /// unlike the read path, primary does not wrap.
    pub fn set_occupied(&mut self, primary: i8, secondary: i8) -> bool {
        if primary < 0 || primary >= COLLS as i8 || secondary < 0 || secondary >= ROWS as i8 {
            return false;
        }
        self.cells[Self::index(primary as usize, secondary as usize)] = true;
        true
    }

    /// Cells of one column, indexed by secondary. None past the last column.
    pub fn column(&self, primary: usize) -> Option<&[bool]> {
        if primary >= COLLS as usize {
            return None;
        }
        let start = Self::index(primary, 0);
        Some(&self.cells[start..start + COLUMN_LEN])
    }

    /// Check if every secondary position of a column is blocked
    pub fn is_column_full(&self, primary: usize) -> bool {
        if primary >= COLLS as usize {
            return false;
        }
        let blocked = (0..ROWS as i8)
            .filter(|&s| self.is_occupied(primary as i8, s))
            .count();
        blocked == COLUMN_LEN
    }

    /// Empty one column
    pub fn clear_column(&mut self, primary: usize) {
        if primary >= COLLS as usize {
            return;
        }
        let start = Self::index(primary, 0);
        self.cells[start..start + COLUMN_LEN].fill(false);
    }

    /// Remove column `full` by shifting every column in `0..full` one step toward
    /// it, then empty column 0.
    pub fn collapse_into(&mut self, full: usize) {
        if full >= COLLS as usize {
            return;
        }
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..full * COLUMN_LEN, COLUMN_LEN);
        self.clear_column(0);
    }

    /// Remove all full columns, scanning from the far end toward the origin.
    ///
    /// After a collapse the same index is tested again, so consecutive full
    /// columns cascade within a single call. Returns the removed indices in
    /// removal order (a cascade reports the same index more than once).
    pub fn sweep(&mut self) -> ClearedColumns {
        let mut cleared = ClearedColumns::new();
        let mut c = COLLS as usize;
        while c != 0 {
            if self.is_column_full(c - 1) {
                self.collapse_into(c - 1);
                // Each collapse removes ROWS occupied cells, so this cannot exceed COLLS.
                let _ = cleared.try_push((c - 1) as u8);
                continue;
            }
            c -= 1;
        }
        cleared
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Export into a `[primary][secondary]` matrix.
    pub fn write_bool_grid(&self, out: &mut [[bool; ROWS as usize]; COLLS as usize]) {
        for (column, src) in out.iter_mut().zip(self.cells.chunks_exact(COLUMN_LEN)) {
            column.copy_from_slice(src);
        }
    }

    /// Build a grid from a `[primary][secondary]` matrix.
    pub fn from_bool_grid(grid: &[[bool; ROWS as usize]; COLLS as usize]) -> Self {
        let mut out = Self::new();
        for (p, column) in grid.iter().enumerate() {
            let start = Self::index(p, 0);
            out.cells[start..start + COLUMN_LEN].copy_from_slice(column);
        }
        out
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
