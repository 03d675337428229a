//! Placement module - the fit/validity predicate and projection
//!
//! Every piece motion goes through [`try_place`]: it projects a shape at an
//! origin and orientation onto absolute cells and rejects the whole placement
//! if any cell is blocked. It never writes to the grid, and a rejected
//! placement produces no cells at all.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::orientation::transformed_offsets;
use crate::types::{CellPos, Orientation, Shape, COLLS, MAX_CELLS, ROWS};

/// Absolute cells of a validated placement, in shape-table order.
pub type Footprint = ArrayVec<CellPos, MAX_CELLS>;

/// How the placement check treats the primary axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimaryBounds {
    /// Cells at primary >= COLLS are out of bounds, so pieces land on the far
    /// column. Negative primaries still read through the wrapping grid lookup.
    #[default]
    Floor,
    /// Primary is only checked through [`Grid::is_occupied`], which wraps.
    Wrap,
}

impl PrimaryBounds {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "floor" => Some(PrimaryBounds::Floor),
            "wrap" => Some(PrimaryBounds::Wrap),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryBounds::Floor => "floor",
            PrimaryBounds::Wrap => "wrap",
        }
    }
}

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    /// The cell is already occupied on the grid.
    Blocked { cell: CellPos },
    /// The cell lies outside the secondary range, past the floor, or beyond the
    /// coordinate range.
    OutOfBounds { cell: CellPos },
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::Blocked { .. } => "blocked",
            PlaceError::OutOfBounds { .. } => "out_of_bounds",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::Blocked { .. } => "placement overlaps a locked cell",
            PlaceError::OutOfBounds { .. } => "placement leaves the grid",
        }
    }

    /// The first offending cell.
    pub fn cell(self) -> CellPos {
        match self {
            PlaceError::Blocked { cell } | PlaceError::OutOfBounds { cell } => cell,
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (p, s) = self.cell();
        write!(f, "{} at ({}, {})", self.message(), p, s)
    }
}

impl std::error::Error for PlaceError {}

/// Check a single absolute cell.
pub fn check_cell(grid: &Grid, cell: CellPos, bounds: PrimaryBounds) -> Result<(), PlaceError> {
    let (p, s) = cell;
    if s < 0 || s >= ROWS as i8 {
        return Err(PlaceError::OutOfBounds { cell });
    }
    if bounds == PrimaryBounds::Floor && p >= COLLS as i8 {
        return Err(PlaceError::OutOfBounds { cell });
    }
    if grid.is_occupied(p, s) {
        return Err(PlaceError::Blocked { cell });
    }
    Ok(())
}

/// Project and validate a placement, reporting the first offending cell.
pub fn check_place(
    grid: &Grid,
    shape: Shape,
    origin: CellPos,
    orientation: Orientation,
    bounds: PrimaryBounds,
) -> Result<Footprint, PlaceError> {
    let mut cells = Footprint::new();
    for (du, dv) in transformed_offsets(shape, orientation) {
        let cell = match (origin.0.checked_add(du), origin.1.checked_add(dv)) {
            (Some(p), Some(s)) => (p, s),
            _ => {
                return Err(PlaceError::OutOfBounds {
                    cell: (origin.0.saturating_add(du), origin.1.saturating_add(dv)),
                })
            }
        };
        check_cell(grid, cell, bounds)?;
        cells.push(cell);
    }
    Ok(cells)
}

/// Project and validate a placement.
/// Returns None if any cell is blocked or out of bounds.
pub fn try_place(
    grid: &Grid,
    shape: Shape,
    origin: CellPos,
    orientation: Orientation,
    bounds: PrimaryBounds,
) -> Option<Footprint> {
    check_place(grid, shape, origin, orientation, bounds).ok()
}

/// Check if a placement fits without producing its cells
pub fn fits(
    grid: &Grid,
    shape: Shape,
    origin: CellPos,
    orientation: Orientation,
    bounds: PrimaryBounds,
) -> bool {
    check_place(grid, shape, origin, orientation, bounds).is_ok()
}
