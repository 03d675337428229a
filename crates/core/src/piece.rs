//! Piece module - the live piece and its transitions
//!
//! An [`ActivePiece`] can only be constructed from a validated placement, and
//! every transition re-validates before committing. A rejected transition
//! leaves the shape, orientation, origin and cached cells untouched.

use crate::grid::Grid;
use crate::placement::{try_place, Footprint, PrimaryBounds};
use crate::types::{CellPos, Flip2, Orientation, Rot4, Shape, SPAWN_ORIGIN};

/// Shape, origin and orientation of a piece, without its cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceDescriptor {
    pub shape: Shape,
    pub origin: CellPos,
    pub orientation: Orientation,
}

impl PieceDescriptor {
    pub fn rot(&self) -> Rot4 {
        self.orientation.rot
    }

    pub fn flip(&self) -> Flip2 {
        self.orientation.flip
    }
}

/// Live falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    shape: Shape,
    orientation: Orientation,
    origin: CellPos,
    /// Cells of the last validated placement
    cells: Footprint,
}

impl ActivePiece {
    /// Place a piece, or None if the placement is rejected
    pub fn place(
        grid: &Grid,
        shape: Shape,
        origin: CellPos,
        orientation: Orientation,
        bounds: PrimaryBounds,
    ) -> Option<Self> {
        let cells = try_place(grid, shape, origin, orientation, bounds)?;
        Some(Self {
            shape,
            orientation,
            origin,
            cells,
        })
    }

    /// Place a piece at the spawn origin
    pub fn spawn(
        grid: &Grid,
        shape: Shape,
        orientation: Orientation,
        bounds: PrimaryBounds,
    ) -> Option<Self> {
        Self::place(grid, shape, SPAWN_ORIGIN, orientation, bounds)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn origin(&self) -> CellPos {
        self.origin
    }

    /// Absolute cells, in shape-table order
    pub fn cells(&self) -> &[CellPos] {
        &self.cells
    }

    pub fn descriptor(&self) -> PieceDescriptor {
        PieceDescriptor {
            shape: self.shape,
            origin: self.origin,
            orientation: self.orientation,
        }
    }

    /// Try a full replacement of shape, origin and orientation; commit on success.
    fn try_commit(
        &mut self,
        grid: &Grid,
        shape: Shape,
        origin: CellPos,
        orientation: Orientation,
        bounds: PrimaryBounds,
    ) -> bool {
        match try_place(grid, shape, origin, orientation, bounds) {
            Some(cells) => {
                self.shape = shape;
                self.origin = origin;
                self.orientation = orientation;
                self.cells = cells;
                true
            }
            None => false,
        }
    }

    /// Move to a new origin with the current orientation
    pub fn move_to(&mut self, grid: &Grid, origin: CellPos, bounds: PrimaryBounds) -> bool {
        self.try_commit(grid, self.shape, origin, self.orientation, bounds)
    }

    /// Move by a `(primary, secondary)` delta
    pub fn move_by(&mut self, grid: &Grid, delta: (i8, i8), bounds: PrimaryBounds) -> bool {
        match (
            self.origin.0.checked_add(delta.0),
            self.origin.1.checked_add(delta.1),
        ) {
            (Some(p), Some(s)) => self.move_to(grid, (p, s), bounds),
            _ => false,
        }
    }

    /// Change the in-plane rotation, keeping origin and reflection. No kicks.
    pub fn rotate_in_plane(&mut self, grid: &Grid, rot: Rot4, bounds: PrimaryBounds) -> bool {
        let orientation = self.orientation.with_rot(rot);
        self.try_commit(grid, self.shape, self.origin, orientation, bounds)
    }

    /// Change the reflection, keeping origin and rotation. No kicks.
    pub fn rotate_flip(&mut self, grid: &Grid, flip: Flip2, bounds: PrimaryBounds) -> bool {
        let orientation = self.orientation.with_flip(flip);
        self.try_commit(grid, self.shape, self.origin, orientation, bounds)
    }

    /// Swap the shape in place, keeping origin and orientation.
    pub fn reshape(&mut self, grid: &Grid, shape: Shape, bounds: PrimaryBounds) -> bool {
        self.try_commit(grid, shape, self.origin, self.orientation, bounds)
    }

    /// Origin one step along gravity, if representable
    pub fn advanced_origin(&self) -> Option<CellPos> {
        Some((self.origin.0.checked_add(1)?, self.origin.1))
    }

    /// Check if the piece could advance one step along gravity (never commits)
    pub fn can_advance(&self, grid: &Grid, bounds: PrimaryBounds) -> bool {
        match self.advanced_origin() {
            Some(origin) => try_place(grid, self.shape, origin, self.orientation, bounds).is_some(),
            None => false,
        }
    }

    /// Write every cell into the grid.
    /// Returns how many cells landed inside the grid.
    pub fn lock_into(&self, grid: &mut Grid) -> usize {
        self.cells
            .iter()
            .filter(|&&(p, s)| grid.set_occupied(p, s))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_long(grid: &Grid) -> ActivePiece {
        ActivePiece::spawn(grid, Shape::Long, Orientation::IDENTITY, PrimaryBounds::Floor)
            .expect("spawn fits on an empty grid")
    }

    #[test]
    fn test_spawn_caches_cells() {
        let grid = Grid::new();
        let piece = spawn_long(&grid);
        assert_eq!(piece.origin(), (0, 4));
        assert_eq!(piece.cells(), &[(2, 4), (1, 4), (0, 4), (-1, 4)]);
    }

    #[test]
    fn test_move_commits_on_success() {
        let grid = Grid::new();
        let mut piece = spawn_long(&grid);
        assert!(piece.move_to(&grid, (3, 2), PrimaryBounds::Floor));
        assert_eq!(piece.origin(), (3, 2));
        assert_eq!(piece.cells(), &[(5, 2), (4, 2), (3, 2), (2, 2)]);
    }

    #[test]
    fn test_move_rejected_leaves_piece_unchanged() {
        let mut grid = Grid::new();
        grid.set_occupied(4, 4);
        let mut piece = spawn_long(&grid);
        let before = piece.clone();

        assert!(!piece.move_to(&grid, (2, 4), PrimaryBounds::Floor));
        assert!(!piece.move_by(&grid, (0, 8), PrimaryBounds::Floor));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_rotate_in_plane_blocked_by_stack() {
        let mut grid = Grid::new();
        let mut piece = spawn_long(&grid);
        assert!(piece.move_to(&grid, (5, 4), PrimaryBounds::Floor));
        // Quarter turn puts cells at secondary 3..=6 on primary 5.
        grid.set_occupied(5, 6);
        let before = piece.clone();

        assert!(!piece.rotate_in_plane(&grid, Rot4::R90, PrimaryBounds::Floor));
        assert_eq!(piece, before);

        assert!(piece.rotate_in_plane(&grid, Rot4::R270, PrimaryBounds::Floor));
        assert_eq!(piece.orientation().rot, Rot4::R270);
        assert_eq!(piece.cells(), &[(5, 2), (5, 3), (5, 4), (5, 5)]);
    }

    #[test]
    fn test_rotate_flip_keeps_rotation() {
        let grid = Grid::new();
        let mut piece =
            ActivePiece::place(&grid, Shape::T, (5, 4), Orientation::IDENTITY, PrimaryBounds::Floor)
                .unwrap();
        assert!(piece.rotate_flip(&grid, Flip2::Mirrored, PrimaryBounds::Floor));
        assert_eq!(piece.orientation(), Orientation::new(Rot4::R0, Flip2::Mirrored));
        assert_eq!(piece.cells(), &[(5, 4), (6, 4), (4, 4), (5, 3)]);
    }

    #[test]
    fn test_can_advance_does_not_commit() {
        let grid = Grid::new();
        let mut piece = spawn_long(&grid);
        assert!(piece.can_advance(&grid, PrimaryBounds::Floor));
        assert_eq!(piece.origin(), (0, 4));

        assert!(piece.move_to(&grid, (13, 4), PrimaryBounds::Floor));
        assert!(!piece.can_advance(&grid, PrimaryBounds::Floor));
    }

    #[test]
    fn test_lock_skips_cells_outside_grid() {
        let mut grid = Grid::new();
        let piece = spawn_long(&grid);
        // (-1, 4) is above the grid and is not written.
        assert_eq!(piece.lock_into(&mut grid), 3);
        assert!(grid.is_occupied(0, 4));
        assert!(grid.is_occupied(2, 4));
        assert!(!grid.is_occupied(15, 4));
    }

    #[test]
    fn test_reshape_validates() {
        let mut grid = Grid::new();
        let mut piece =
            ActivePiece::place(&grid, Shape::T, (5, 4), Orientation::IDENTITY, PrimaryBounds::Floor)
                .unwrap();
        // Z needs (6, 5), which is blocked.
        grid.set_occupied(6, 5);
        assert!(!piece.reshape(&grid, Shape::Z, PrimaryBounds::Floor));
        assert_eq!(piece.shape(), Shape::T);
        assert!(piece.reshape(&grid, Shape::Long, PrimaryBounds::Floor));
        assert_eq!(piece.shape(), Shape::Long);
    }
}
