//! Shapes module - the immutable shape catalogue
//!
//! Each shape is a count-prefixed table of cell offsets relative to a local
//! origin. Tables are `'static`; lookup never allocates.

use crate::types::{Offset, Shape, MAX_CELLS};

/// Count-prefixed offset table for one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeTable {
    count: u8,
    offsets: [Offset; MAX_CELLS],
}

impl ShapeTable {
    /// Number of cells in the shape.
    pub const fn count(&self) -> usize {
        self.count as usize
    }

    /// The offsets, in table order.
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets[..self.count as usize]
    }
}

static LONG: ShapeTable = ShapeTable {
    count: 4,
    offsets: [(2, 0), (1, 0), (0, 0), (-1, 0), (0, 0)],
};

static T: ShapeTable = ShapeTable {
    count: 4,
    offsets: [(0, 0), (1, 0), (-1, 0), (0, 1), (0, 0)],
};

static L: ShapeTable = ShapeTable {
    count: 4,
    offsets: [(-1, 0), (0, 0), (1, 0), (-1, 1), (0, 0)],
};

static Z: ShapeTable = ShapeTable {
    count: 4,
    offsets: [(-1, 0), (0, 0), (0, 1), (1, 1), (0, 0)],
};

/// Get the offset table for a shape
pub fn shape_table(shape: Shape) -> &'static ShapeTable {
    match shape {
        Shape::Long => &LONG,
        Shape::T => &T,
        Shape::L => &L,
        Shape::Z => &Z,
    }
}
