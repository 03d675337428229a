//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Grid Dimensions
//!
//! The playfield is addressed by `(primary, secondary)`:
//!
//! - **Primary**: 16 columns (indexed 0-15), the axis pieces fall along
//! - **Secondary**: 8 rows (indexed 0-7), the lateral axis
//! - **Spawn origin**: (0, 4)
//!
//! # Orientation
//!
//! A piece orientation is a pair of a quarter-turn count ([`Rot4`]) and a
//! reflection flag ([`Flip2`]), giving eight distinct linear transforms.
//!
//! # Examples
//!
//! ```
//! use polydrop_types::{Flip2, Orientation, Rot4, Shape, COLLS, ROWS};
//!
//! let shape = Shape::from_str("long").unwrap();
//! assert_eq!(shape, Shape::Long);
//!
//! // Raw indices are reduced modulo 4 / modulo 2.
//! assert_eq!(Rot4::from_index(5), Rot4::R90);
//! assert_eq!(Flip2::from_index(3), Flip2::Mirrored);
//!
//! let o = Orientation::new(Rot4::R270, Flip2::Identity);
//! assert_eq!(o.rot.next(), Rot4::R0);
//!
//! assert_eq!(COLLS, 16);
//! assert_eq!(ROWS, 8);
//! ```

/// Grid length along the primary (gravity) axis.
pub const COLLS: u8 = 16;

/// Grid length along the secondary (lateral) axis.
pub const ROWS: u8 = 8;

/// Upper bound on the number of cells in a catalogue shape.
pub const MAX_CELLS: usize = 5;

/// Fixed tick interval in milliseconds.
pub const TICK_MS: u32 = 500;

/// Origin every new piece is spawned at.
pub const SPAWN_ORIGIN: CellPos = (0, (ROWS / 2) as i8);

/// Default number of random draws a spawn may make before the game is blocked.
pub const SPAWN_ATTEMPTS: u8 = 8;

/// Absolute grid coordinate as `(primary, secondary)`.
pub type CellPos = (i8, i8);

/// Shape-local offset as `(du, dv)`.
pub type Offset = (i8, i8);

/// The four catalogue shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Straight four-cell bar
    Long,
    T,
    L,
    Z,
}

impl Shape {
    /// Every shape, in catalogue order.
    pub const ALL: [Shape; 4] = [Shape::Long, Shape::T, Shape::L, Shape::Z];

    /// Position of the shape in [`Shape::ALL`].
    pub fn index(self) -> usize {
        match self {
            Shape::Long => 0,
            Shape::T => 1,
            Shape::L => 2,
            Shape::Z => 3,
        }
    }

    /// Shape at `index`, reduced modulo the catalogue size.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use polydrop_types::Shape;
    ///
    /// assert_eq!(Shape::from_str("t"), Some(Shape::T));
    /// assert_eq!(Shape::from_str("Z"), Some(Shape::Z));
    /// assert_eq!(Shape::from_str("i"), Some(Shape::Long));
    /// assert_eq!(Shape::from_str("o"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "long" | "i" => Some(Shape::Long),
            "t" => Some(Shape::T),
            "l" => Some(Shape::L),
            "z" => Some(Shape::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Long => "long",
            Shape::T => "t",
            Shape::L => "l",
            Shape::Z => "z",
        }
    }
}

/// In-plane rotation by quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rot4 {
    R0,
    R90,
    R180,
    R270,
}

impl Rot4 {
    pub const ALL: [Rot4; 4] = [Rot4::R0, Rot4::R90, Rot4::R180, Rot4::R270];

    /// Rotation for a raw quarter-turn count (taken modulo 4).
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    /// Number of quarter turns (0..=3).
    pub fn index(self) -> u8 {
        match self {
            Rot4::R0 => 0,
            Rot4::R90 => 1,
            Rot4::R180 => 2,
            Rot4::R270 => 3,
        }
    }

    /// Next quarter turn, wrapping after `R270`.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// Reflection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flip2 {
    Identity,
    Mirrored,
}

impl Flip2 {
    pub const ALL: [Flip2; 2] = [Flip2::Identity, Flip2::Mirrored];

    /// Reflection for a raw index (taken modulo 2).
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % 2) as usize]
    }

    pub fn index(self) -> u8 {
        match self {
            Flip2::Identity => 0,
            Flip2::Mirrored => 1,
        }
    }

    pub fn toggled(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// A (rotation, reflection) pair selecting one of eight linear transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
    pub rot: Rot4,
    pub flip: Flip2,
}

impl Orientation {
    /// The untransformed orientation.
    pub const IDENTITY: Orientation = Orientation {
        rot: Rot4::R0,
        flip: Flip2::Identity,
    };

    pub fn new(rot: Rot4, flip: Flip2) -> Self {
        Self { rot, flip }
    }

    /// Build from raw `(rot4, flip2)` indices.
    pub fn from_indices(rot4: u8, flip2: u8) -> Self {
        Self::new(Rot4::from_index(rot4), Flip2::from_index(flip2))
    }

    /// All eight orientations, rotation-major.
    pub fn all() -> [Orientation; 8] {
        let mut out = [Orientation::IDENTITY; 8];
        for (i, rot) in Rot4::ALL.iter().enumerate() {
            for (j, flip) in Flip2::ALL.iter().enumerate() {
                out[i * 2 + j] = Orientation::new(*rot, *flip);
            }
        }
        out
    }

    pub fn with_rot(self, rot: Rot4) -> Self {
        Self { rot, ..self }
    }

    pub fn with_flip(self, flip: Flip2) -> Self {
        Self { flip, ..self }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Movement direction for the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// One step along gravity (primary + 1)
    Fall,
    /// One step against gravity (primary - 1)
    Rise,
    /// Secondary - 1
    Left,
    /// Secondary + 1
    Right,
}

impl Direction {
    /// `(primary, secondary)` delta of one step.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Fall => (1, 0),
            Direction::Rise => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Game actions delivered by an input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Move(Direction),
    RotateInPlane,
    RotateFlip,
    /// Swap the live piece's shape in place
    SelectShape(Shape),
    Restart,
}
