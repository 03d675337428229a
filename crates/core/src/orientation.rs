//! Orientation module - integer linear transforms of shape offsets
//!
//! The eight orientations are generated rather than tabulated: a rotation is a
//! power of the quarter turn `(u, v) -> (-v, u)` and a reflection negates `v`.
//! An orientation applies the reflection first, then the rotation.

use arrayvec::ArrayVec;

use crate::shapes::shape_table;
use crate::types::{Flip2, Offset, Orientation, Rot4, Shape, MAX_CELLS};

/// Transformed offsets of one shape, in table order.
pub type Offsets = ArrayVec<Offset, MAX_CELLS>;

/// 2x2 integer matrix acting on `(u, v)` column vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Linear2 {
    m: [[i8; 2]; 2],
}

impl Linear2 {
    pub const IDENTITY: Linear2 = Linear2 {
        m: [[1, 0], [0, 1]],
    };

    /// Counter-clockwise quarter turn.
    pub const QUARTER_TURN: Linear2 = Linear2 {
        m: [[0, -1], [1, 0]],
    };

    /// Reflection across the `u` axis.
    pub const AXIS_FLIP: Linear2 = Linear2 {
        m: [[1, 0], [0, -1]],
    };

    pub fn rotation(rot: Rot4) -> Self {
        (0..rot.index()).fold(Self::IDENTITY, |acc, _| Self::QUARTER_TURN.compose(acc))
    }

    pub fn reflection(flip: Flip2) -> Self {
        match flip {
            Flip2::Identity => Self::IDENTITY,
            Flip2::Mirrored => Self::AXIS_FLIP,
        }
    }

    /// Rotation after reflection.
    pub fn for_orientation(orientation: Orientation) -> Self {
        Self::rotation(orientation.rot).compose(Self::reflection(orientation.flip))
    }

    /// Matrix product `self * rhs` (apply `rhs` first).
    pub fn compose(self, rhs: Linear2) -> Self {
        let a = self.m;
        let b = rhs.m;
        let mut m = [[0i8; 2]; 2];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j];
            }
        }
        Self { m }
    }

    pub fn apply(&self, (u, v): Offset) -> Offset {
        (
            self.m[0][0] * u + self.m[0][1] * v,
            self.m[1][0] * u + self.m[1][1] * v,
        )
    }

    pub fn matrix(&self) -> [[i8; 2]; 2] {
        self.m
    }
}

/// Offsets of `shape` under `orientation`, in table order.
pub fn transformed_offsets(shape: Shape, orientation: Orientation) -> Offsets {
    let linear = Linear2::for_orientation(orientation);
    shape_table(shape)
        .offsets()
        .iter()
        .map(|&off| linear.apply(off))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_powers() {
        assert_eq!(Linear2::rotation(Rot4::R0), Linear2::IDENTITY);
        assert_eq!(Linear2::rotation(Rot4::R90).matrix(), [[0, -1], [1, 0]]);
        assert_eq!(Linear2::rotation(Rot4::R180).matrix(), [[-1, 0], [0, -1]]);
        assert_eq!(Linear2::rotation(Rot4::R270).matrix(), [[0, 1], [-1, 0]]);
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        let full = Linear2::rotation(Rot4::R90)
            .compose(Linear2::rotation(Rot4::R270));
        assert_eq!(full, Linear2::IDENTITY);
    }

    #[test]
    fn flip_applies_before_rotation() {
        let o = Orientation::new(Rot4::R90, Flip2::Mirrored);
        // (1, 1) -> flip (1, -1) -> quarter turn (1, 1)
        assert_eq!(Linear2::for_orientation(o).apply((1, 1)), (1, 1));
        // (0, 1) -> flip (0, -1) -> quarter turn (1, 0)
        assert_eq!(Linear2::for_orientation(o).apply((0, 1)), (1, 0));
    }

    #[test]
    fn all_eight_transforms_are_distinct() {
        let all = Orientation::all();
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                assert_ne!(
                    Linear2::for_orientation(all[i]),
                    Linear2::for_orientation(all[j])
                );
            }
        }
    }

    #[test]
    fn transform_is_referentially_transparent() {
        for shape in Shape::ALL {
            for o in Orientation::all() {
                assert_eq!(transformed_offsets(shape, o), transformed_offsets(shape, o));
            }
        }
    }
}
