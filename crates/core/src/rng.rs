//! RNG module - deterministic spawn draws
//!
//! Each spawn draws a shape uniformly from the catalogue, a rotation uniformly
//! from the four quarter turns and a reflection uniformly from the two flips.
//! A simple LCG keeps games reproducible from a seed.

use crate::types::{Flip2, Orientation, Rot4, Shape};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales the whole 32-bit output instead of taking `% max`; the low bits of
    /// a power-of-two LCG have very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// One random spawn choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnDraw {
    pub shape: Shape,
    pub orientation: Orientation,
}

impl SpawnDraw {
    /// Draw shape, rotation and reflection, in that order.
    pub fn draw(rng: &mut SimpleRng) -> Self {
        let shape = Shape::ALL[rng.next_range(Shape::ALL.len() as u32) as usize];
        let rot = Rot4::from_index(rng.next_range(4) as u8);
        let flip = Flip2::from_index(rng.next_range(2) as u8);
        Self {
            shape,
            orientation: Orientation::new(rot, flip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        let first = rng.next_u32();
        assert_ne!(first, 0);
        assert_eq!(first, one.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in [1u32, 2, 3, 4, 16] {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_spawn_draw_covers_catalogue_and_orientations() {
        let mut rng = SimpleRng::new(1);
        let mut shapes = [0usize; 4];
        let mut rots = [0usize; 4];
        let mut flips = [0usize; 2];

        for _ in 0..4000 {
            let d = SpawnDraw::draw(&mut rng);
            shapes[d.shape.index()] += 1;
            rots[d.orientation.rot.index() as usize] += 1;
            flips[d.orientation.flip.index() as usize] += 1;
        }

        // Roughly uniform: every bucket within 30% of its expectation.
        for n in shapes.iter().chain(rots.iter()) {
            assert!(*n > 700 && *n < 1300, "skewed bucket: {}", n);
        }
        for n in flips {
            assert!(n > 1400 && n < 2600, "skewed flip bucket: {}", n);
        }
    }

    #[test]
    fn test_spawn_draw_does_not_cycle_with_short_period() {
        let mut rng = SimpleRng::new(99);
        let draws: Vec<SpawnDraw> = (0..32).map(|_| SpawnDraw::draw(&mut rng)).collect();
        assert!(draws[..4] != draws[4..8] || draws[4..8] != draws[8..12]);
    }
}
