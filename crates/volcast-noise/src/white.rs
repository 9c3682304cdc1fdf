//! Hashed white noise.
//!
//! A lookup table of random values indexed through three independent
//! permutations. The table is built once from a seed; lookups never touch
//! the RNG again.

use std::fmt;
use std::sync::Arc;

use crate::rng::DeterministicRng;

/// Number of entries in the value table.
pub const TABLE_SIZE: usize = 256;

/// Per-axis hash multipliers (distinct primes).
const HASH_X: usize = 7907;
const HASH_Y: usize = 3323;
const HASH_Z: usize = 5323;

struct Tables {
    values: [f64; TABLE_SIZE],
    perm_x: [u8; 256],
    perm_y: [u8; 256],
    perm_z: [u8; 256],
}

/// Deterministic pseudo-random scalar field with values in [-1, 1).
///
/// Cloning is cheap: clones share the same backing tables.
#[derive(Clone)]
pub struct WhiteNoise {
    tables: Arc<Tables>,
    seed: u32,
}

impl WhiteNoise {
    /// Build the value table and the three permutations from `seed`.
    pub fn new(seed: u32) -> Self {
        let mut rng = DeterministicRng::new(seed);

        let mut values = [0.0; TABLE_SIZE];
        for v in values.iter_mut() {
            *v = rng.gen_signed_f64();
        }
        let perm_x = rng.permutation_u8();
        let perm_y = rng.permutation_u8();
        let perm_z = rng.permutation_u8();

        tracing::debug!(seed, "white noise tables generated");

        Self {
            tables: Arc::new(Tables {
                values,
                perm_x,
                perm_y,
                perm_z,
            }),
            seed,
        }
    }

    /// Low 8 bits of `floor(255 * coord)`.
    #[inline]
    fn lower_bits(coord: f64) -> usize {
        // `as i64` saturates, so NaN and infinities still land in the table.
        ((255.0 * coord).floor() as i64 & 0xff) as usize
    }

    /// Pseudo-random value for a coordinate triple.
    #[inline]
    pub fn value(&self, x: f64, y: f64, z: f64) -> f64 {
        let t = &*self.tables;
        let hash = HASH_X * t.perm_x[Self::lower_bits(x)] as usize
            + HASH_Y * t.perm_y[Self::lower_bits(y)] as usize
            + HASH_Z * t.perm_z[Self::lower_bits(z)] as usize;
        t.values[hash % TABLE_SIZE]
    }
}

impl fmt::Debug for WhiteNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhiteNoise").field("seed", &self.seed).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeatable_within_instance() {
        let noise = WhiteNoise::new(42);
        for i in 0..200 {
            let x = i as f64 * 0.37 - 20.0;
            let y = i as f64 * 0.11;
            let z = -(i as f64) * 0.53;
            assert_eq!(noise.value(x, y, z), noise.value(x, y, z));
        }
    }

    #[test]
    fn test_same_seed_same_table() {
        let a = WhiteNoise::new(9);
        let b = WhiteNoise::new(9);
        for i in 0..100 {
            let c = i as f64 * 0.013;
            assert_eq!(a.value(c, c * 2.0, c * 3.0), b.value(c, c * 2.0, c * 3.0));
        }
    }

    #[test]
    fn test_values_in_range() {
        let noise = WhiteNoise::new(3);
        for i in 0..1000 {
            let v = noise.value(i as f64 * 0.01, i as f64 * 0.02, i as f64 * 0.03);
            assert!((-1.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_lower_bits_wraps_negative() {
        assert_eq!(WhiteNoise::lower_bits(0.0), 0);
        assert_eq!(WhiteNoise::lower_bits(1.0), 255);
        assert_eq!(WhiteNoise::lower_bits(-0.5 / 255.0), 255);
    }

    #[test]
    fn test_non_finite_inputs_are_total() {
        let noise = WhiteNoise::new(5);
        assert!(noise.value(f64::NAN, 0.0, 0.0).is_finite());
        assert!(noise.value(f64::INFINITY, f64::NEG_INFINITY, 1.0).is_finite());
    }

    #[test]
    fn test_clones_share_tables() {
        let noise = WhiteNoise::new(11);
        let clone = noise.clone();
        assert!(Arc::ptr_eq(&noise.tables, &clone.tables));
    }
}
