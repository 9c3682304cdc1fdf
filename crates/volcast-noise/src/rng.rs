//! Deterministic RNG wrapper using PCG32.
//!
//! Every noise table in volcast is generated through this module so that a
//! seed fully determines the resulting field.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Wrapper around PCG32 for deterministic random number generation.
#[derive(Clone)]
pub struct DeterministicRng {
    inner: Pcg32,
}

impl DeterministicRng {
    /// Create a new RNG from a 32-bit seed.
    ///
    /// The seed is expanded to 64 bits by duplicating its bits.
    pub fn new(seed: u32) -> Self {
        let seed64 = (seed as u64) | ((seed as u64) << 32);
        Self {
            inner: Pcg32::seed_from_u64(seed64),
        }
    }

    /// Derive an independent seed for a named sub-generator using BLAKE3.
    pub fn derive_seed(base_seed: u32, label: &str) -> u32 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&base_seed.to_le_bytes());
        hasher.update(label.as_bytes());
        let hash = hasher.finalize();
        let bytes = hash.as_bytes();
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Generate a random f64 in the range [0.0, 1.0).
    #[inline]
    pub fn gen_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Generate a random f64 in the range [-1.0, 1.0).
    #[inline]
    pub fn gen_signed_f64(&mut self) -> f64 {
        self.gen_f64() * 2.0 - 1.0
    }

    /// Generate a random value in the given range.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.inner.gen_range(range)
    }

    /// Random permutation of `0..=255` (Fisher-Yates).
    pub fn permutation_u8(&mut self) -> [u8; 256] {
        let mut perm = [0u8; 256];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = i as u8;
        }
        for i in (1..256).rev() {
            let j = self.gen_range(0..=i);
            perm.swap(i, j);
        }
        perm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_output() {
        let mut rng1 = DeterministicRng::new(42);
        let mut rng2 = DeterministicRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_f64(), rng2.gen_f64());
        }
    }

    #[test]
    fn test_different_seeds_produce_different_output() {
        let mut rng1 = DeterministicRng::new(42);
        let mut rng2 = DeterministicRng::new(43);

        let any_different = (0..10).any(|_| rng1.gen_f64() != rng2.gen_f64());
        assert!(any_different);
    }

    #[test]
    fn test_derive_seed() {
        let jitter = DeterministicRng::derive_seed(42, "jitter");
        let texture = DeterministicRng::derive_seed(42, "texture");
        assert_ne!(jitter, texture);
        assert_eq!(jitter, DeterministicRng::derive_seed(42, "jitter"));
    }

    #[test]
    fn test_permutation_is_complete() {
        let mut rng = DeterministicRng::new(7);
        let mut perm = rng.permutation_u8();
        perm.sort_unstable();
        for (i, v) in perm.iter().enumerate() {
            assert_eq!(*v as usize, i);
        }
    }

    #[test]
    fn test_signed_range() {
        let mut rng = DeterministicRng::new(1);
        for _ in 0..1000 {
            let v = rng.gen_signed_f64();
            assert!((-1.0..1.0).contains(&v));
        }
    }
}
