//! Deterministic lattice noise for volcast.
//!
//! This crate provides the noise primitives every volumetric field is built
//! from. All generators are seeded once at construction and are pure functions
//! of their inputs afterwards, so the same seed always reproduces the same
//! field and generators can be sampled from many threads at once.
//!
//! # Generators
//!
//! - [`WhiteNoise`]: hashed lookup table, piecewise constant on a 1/255 lattice
//! - [`Perlin2D`], [`Perlin3D`], [`Perlin4D`]: gradient noise with smoothstep blending
//! - [`Turbulence`]: fractal octave sum over any [`NoiseField`]
//!
//! # Example
//!
//! ```
//! use glam::DVec3;
//! use volcast_noise::{NoiseField, Perlin3D, Turbulence};
//!
//! let turbulence = Turbulence::new(Perlin3D::new(42), 4);
//! let v = turbulence.sample(DVec3::new(0.25, 0.5, 0.75));
//! assert!(v.is_finite());
//! ```

pub mod perlin;
pub mod rng;
pub mod turbulence;
pub mod white;

use std::sync::Arc;

pub use perlin::{Perlin2D, Perlin3D, Perlin4D};
pub use rng::DeterministicRng;
pub use turbulence::Turbulence;
pub use white::WhiteNoise;

/// A scalar field sampled at points of type `P`.
///
/// Implementations must be pure: sampling the same point twice returns the
/// same value.
pub trait NoiseField<P> {
    /// Sample the field at a point.
    /// Gradient noise returns values roughly in [-1, 1].
    fn sample(&self, p: P) -> f64;

    /// Sample the field and remap [-1, 1] to [0, 1].
    fn sample_01(&self, p: P) -> f64 {
        (self.sample(p) + 1.0) * 0.5
    }
}

impl<P, N: NoiseField<P> + ?Sized> NoiseField<P> for Arc<N> {
    fn sample(&self, p: P) -> f64 {
        (**self).sample(p)
    }
}

impl<P, N: NoiseField<P> + ?Sized> NoiseField<P> for &N {
    fn sample(&self, p: P) -> f64 {
        (**self).sample(p)
    }
}

/// Smooth interpolation weight `t²(3 − 2t)`.
///
/// Has zero derivative at both ends, which keeps gradient noise C¹ across
/// cell boundaries.
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Smoothstep of `t` remapped from `[from, to]`, clamped to [0, 1] outside.
#[inline]
pub fn smoothstep_range(from: f64, to: f64, t: f64) -> f64 {
    if t <= from {
        return 0.0;
    }
    if t >= to {
        return 1.0;
    }
    smoothstep((t - from) / (to - from))
}

/// Linear interpolation.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Collapse `2^d` corner values to one by repeated linear interpolation.
///
/// Bit `k` of a corner index selects the upper side of axis `k`; `weights[k]`
/// is the blend weight along that axis.
pub(crate) fn multilinear(corners: &mut [f64], weights: &[f64]) -> f64 {
    let mut len = corners.len();
    for &w in weights {
        len /= 2;
        for i in 0..len {
            corners[i] = lerp(corners[2 * i], corners[2 * i + 1], w);
        }
    }
    corners[0]
}
