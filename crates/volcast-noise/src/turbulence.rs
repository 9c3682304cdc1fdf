//! Fractal turbulence.
//!
//! Sums octaves of a base noise field at geometrically growing frequencies
//! and shrinking amplitudes. The sum is not normalized.

use std::ops::Mul;

use crate::NoiseField;

/// Fractal octave sum over a base noise field.
///
/// `value(p) = Σ gain^i · noise(lacunarity^i · p)` for `i` in `0..octaves`.
#[derive(Debug, Clone)]
pub struct Turbulence<N> {
    /// The base noise function.
    noise: N,
    /// Number of octaves. Zero yields a field that is identically zero.
    octaves: u32,
    /// Frequency multiplier per octave.
    lacunarity: f64,
    /// Amplitude multiplier per octave.
    gain: f64,
}

impl<N> Turbulence<N> {
    /// Create turbulence with the default lacunarity (2.0) and gain (0.5).
    pub fn new(noise: N, octaves: u32) -> Self {
        Self {
            noise,
            octaves,
            lacunarity: 2.0,
            gain: 0.5,
        }
    }

    /// Set the lacunarity (frequency multiplier per octave).
    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    /// Set the gain (amplitude multiplier per octave).
    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }
}

impl<N, P> NoiseField<P> for Turbulence<N>
where
    N: NoiseField<P>,
    P: Copy + Mul<f64, Output = P>,
{
    fn sample(&self, p: P) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;

        for _ in 0..self.octaves {
            total += amplitude * self.noise.sample(p * frequency);
            amplitude *= self.gain;
            frequency *= self.lacunarity;
        }

        total
    }
}
