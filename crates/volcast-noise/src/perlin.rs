//! Gradient ("Perlin") noise in two, three and four dimensions.
//!
//! Each lattice corner gets a unit gradient assembled from a few white-noise
//! lookups at small offsets from the corner. The sample value is the
//! smoothstep-weighted multilinear blend of the corner dot products, so it is
//! zero on every lattice point and C¹ across cell boundaries.

use glam::{DVec2, DVec3, DVec4};

use crate::white::WhiteNoise;
use crate::{lerp, multilinear, smoothstep, NoiseField};

/// Gradients shorter than this are replaced by a fixed axis vector.
const MIN_GRADIENT_LENGTH_SQUARED: f64 = 1e-12;

/// 2D gradient noise.
#[derive(Debug, Clone)]
pub struct Perlin2D {
    white: WhiteNoise,
}

impl Perlin2D {
    /// Create a generator backed by a fresh white-noise table.
    pub fn new(seed: u32) -> Self {
        Self::from_white(WhiteNoise::new(seed))
    }

    /// Create a generator sharing an existing white-noise table.
    pub fn from_white(white: WhiteNoise) -> Self {
        Self { white }
    }

    fn gradient(&self, c: DVec2) -> DVec2 {
        let w = &self.white;
        let g = DVec2::new(w.value(c.x, c.y, 0.0), w.value(c.x + 0.1, c.y, 0.0));
        if g.length_squared() < MIN_GRADIENT_LENGTH_SQUARED {
            return DVec2::X;
        }
        g.normalize()
    }
}

impl NoiseField<DVec2> for Perlin2D {
    fn sample(&self, p: DVec2) -> f64 {
        let c = p.floor();
        let d = p - c;

        let n00 = self.gradient(c).dot(d);
        let n10 = self.gradient(c + DVec2::new(1.0, 0.0)).dot(d - DVec2::new(1.0, 0.0));
        let n01 = self.gradient(c + DVec2::new(0.0, 1.0)).dot(d - DVec2::new(0.0, 1.0));
        let n11 = self.gradient(c + DVec2::ONE).dot(d - DVec2::ONE);

        let u = smoothstep(d.x);
        let v = smoothstep(d.y);

        lerp(lerp(n00, n10, u), lerp(n01, n11, u), v)
    }
}

/// 3D gradient noise.
#[derive(Debug, Clone)]
pub struct Perlin3D {
    white: WhiteNoise,
}

impl Perlin3D {
    /// Create a generator backed by a fresh white-noise table.
    pub fn new(seed: u32) -> Self {
        Self::from_white(WhiteNoise::new(seed))
    }

    /// Create a generator sharing an existing white-noise table.
    pub fn from_white(white: WhiteNoise) -> Self {
        Self { white }
    }

    fn gradient(&self, c: DVec3) -> DVec3 {
        let w = &self.white;
        let g = DVec3::new(
            w.value(c.x, c.y, c.z),
            w.value(c.x + 0.1, c.y, c.z),
            w.value(c.x + 0.1, c.y + 0.1, c.z),
        );
        if g.length_squared() < MIN_GRADIENT_LENGTH_SQUARED {
            return DVec3::X;
        }
        g.normalize()
    }
}

impl NoiseField<DVec3> for Perlin3D {
    fn sample(&self, p: DVec3) -> f64 {
        let c = p.floor();
        let d = p - c;

        let mut corners = [0.0; 8];
        for (i, value) in corners.iter_mut().enumerate() {
            let offset = DVec3::new(
                (i & 1) as f64,
                ((i >> 1) & 1) as f64,
                ((i >> 2) & 1) as f64,
            );
            *value = self.gradient(c + offset).dot(d - offset);
        }

        let weights = [smoothstep(d.x), smoothstep(d.y), smoothstep(d.z)];
        multilinear(&mut corners, &weights)
    }
}

/// 4D gradient noise. The fourth axis is typically used as time.
#[derive(Debug, Clone)]
pub struct Perlin4D {
    white: WhiteNoise,
}

impl Perlin4D {
    /// Create a generator backed by a fresh white-noise table.
    pub fn new(seed: u32) -> Self {
        Self::from_white(WhiteNoise::new(seed))
    }

    /// Create a generator sharing an existing white-noise table.
    pub fn from_white(white: WhiteNoise) -> Self {
        Self { white }
    }

    fn gradient(&self, c: DVec4) -> DVec4 {
        let w = &self.white;
        let g = DVec4::new(
            w.value(c.x, c.y, c.z),
            w.value(c.w + 0.1, c.y, c.z),
            w.value(c.x + 0.2, c.w, c.z),
            w.value(c.x + 0.3, c.y, c.w),
        );
        if g.length_squared() < MIN_GRADIENT_LENGTH_SQUARED {
            return DVec4::X;
        }
        g.normalize()
    }
}

impl NoiseField<DVec4> for Perlin4D {
    fn sample(&self, p: DVec4) -> f64 {
        let c = p.floor();
        let d = p - c;

        let mut corners = [0.0; 16];
        for (i, value) in corners.iter_mut().enumerate() {
            let offset = DVec4::new(
                (i & 1) as f64,
                ((i >> 1) & 1) as f64,
                ((i >> 2) & 1) as f64,
                ((i >> 3) & 1) as f64,
            );
            *value = self.gradient(c + offset).dot(d - offset);
        }

        let weights = [
            smoothstep(d.x),
            smoothstep(d.y),
            smoothstep(d.z),
            smoothstep(d.w),
        ];
        multilinear(&mut corners, &weights)
    }
}
