//! Domain warping.
//!
//! Turns a scalar noise field into a vector field by sampling it three times
//! at points shifted far apart along one axis, so the three components are
//! effectively decorrelated.

use glam::{DVec3, DVec4};

use crate::field::{Intensity, Intensity4, VectorField, VectorField4};

/// Shifts applied along the x axis for the x, y and z components.
pub const DISPLACEMENT_SHIFTS: [f64; 3] = [17.0, 53.0, 91.0];

/// Per-axis displacement built from a 3D scalar field.
pub fn displacement(noise: Intensity) -> VectorField {
    VectorField::new(move |p| {
        DVec3::new(
            noise.sample(p + DVec3::X * DISPLACEMENT_SHIFTS[0]),
            noise.sample(p + DVec3::X * DISPLACEMENT_SHIFTS[1]),
            noise.sample(p + DVec3::X * DISPLACEMENT_SHIFTS[2]),
        )
    })
}

/// Per-axis displacement built from a 4D scalar field.
pub fn displacement4(noise: Intensity4) -> VectorField4 {
    VectorField4::new(move |p| {
        DVec3::new(
            noise.sample(p + DVec4::X * DISPLACEMENT_SHIFTS[0]),
            noise.sample(p + DVec4::X * DISPLACEMENT_SHIFTS[1]),
            noise.sample(p + DVec4::X * DISPLACEMENT_SHIFTS[2]),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use volcast_noise::{Perlin3D, Perlin4D};

    #[test]
    fn test_components_sample_shifted_points() {
        let noise = Intensity::from_noise(Perlin3D::new(6));
        let warp = displacement(noise.clone());
        let p = DVec3::new(0.3, 0.6, 0.9);
        let d = warp.sample(p);
        assert_eq!(d.x, noise.sample(p + DVec3::X * 17.0));
        assert_eq!(d.y, noise.sample(p + DVec3::X * 53.0));
        assert_eq!(d.z, noise.sample(p + DVec3::X * 91.0));
    }

    #[test]
    fn test_components_are_not_identical() {
        let warp = displacement4(Intensity4::from_noise(Perlin4D::new(6)));
        let differs = (0..20).any(|i| {
            let d = warp.sample(DVec4::new(i as f64 * 0.29, 0.41, 0.77, 0.13));
            d.x != d.y || d.y != d.z
        });
        assert!(differs);
    }
}
