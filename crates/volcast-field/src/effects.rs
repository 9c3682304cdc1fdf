//! Fire and cloud color fields.
//!
//! Both effects follow the same recipe: warp the sample point with a
//! displacement field, read a texture noise at the warped point, and mask it
//! with a shape envelope that is itself sampled at a slightly warped point.

use glam::{DVec3, DVec4};
use volcast_noise::{Perlin3D, Perlin4D, Turbulence};

use crate::color::{Color, ColorRamp};
use crate::displacement::{displacement, displacement4};
use crate::field::{ColorField, Intensity, Intensity4, VectorField4};

/// Anisotropic frequency of the fire texture: wide in x/z, unit in y.
pub const FIRE_TEXTURE_SCALE: DVec3 = DVec3::new(4.0, 1.0, 4.0);

/// Frequency of the fire displacement relative to the texture.
const FIRE_WARP_FREQUENCY: f64 = 2.0;

/// Share of the displacement applied to the shape lookup.
const FIRE_SHAPE_WARP: f64 = 0.1;

/// Brightness applied to every fire sample before integration.
pub const FIRE_BRIGHTNESS: f64 = 5.0;

/// Frequency of the cloud density texture.
const CLOUD_TEXTURE_FREQUENCY: f64 = 5.0;

/// Frequencies and strengths of the two cloud warps (texture, shape).
const CLOUD_TEXTURE_WARP: (f64, f64) = (3.0, 2.0);
const CLOUD_SHAPE_WARP: (f64, f64) = (2.0, 0.5);

/// 3D gradient noise as an [`Intensity`].
pub fn noise3d(seed: u32) -> Intensity {
    Intensity::from_noise(Perlin3D::new(seed))
}

/// 4D gradient noise as an [`Intensity4`].
pub fn noise4d(seed: u32) -> Intensity4 {
    Intensity4::from_noise(Perlin4D::new(seed))
}

/// Turbulence over an existing field with default lacunarity and gain.
pub fn turbulence(noise: Intensity, octaves: u32) -> Intensity {
    Intensity::from_noise(Turbulence::new(noise, octaves))
}

/// Turbulence over a 4D field with default lacunarity and gain.
pub fn turbulence4(noise: Intensity4, octaves: u32) -> Intensity4 {
    Intensity4::from_noise(Turbulence::new(noise, octaves))
}

/// Remap a [-1, 1] field to [0, 1].
pub fn positive(noise: Intensity) -> Intensity {
    noise.map(|v| v * 0.5 + 0.5)
}

/// Animated fire.
///
/// * `shape` - envelope in cube-local coordinates
/// * `texture` - noise giving the flame structure
/// * `displacement_noise` - noise driving the domain warp
/// * `ramp` - intensity to color lookup
/// * `intensity` - brightness multiplier
/// * `speed` - upward scroll rate of the texture per unit time
pub fn fire(
    shape: Intensity,
    texture: Intensity,
    displacement_noise: Intensity,
    ramp: ColorRamp,
    intensity: f64,
    speed: f64,
) -> ColorField {
    let warp = displacement(displacement_noise);
    ColorField::new(move |p, time| {
        let scaled = p * FIRE_TEXTURE_SCALE;
        // Sampling coordinates move down so the flame pattern rises.
        let scroll = DVec3::new(0.0, -speed * time, 0.0);
        let d = warp.sample(scaled * FIRE_WARP_FREQUENCY + scroll);

        let texture_value = (texture.sample(scaled + scroll + d) * 0.5 + 0.5).max(0.0);
        let value = texture_value * shape.sample(p + d * FIRE_SHAPE_WARP);

        ramp.at(value).scale(value * intensity * FIRE_BRIGHTNESS)
    })
}

/// Cloud of uniform color.
///
/// The cloud does not scroll; instead `warp` is a 4D field whose fourth axis
/// advances at `evolution_rate` per unit time, so the billows slowly morph.
pub fn cloud(
    shape: Intensity,
    density: Intensity,
    warp: VectorField4,
    color: Color,
    density_scale: f64,
    evolution_rate: f64,
) -> ColorField {
    ColorField::new(move |p, time| {
        let p4 = p.extend(0.0);
        let evolution = DVec4::W * (evolution_rate * time);

        let texture_warp = warp.sample(p4 * CLOUD_TEXTURE_WARP.0 + evolution);
        let d = density.sample(p * CLOUD_TEXTURE_FREQUENCY + texture_warp * CLOUD_TEXTURE_WARP.1);

        let shape_warp = warp.sample(p4 * CLOUD_SHAPE_WARP.0 + evolution);
        let envelope = shape.sample(p + shape_warp * CLOUD_SHAPE_WARP.1);

        color.scale(density_scale * d * envelope)
    })
}

/// Cloud warp built from 4D turbulence.
pub fn cloud_warp(seed: u32, octaves: u32) -> VectorField4 {
    displacement4(turbulence4(noise4d(seed), octaves))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{ball_shape, paraboloid_fire_shape};

    fn test_fire() -> ColorField {
        let noise = noise3d(42);
        let shape = paraboloid_fire_shape(DVec3::new(0.5, 1.0, 0.5), DVec3::new(0.5, -1.0, 0.5));
        fire(
            shape,
            turbulence(noise.clone(), 4),
            noise,
            ColorRamp::fire_yellow(),
            1.0,
            1.0,
        )
    }

    #[test]
    fn test_fire_deterministic() {
        let a = test_fire();
        let b = test_fire();
        for i in 0..50 {
            let p = DVec3::new(0.5, i as f64 * 0.02, 0.45);
            assert_eq!(a.sample(p, 0.3), b.sample(p, 0.3));
        }
    }

    #[test]
    fn test_fire_dark_outside_shape() {
        let field = test_fire();
        assert_eq!(field.sample(DVec3::new(0.5, -2.0, 0.5), 0.0), Color::black());
        assert_eq!(field.sample(DVec3::new(0.5, 3.0, 0.5), 0.0), Color::black());
    }

    #[test]
    fn test_fire_lit_somewhere_in_core() {
        let field = test_fire();
        let lit = (0..40).any(|i| {
            let c = field.sample(DVec3::new(0.5, 0.25 + i as f64 * 0.01, 0.5), 0.0);
            c.r > 0.0
        });
        assert!(lit);
    }

    #[test]
    fn test_fire_changes_over_time() {
        let field = test_fire();
        let changed = (0..40).any(|i| {
            let p = DVec3::new(0.5, 0.3 + i as f64 * 0.01, 0.5);
            field.sample(p, 0.0) != field.sample(p, 0.7)
        });
        assert!(changed);
    }

    #[test]
    fn test_cloud_is_non_negative_with_positive_density() {
        let density = turbulence(positive(noise3d(3)), 4);
        let field = cloud(
            ball_shape(DVec3::splat(0.5), DVec3::splat(0.25)),
            density,
            cloud_warp(4, 3),
            Color::white(),
            3.0,
            4.0,
        );
        for i in 0..30 {
            let c = field.sample(DVec3::new(0.5, 0.5, i as f64 / 30.0), 0.5);
            assert!(c.r >= 0.0 && c.g >= 0.0 && c.b >= 0.0);
        }
    }
}
