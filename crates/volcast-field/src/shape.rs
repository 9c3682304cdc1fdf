//! Shape envelopes.
//!
//! Each shape is an [`Intensity`] in [0, 1] that is 1 inside a core region
//! and fades smoothly to 0 outward. Coordinates are cube-local, `[0,1]^3`,
//! with +y pointing up.

use glam::DVec3;
use volcast_noise::smoothstep_range;

use crate::field::Intensity;

/// Fraction of the paraboloid's radius (squared, relative to depth) that is fully lit.
const PARABOLOID_CORE: f64 = 0.25;

/// Height of the linear fade at the bottom of the fire shape.
pub const FIRE_BOTTOM_FADE: f64 = 0.2;

/// Normalized radius below which the ball shape is fully lit.
const BALL_CORE: f64 = 0.5;

/// Linear ramp from 0 at `y = 0` to 1 at `y = threshold`.
pub fn fade_bottom(threshold: f64) -> Intensity {
    Intensity::new(move |p| {
        if threshold <= 0.0 {
            return if p.y >= 0.0 { 1.0 } else { 0.0 };
        }
        (p.y / threshold).clamp(0.0, 1.0)
    })
}

/// `(1 − y)²` falloff, 0 at the top of the cube and 1 at its floor.
pub fn fade_top() -> Intensity {
    Intensity::new(|p| {
        let h = (1.0 - p.y).clamp(0.0, 1.0);
        h * h
    })
}

/// Flame-shaped paraboloid with its apex at `vertex`.
///
/// `scale` maps the paraboloid to shape space: `q = (p − vertex) / scale`.
/// The solid is `q.x² + q.z² ≤ q.y` for `0 < q.y ≤ 1`; a negative `scale.y`
/// opens it downward. Inside, the envelope is 1 near the axis and fades to 0
/// at the surface, then it is dimmed by [`fade_top`] toward the top of the
/// cube and by [`fade_bottom`] over its floor.
pub fn paraboloid_fire_shape(vertex: DVec3, scale: DVec3) -> Intensity {
    let top = fade_top();
    let bottom = fade_bottom(FIRE_BOTTOM_FADE);
    Intensity::new(move |p| {
        let q = (p - vertex) / scale;
        let depth = q.y;
        if !(depth > 0.0 && depth <= 1.0) {
            return 0.0;
        }
        let radial = q.x * q.x + q.z * q.z;
        let envelope = 1.0 - smoothstep_range(PARABOLOID_CORE * depth, depth, radial);
        envelope * top.sample(p) * bottom.sample(p)
    })
}

/// Ellipsoid with the given center and radii.
pub fn ball_shape(center: DVec3, radii: DVec3) -> Intensity {
    Intensity::new(move |p| {
        let d = ((p - center) / radii).length();
        1.0 - smoothstep_range(BALL_CORE, 1.0, d)
    })
}
