//! Boundary types shared with the host ray tracer.
//!
//! The host owns scene traversal, materials and transforms. A volume only
//! needs to re-intersect its own boundary to find where a ray leaves it, and
//! to hand back a color plus a continuation the host keeps tracing from.

use glam::{DMat4, DVec3};
use volcast_field::Color;

/// Priority returned alongside every recursion result.
pub const RECURSION_PRIORITY: u64 = 144;

/// Tolerance for deciding which cube face a point lies on.
const FACE_EPSILON: f64 = 1e-9;

/// A ray/solid intersection in the solid's local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    /// Ray parameter of the hit (distance along the normalized local direction).
    pub t: f64,
    /// True when the ray enters the solid at this hit.
    pub enter: bool,
    /// Hit position in local coordinates.
    pub coord_local: DVec3,
    /// Transform from world to the solid's local frame.
    pub world_to_local: DMat4,
    /// Outward surface normal in local coordinates; set by [`Intersection::complete`].
    pub normal_local: Option<DVec3>,
}

impl Intersection {
    pub fn new(t: f64, enter: bool, coord_local: DVec3) -> Self {
        Self {
            t,
            enter,
            coord_local,
            world_to_local: DMat4::IDENTITY,
            normal_local: None,
        }
    }

    pub fn with_transform(mut self, world_to_local: DMat4) -> Self {
        self.world_to_local = world_to_local;
        self
    }

    /// Finalize derived surface data before the hit is handed to the host.
    ///
    /// Fills in the outward normal of the unit-cube face the hit lies on.
    /// Already-completed intersections are left untouched.
    pub fn complete(&mut self) {
        if self.normal_local.is_none() {
            self.normal_local = Some(unit_cube_normal(self.coord_local));
        }
    }

    pub fn is_complete(&self) -> bool {
        self.normal_local.is_some()
    }
}

/// Outward normal of the `[0,1]^3` face nearest to `p`.
fn unit_cube_normal(p: DVec3) -> DVec3 {
    let mut best = (f64::INFINITY, DVec3::Y);
    for axis in 0..3 {
        let mut n = DVec3::ZERO;
        let low = p[axis].abs();
        if low < best.0 - FACE_EPSILON {
            n[axis] = -1.0;
            best = (low, n);
        }
        let high = (p[axis] - 1.0).abs();
        if high < best.0 - FACE_EPSILON {
            let mut n = DVec3::ZERO;
            n[axis] = 1.0;
            best = (high, n);
        }
    }
    best.1
}

/// Ray intersection with a solid's own boundary, supplied by the host.
pub trait SolidIntersector: Send + Sync {
    /// All intersections of `origin + t·direction` with the boundary, sorted by `t`.
    ///
    /// `direction` is normalized and both vectors are in the solid's local frame.
    fn intersect(&self, origin: DVec3, direction: DVec3) -> Vec<Intersection>;
}

/// The unit cube `[0,1]^3`, intersected with the slab method.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCube;

impl SolidIntersector for UnitCube {
    fn intersect(&self, origin: DVec3, direction: DVec3) -> Vec<Intersection> {
        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            if d.abs() < f64::EPSILON {
                if !(0.0..=1.0).contains(&o) {
                    return Vec::new();
                }
                continue;
            }
            let t0 = -o / d;
            let t1 = (1.0 - o) / d;
            t_near = t_near.max(t0.min(t1));
            t_far = t_far.min(t0.max(t1));
        }

        if !t_near.is_finite() || !t_far.is_finite() || t_far < t_near {
            return Vec::new();
        }

        vec![
            Intersection::new(t_near, true, origin + direction * t_near),
            Intersection::new(t_far, false, origin + direction * t_far),
        ]
    }
}

/// Continuation handed back to the host: keep tracing from `intersection`.
#[derive(Debug, Clone, PartialEq)]
pub struct RayContribution {
    /// Completed exit intersection.
    pub intersection: Intersection,
    /// World-space direction, unchanged from the incoming ray.
    pub direction: DVec3,
    /// Importance, forwarded unchanged.
    pub importance: f64,
}

/// Result of the recursion callback.
#[derive(Debug, Clone, PartialEq)]
pub struct RayRecursion {
    /// Light contributed by the volume along the segment.
    pub color: Color,
    /// Where and how the host continues tracing.
    pub continuation: Option<RayContribution>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_ray_through_cube() {
        let hits = UnitCube.intersect(DVec3::new(0.5, 0.5, -1.0), DVec3::Z);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].t - 1.0).abs() < 1e-12);
        assert!((hits[1].t - 2.0).abs() < 1e-12);
        assert!(hits[0].enter && !hits[1].enter);
        assert!((hits[1].coord_local.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_ray_from_corner() {
        let dir = DVec3::ONE.normalize();
        let hits = UnitCube.intersect(DVec3::ZERO, dir);
        assert_eq!(hits.len(), 2);
        assert!((hits[1].t - 3f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_miss() {
        let hits = UnitCube.intersect(DVec3::new(2.0, 0.5, -1.0), DVec3::Z);
        assert!(hits.is_empty());
        let parallel = UnitCube.intersect(DVec3::new(0.5, 1.5, 0.5), DVec3::X);
        assert!(parallel.is_empty());
    }

    #[test]
    fn test_complete_sets_face_normal() {
        let mut hit = Intersection::new(1.0, false, DVec3::new(0.3, 0.4, 1.0));
        assert!(!hit.is_complete());
        hit.complete();
        assert_eq!(hit.normal_local, Some(DVec3::Z));

        let mut hit = Intersection::new(0.0, true, DVec3::new(0.0, 0.4, 0.7));
        hit.complete();
        assert_eq!(hit.normal_local, Some(DVec3::NEG_X));
    }
}
