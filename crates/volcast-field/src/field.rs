//! Field handles.
//!
//! Fields are pure functions wrapped in reference-counted trait objects, so
//! one noise generator can be captured by many derived fields and handles are
//! cheap to clone across threads.

use std::fmt;
use std::sync::Arc;

use glam::{DVec3, DVec4};
use volcast_noise::NoiseField;

use crate::color::Color;

/// Scalar density field over 3D space.
#[derive(Clone)]
pub struct Intensity(Arc<dyn Fn(DVec3) -> f64 + Send + Sync>);

impl Intensity {
    pub fn new(f: impl Fn(DVec3) -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Wrap any 3D noise generator.
    pub fn from_noise<N>(noise: N) -> Self
    where
        N: NoiseField<DVec3> + Send + Sync + 'static,
    {
        Self::new(move |p| noise.sample(p))
    }

    /// A field with the same value everywhere.
    pub fn constant(value: f64) -> Self {
        Self::new(move |_| value)
    }

    #[inline]
    pub fn sample(&self, p: DVec3) -> f64 {
        (self.0)(p)
    }

    /// Apply `f` to every sampled value.
    pub fn map(&self, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        let inner = self.clone();
        Self::new(move |p| f(inner.sample(p)))
    }

    /// Pointwise product of two fields.
    pub fn product(&self, other: &Intensity) -> Self {
        let a = self.clone();
        let b = other.clone();
        Self::new(move |p| a.sample(p) * b.sample(p))
    }
}

impl NoiseField<DVec3> for Intensity {
    fn sample(&self, p: DVec3) -> f64 {
        Intensity::sample(self, p)
    }
}

impl fmt::Debug for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Intensity(..)")
    }
}

/// Scalar field over 4D space (3D position plus an evolution axis).
#[derive(Clone)]
pub struct Intensity4(Arc<dyn Fn(DVec4) -> f64 + Send + Sync>);

impl Intensity4 {
    pub fn new(f: impl Fn(DVec4) -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Wrap any 4D noise generator.
    pub fn from_noise<N>(noise: N) -> Self
    where
        N: NoiseField<DVec4> + Send + Sync + 'static,
    {
        Self::new(move |p| noise.sample(p))
    }

    #[inline]
    pub fn sample(&self, p: DVec4) -> f64 {
        (self.0)(p)
    }
}

impl NoiseField<DVec4> for Intensity4 {
    fn sample(&self, p: DVec4) -> f64 {
        Intensity4::sample(self, p)
    }
}

impl fmt::Debug for Intensity4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Intensity4(..)")
    }
}

/// 3-vector field over 3D space, used for domain warping.
#[derive(Clone)]
pub struct VectorField(Arc<dyn Fn(DVec3) -> DVec3 + Send + Sync>);

impl VectorField {
    pub fn new(f: impl Fn(DVec3) -> DVec3 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn sample(&self, p: DVec3) -> DVec3 {
        (self.0)(p)
    }
}

impl fmt::Debug for VectorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VectorField(..)")
    }
}

/// 3-vector field over 4D space.
#[derive(Clone)]
pub struct VectorField4(Arc<dyn Fn(DVec4) -> DVec3 + Send + Sync>);

impl VectorField4 {
    pub fn new(f: impl Fn(DVec4) -> DVec3 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn sample(&self, p: DVec4) -> DVec3 {
        (self.0)(p)
    }
}

impl fmt::Debug for VectorField4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VectorField4(..)")
    }
}

/// Time-varying color field sampled by the volume integrator.
///
/// Time is an explicit argument, so one field can be sampled for different
/// frames concurrently without any per-object animation state.
#[derive(Clone)]
pub struct ColorField(Arc<dyn Fn(DVec3, f64) -> Color + Send + Sync>);

impl ColorField {
    pub fn new(f: impl Fn(DVec3, f64) -> Color + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// The same color everywhere and at every time.
    pub fn constant(color: Color) -> Self {
        Self::new(move |_, _| color)
    }

    #[inline]
    pub fn sample(&self, p: DVec3, time: f64) -> Color {
        (self.0)(p, time)
    }
}

impl fmt::Debug for ColorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ColorField(..)")
    }
}
