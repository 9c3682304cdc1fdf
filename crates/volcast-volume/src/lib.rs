//! Ray-marching integrator for volcast color fields.
//!
//! A [`VolumeCube`] owns a [`ColorField`](volcast_field::ColorField) defined
//! over the unit cube `[0,1]^3`. When the host renderer hits the cube it calls
//! [`VolumeCube::recurse`], which marches the ray to the far side of the cube,
//! accumulates a left Riemann sum of the field and hands back the color plus
//! a continuation at the exit point.
//!
//! # Example
//!
//! ```
//! use glam::DVec3;
//! use volcast_field::FieldPreset;
//! use volcast_volume::{FrameState, VolumeConfig, VolumeCube};
//!
//! let preset = FieldPreset::named("fire").unwrap();
//! let cube = VolumeCube::from_preset(&preset, VolumeConfig::default()).unwrap();
//!
//! let result = cube.march(DVec3::new(0.5, 0.5, 0.0), DVec3::Z, &FrameState::at(0.0));
//! assert!(result.color.r >= 0.0);
//! ```

pub mod config;
pub mod cube;
pub mod error;
pub mod host;

pub use config::{FrameState, TimeWindow, VolumeConfig, MIN_STEP};
pub use cube::{MarchResult, VolumeCube};
pub use error::{VolumeError, VolumeResult};
pub use host::{
    Intersection, RayContribution, RayRecursion, SolidIntersector, UnitCube, RECURSION_PRIORITY,
};
