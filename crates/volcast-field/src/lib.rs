//! Composable intensity and color fields for volcast.
//!
//! Fields are pure functions from a cube-local point (and, for color fields,
//! a frame time) to a scalar or a color. They are built by composing:
//!
//! - **Shapes**: envelopes such as [`shape::paraboloid_fire_shape`] and [`shape::ball_shape`]
//! - **Displacement**: domain warps from [`displacement::displacement`]
//! - **Textures**: gradient noise and turbulence from `volcast-noise`
//! - **Color ramps**: [`ColorRamp`] lookups from intensity to color
//!
//! # Example
//!
//! ```
//! use glam::DVec3;
//! use volcast_field::effects::{fire, noise3d, turbulence};
//! use volcast_field::shape::paraboloid_fire_shape;
//! use volcast_field::ColorRamp;
//!
//! let noise = noise3d(42);
//! let shape = paraboloid_fire_shape(DVec3::new(0.5, 1.0, 0.5), DVec3::new(0.5, -1.0, 0.5));
//! let field = fire(shape, turbulence(noise.clone(), 4), noise, ColorRamp::fire_yellow(), 1.0, 1.0);
//!
//! let c = field.sample(DVec3::new(0.5, 0.4, 0.5), 0.0);
//! assert!(c.is_finite());
//! ```

pub mod color;
pub mod displacement;
pub mod effects;
pub mod error;
pub mod field;
pub mod presets;
pub mod shape;

pub use color::{Color, ColorRamp};
pub use error::{FieldError, FieldResult};
pub use field::{ColorField, Intensity, Intensity4, VectorField, VectorField4};
pub use presets::{CloudParams, FieldPreset, FireParams, Palette, TextureKind, PRESET_NAMES};
