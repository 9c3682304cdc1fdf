//! volcast CLI library.
//!
//! Preview host for volcast volumes: an orthographic camera that drives
//! [`VolumeCube`](volcast_volume::VolumeCube) recursion per pixel, plus
//! deterministic PNG output.

pub mod camera;
pub mod commands;
pub mod image;
