//! Orthographic preview camera and frame renderer.
//!
//! The camera looks down +z at the unit cube, one ray per pixel through the
//! pixel center. It plays the host renderer: it finds where each ray enters
//! the cube, hands the hit to [`VolumeCube::recurse`] and adds whatever the
//! continuation would see behind the volume (black background here).

use std::num::NonZeroUsize;

use glam::DVec3;
use volcast_field::Color;
use volcast_volume::{FrameState, SolidIntersector, UnitCube, VolumeCube};

use crate::image::{ImageBuffer, PngError};

/// Camera plane distance in front of the cube.
const CAMERA_Z: f64 = -1.0;

/// Importance of primary rays.
const PRIMARY_IMPORTANCE: f64 = 1.0;

/// Orthographic camera covering the cube's `[0,1]^2` xy face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicCamera {
    pub width: u32,
    pub height: u32,
}

impl OrthographicCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Primary ray through the center of pixel `(x, y)`; row 0 is the top.
    pub fn pixel_ray(&self, x: u32, y: u32) -> (DVec3, DVec3) {
        let u = (x as f64 + 0.5) / self.width as f64;
        let v = 1.0 - (y as f64 + 0.5) / self.height as f64;
        (DVec3::new(u, v, CAMERA_Z), DVec3::Z)
    }

    /// Radiance along one primary ray.
    pub fn trace(&self, cube: &VolumeCube, origin: DVec3, direction: DVec3, frame: &FrameState) -> Color {
        let entry = UnitCube
            .intersect(origin, direction)
            .into_iter()
            .find(|hit| hit.enter && hit.t >= 0.0);
        let Some(entry) = entry else {
            return background();
        };

        let (recursion, _priority) = cube.recurse(&entry, direction, PRIMARY_IMPORTANCE, frame);
        match recursion.continuation {
            Some(_) => recursion.color.add(&background()),
            None => recursion.color,
        }
    }

    /// Render one frame, splitting rows across the available cores.
    pub fn render(&self, cube: &VolumeCube, frame: &FrameState) -> Result<ImageBuffer, PngError> {
        let mut image = ImageBuffer::new(self.width, self.height, background())?;
        let threads = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        let rows_per_chunk = (self.height as usize).div_ceil(threads).max(1);

        {
            let mut rows: Vec<(u32, &mut [Color])> = image
                .rows_mut()
                .enumerate()
                .map(|(y, row)| (y as u32, row))
                .collect();

            std::thread::scope(|scope| {
                for chunk in rows.chunks_mut(rows_per_chunk) {
                    scope.spawn(move || {
                        for (y, row) in chunk.iter_mut() {
                            for (x, pixel) in row.iter_mut().enumerate() {
                                let (origin, direction) = self.pixel_ray(x as u32, *y);
                                *pixel = self.trace(cube, origin, direction, frame);
                            }
                        }
                    });
                }
            });
        }

        Ok(image)
    }
}

fn background() -> Color {
    Color::black()
}
