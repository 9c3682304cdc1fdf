//! Unit-cube ray-marching integrator.

use std::fmt;
use std::sync::Arc;

use glam::DVec3;
use tracing::debug;
use volcast_field::{Color, ColorField, FieldPreset};
use volcast_noise::{DeterministicRng, WhiteNoise};

use crate::config::{FrameState, VolumeConfig};
use crate::error::VolumeResult;
use crate::host::{
    Intersection, RayContribution, RayRecursion, SolidIntersector, UnitCube, RECURSION_PRIORITY,
};

/// Label used to derive the jitter noise seed from the config seed.
const JITTER_LABEL: &str = "jitter";

/// Directions shorter than this cannot be normalized.
const MIN_DIRECTION_LENGTH_SQUARED: f64 = 1e-24;

/// Outcome of marching one ray segment through the cube.
#[derive(Debug, Clone, PartialEq)]
pub struct MarchResult {
    /// Riemann-sum estimate of the field integral, never negative per channel.
    pub color: Color,
    /// Farthest boundary intersection along the ray, if any.
    pub exit: Option<Intersection>,
    /// Marched distance in cube-local units.
    pub exit_distance: f64,
    /// Number of samples that contributed (inside the cube).
    pub samples: u64,
}

impl MarchResult {
    fn empty() -> Self {
        Self {
            color: Color::black(),
            exit: None,
            exit_distance: 0.0,
            samples: 0,
        }
    }
}

/// A `[0,1]^3` volume that emits light from a time-varying color field.
///
/// The cube is immutable after construction. Animation time arrives per call
/// through [`FrameState`], so one cube can be marched from many threads.
#[derive(Clone)]
pub struct VolumeCube {
    field: ColorField,
    config: VolumeConfig,
    jitter: WhiteNoise,
    intersector: Arc<dyn SolidIntersector>,
}

impl VolumeCube {
    /// Create a cube over `field`, failing fast on an invalid config.
    pub fn new(field: ColorField, config: VolumeConfig) -> VolumeResult<Self> {
        config.validate()?;
        let jitter_seed = DeterministicRng::derive_seed(config.seed, JITTER_LABEL);
        debug!(
            step = config.step,
            jitter = config.jitter,
            jitter_seed,
            "created volume cube"
        );
        Ok(Self {
            field,
            config,
            jitter: WhiteNoise::new(jitter_seed),
            intersector: Arc::new(UnitCube),
        })
    }

    /// Validate and build a preset, then wrap it in a cube.
    pub fn from_preset(preset: &FieldPreset, config: VolumeConfig) -> VolumeResult<Self> {
        let field = preset.build()?;
        Self::new(field, config)
    }

    /// Replace the boundary intersector (defaults to [`UnitCube`]).
    pub fn with_intersector(mut self, intersector: Arc<dyn SolidIntersector>) -> Self {
        self.intersector = intersector;
        self
    }

    /// March from a local entry point along `direction` until the cube exit.
    ///
    /// `direction` is normalized here; zero or non-finite directions march
    /// nothing. Samples are taken at `t = i·step` for `t < exit_distance`,
    /// nudged along the ray by the jitter noise. Samples that land outside
    /// the unit cube are skipped.
    pub fn march(&self, entry: DVec3, direction: DVec3, frame: &FrameState) -> MarchResult {
        let Some(direction) = normalized(direction) else {
            debug!(?direction, "skipping march along degenerate direction");
            return MarchResult::empty();
        };
        if !entry.is_finite() {
            debug!(?entry, "skipping march from non-finite entry");
            return MarchResult::empty();
        }

        let exit = self
            .intersector
            .intersect(entry, direction)
            .into_iter()
            .filter(|hit| hit.t.is_finite())
            .max_by(|a, b| a.t.total_cmp(&b.t));

        let exit_distance = exit.as_ref().map_or(0.0, |hit| hit.t.max(0.0));
        let time = self.config.effective_time(frame.time);
        let step = self.config.step;

        let mut color = Color::black();
        let mut samples = 0u64;
        let mut i = 0u64;
        loop {
            let t = i as f64 * step;
            if t >= exit_distance {
                break;
            }
            i += 1;

            let p = entry + direction * t;
            let p = p + direction * (self.config.jitter * self.jitter.value(p.x, p.y, p.z));
            if !inside_unit_cube(p) {
                continue;
            }

            let sample = self.field.sample(p, time).max_scalar(0.0);
            color = color.add(&sample.scale(step));
            samples += 1;
        }

        MarchResult {
            color,
            exit,
            exit_distance,
            samples,
        }
    }

    /// Host recursion callback for a ray that hit the cube boundary.
    ///
    /// `direction` is in world space and is moved into the cube frame with the
    /// incoming intersection's transform. The continuation resumes at the
    /// completed exit intersection with the unchanged direction and importance.
    /// Without an exit the ray passes through from the incoming hit with no
    /// contribution.
    pub fn recurse(
        &self,
        incoming: &Intersection,
        direction: DVec3,
        importance: f64,
        frame: &FrameState,
    ) -> (RayRecursion, u64) {
        let local_direction = incoming.world_to_local.transform_vector3(direction);
        let march = self.march(incoming.coord_local, local_direction, frame);

        let (color, mut resume) = match march.exit {
            Some(exit) => (
                march.color,
                exit.with_transform(incoming.world_to_local),
            ),
            None => {
                debug!(t = incoming.t, "no exit intersection, passing ray through");
                (Color::black(), incoming.clone())
            }
        };
        resume.complete();

        let recursion = RayRecursion {
            color,
            continuation: Some(RayContribution {
                intersection: resume,
                direction,
                importance,
            }),
        };
        (recursion, RECURSION_PRIORITY)
    }
}

impl fmt::Debug for VolumeCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumeCube")
            .field("config", &self.config)
            .field("jitter", &self.jitter)
            .finish_non_exhaustive()
    }
}

fn normalized(direction: DVec3) -> Option<DVec3> {
    let length_squared = direction.length_squared();
    if !length_squared.is_finite() || length_squared < MIN_DIRECTION_LENGTH_SQUARED {
        return None;
    }
    Some(direction / length_squared.sqrt())
}

fn inside_unit_cube(p: DVec3) -> bool {
    (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y) && (0.0..=1.0).contains(&p.z)
}
