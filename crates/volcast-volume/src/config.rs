//! Volume configuration and per-frame animation state.

use serde::{Deserialize, Serialize};

use crate::error::{VolumeError, VolumeResult};

/// Smallest accepted marching step.
pub const MIN_STEP: f64 = 1e-6;

/// Construction-time parameters of a [`VolumeCube`](crate::VolumeCube).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeConfig {
    /// Marching step in cube-local units.
    #[serde(default = "default_step")]
    pub step: f64,

    /// Amplitude of the per-sample jitter along the ray.
    #[serde(default = "default_jitter")]
    pub jitter: f64,

    /// Seed of the jitter noise (independent of the field's noise).
    #[serde(default)]
    pub seed: u32,

    /// Frame times outside this window are clamped into it.
    #[serde(default)]
    pub window: Option<TimeWindow>,
}

fn default_step() -> f64 {
    0.01
}

fn default_jitter() -> f64 {
    0.002
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            jitter: default_jitter(),
            seed: 0,
            window: None,
        }
    }
}

impl VolumeConfig {
    /// Config with a custom step and defaults elsewhere.
    pub fn with_step(step: f64) -> Self {
        Self {
            step,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> VolumeResult<()> {
        if !self.step.is_finite() || self.step < MIN_STEP {
            return Err(VolumeError::InvalidStep {
                step: self.step,
                min: MIN_STEP,
            });
        }
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(VolumeError::invalid_param(
                "jitter",
                format!("must be finite and non-negative, got {}", self.jitter),
            ));
        }
        if let Some(window) = &self.window {
            window.validate()?;
        }
        Ok(())
    }

    /// Frame time after applying the validity window.
    pub fn effective_time(&self, time: f64) -> f64 {
        match &self.window {
            Some(window) => window.clamp(time),
            None => time,
        }
    }
}

/// Interval of animation time a volume is defined for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn validate(&self) -> VolumeResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(VolumeError::invalid_param("window", "bounds must be finite"));
        }
        if self.start > self.end {
            return Err(VolumeError::invalid_param(
                "window",
                format!("start {} is after end {}", self.start, self.end),
            ));
        }
        Ok(())
    }

    pub fn clamp(&self, time: f64) -> f64 {
        time.clamp(self.start, self.end)
    }
}

/// Animation state for one rendered frame.
///
/// Set once by the animation driver and passed by reference into every march
/// of that frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameState {
    /// Current animation time.
    pub time: f64,
}

impl FrameState {
    pub const fn at(time: f64) -> Self {
        Self { time }
    }
}
