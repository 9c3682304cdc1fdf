//! Error types for the volume integrator.

use thiserror::Error;
use volcast_field::FieldError;

/// Result type for volume operations.
pub type VolumeResult<T> = Result<T, VolumeError>;

/// Errors raised while configuring a volume.
///
/// Marching itself never fails; all checks happen at construction.
#[derive(Debug, Error)]
pub enum VolumeError {
    /// Step size that would not terminate or would integrate incorrectly.
    #[error("invalid step size {step}: must be finite and at least {min}")]
    InvalidStep {
        /// The rejected step.
        step: f64,
        /// Smallest accepted step.
        min: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// The color field could not be built.
    #[error("field error: {0}")]
    Field(#[from] FieldError),
}

impl VolumeError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            VolumeError::InvalidStep { .. } => "VOLUME_001",
            VolumeError::InvalidParameter { .. } => "VOLUME_002",
            VolumeError::Field(_) => "VOLUME_003",
        }
    }

    /// Error category for grouping.
    pub fn category(&self) -> &'static str {
        "volume"
    }
}
