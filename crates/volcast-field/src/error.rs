//! Error types for field construction.

use thiserror::Error;

/// Result type for field operations.
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors raised while configuring or building a field.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// No built-in preset with this name.
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    /// Preset JSON could not be parsed.
    #[error("failed to parse preset: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FieldError {
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
            FieldError::InvalidParameter { .. } => "FIELD_001",
            FieldError::UnknownPreset(_) => "FIELD_002",
            FieldError::Parse(_) => "FIELD_003",
        }
    }
}

/// Reject NaN and infinite values.
pub(crate) fn validate_finite(name: &str, value: f64) -> FieldResult<()> {
    if !value.is_finite() {
        return Err(FieldError::invalid_param(name, format!("must be finite, got {}", value)));
    }
    Ok(())
}

/// Reject values that are not strictly positive.
pub(crate) fn validate_positive(name: &str, value: f64) -> FieldResult<()> {
    validate_finite(name, value)?;
    if value <= 0.0 {
        return Err(FieldError::invalid_param(name, format!("must be positive, got {}", value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = FieldError::invalid_param("gain", "must be finite");
        assert!(err.to_string().contains("gain"));
        assert_eq!(err.code(), "FIELD_001");
    }

    #[test]
    fn test_validators() {
        assert!(validate_finite("x", 1.0).is_ok());
        assert!(validate_finite("x", f64::NAN).is_err());
        assert!(validate_positive("x", 0.0).is_err());
        assert!(validate_positive("x", -2.0).is_err());
        assert!(validate_positive("x", 0.5).is_ok());
    }
}
