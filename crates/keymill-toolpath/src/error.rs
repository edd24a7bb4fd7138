//! Error types for toolpath synthesis.
//!
//! All validation is precondition-style: a generator checks its full
//! parameter set before emitting the first command, so a failed call
//! never returns a partial sequence.

use thiserror::Error;

/// Errors from validating synthesizer parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A numeric parameter that must be strictly positive was not.
    #[error("Parameter '{name}' must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: &'static str, reason: String },

    /// The tool cannot produce the requested hole.
    #[error("Endmill diameter {endmill} must be smaller than hole diameter {diameter}")]
    ToolTooLarge { endmill: f64, diameter: f64 },

    /// A polygon has too few vertices to form a closed profile.
    #[error("Polygon needs at least 3 points, got {count}")]
    DegeneratePolygon { count: usize },
}

/// Errors that can occur during toolpath synthesis.
#[derive(Error, Debug)]
pub enum ToolpathError {
    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Result type alias for toolpath synthesis.
pub type ToolpathResult<T> = Result<T, ToolpathError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

/// Checks that a parameter is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> ParameterResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NotPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::NotPositive {
            name: "depth",
            value: -5.0,
        };
        assert_eq!(err.to_string(), "Parameter 'depth' must be positive, got -5");

        let err = ParameterError::ToolTooLarge {
            endmill: 6.0,
            diameter: 5.0,
        };
        assert_eq!(
            err.to_string(),
            "Endmill diameter 6 must be smaller than hole diameter 5"
        );

        let err = ParameterError::DegeneratePolygon { count: 2 };
        assert_eq!(err.to_string(), "Polygon needs at least 3 points, got 2");
    }

    #[test]
    fn test_error_conversion() {
        let param_err = ParameterError::DegeneratePolygon { count: 1 };
        let toolpath_err: ToolpathError = param_err.into();
        assert!(matches!(toolpath_err, ToolpathError::Parameter(_)));
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("pitch", 1.0).is_ok());
        assert!(require_positive("pitch", 0.0).is_err());
        assert!(require_positive("pitch", -1.0).is_err());
        assert!(require_positive("pitch", f64::NAN).is_err());
        assert!(require_positive("pitch", f64::INFINITY).is_err());
    }
}
