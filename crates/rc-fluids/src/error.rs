//! Fluid property errors.

use rc_core::RcError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during property lookups.
///
/// `UnsupportedFluid` and `OutOfRange` are non-retryable for a given input: asking
/// again with the same fluid and state cannot succeed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// The backend has no equation of state for this fluid.
    #[error("Unsupported fluid {fluid} (requested {input})")]
    UnsupportedFluid { fluid: String, input: String },

    /// The requested state lies outside the backend's valid region.
    #[error("State out of range for {fluid} at {input}: {message}")]
    OutOfRange {
        fluid: String,
        input: String,
        message: String,
    },

    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl FluidError {
    /// The state that was requested when the lookup failed, if the error carries one.
    pub fn requested_state(&self) -> Option<&str> {
        match self {
            FluidError::UnsupportedFluid { input, .. } | FluidError::OutOfRange { input, .. } => {
                Some(input.as_str())
            }
            _ => None,
        }
    }
}

impl From<FluidError> for RcError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::NonPhysical { what } | FluidError::InvalidArg { what } => {
                RcError::InvalidArg { what }
            }
            other => RcError::Invariant {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::NonPhysical { what: "pressure" };
        assert!(err.to_string().contains("pressure"));

        let err = FluidError::OutOfRange {
            fluid: "R134a".into(),
            input: "P=1 Pa, Q=1".into(),
            message: "below triple point".into(),
        };
        assert!(err.to_string().contains("R134a"));
        assert_eq!(err.requested_state(), Some("P=1 Pa, Q=1"));
    }

    #[test]
    fn error_to_rc_error() {
        let fluid_err = FluidError::UnsupportedFluid {
            fluid: "X".into(),
            input: "P-T".into(),
        };
        let rc_err: RcError = fluid_err.into();
        assert!(matches!(rc_err, RcError::Invariant { .. }));

        let rc_err: RcError = FluidError::InvalidArg { what: "q" }.into();
        assert!(matches!(rc_err, RcError::InvalidArg { what: "q" }));
    }
}
