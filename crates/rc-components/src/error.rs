//! Error types for component operations.

use rc_core::error::RcError;
use rc_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Outlet pressure at or below inlet pressure.
    #[error("Invalid pressure ratio {ratio:.4}: compression requires p_out > p_in")]
    InvalidPressureRatio { ratio: f64 },

    #[error("Property lookup failed: {0}")]
    Property(#[from] FluidError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for RcError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } => RcError::InvalidArg { what },
            ComponentError::InvalidArg { what } => RcError::InvalidArg { what },
            ComponentError::InvalidPressureRatio { .. } => RcError::InvalidArg {
                what: "pressure ratio must exceed 1",
            },
            ComponentError::Property(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::InvalidPressureRatio { ratio: 0.5 };
        assert!(err.to_string().contains("0.5000"));
    }

    #[test]
    fn error_conversion() {
        let comp_err = ComponentError::InvalidArg { what: "test" };
        let rc_err: RcError = comp_err.into();
        assert!(matches!(rc_err, RcError::InvalidArg { .. }));

        let fluid: ComponentError = FluidError::InvalidArg { what: "q" }.into();
        assert!(matches!(fluid, ComponentError::Property(_)));
    }
}
