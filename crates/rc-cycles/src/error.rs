//! Calculation errors.

use rc_components::ComponentError;
use rc_core::RcError;
use rc_fluids::{FluidError, Refrigerant};
use thiserror::Error;

pub type CalcResult<T> = Result<T, CalculationError>;

/// Errors returned by a cycle calculation.
///
/// No partial result accompanies an error: the calculation is aborted at the first
/// failure and the orchestrator never retries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    /// Physically impossible or inconsistent input.
    #[error("Invalid configuration: {what}")]
    InvalidConfiguration { what: String },

    /// The selected mode needs a field the configuration does not carry.
    #[error("Missing parameter for mode {mode}: {what}")]
    MissingParameter { mode: u8, what: &'static str },

    #[error("Property lookup failed for {fluid} at {requested_state}: {source}")]
    PropertyLookupFailed {
        fluid: Refrigerant,
        requested_state: String,
        source: FluidError,
    },

    /// Compression leg with p_out <= p_in.
    #[error("Invalid pressure ratio {ratio:.4} in {stage}")]
    InvalidPressureRatio { stage: String, ratio: f64 },

    #[error("Component error in {stage}: {source}")]
    Component {
        stage: String,
        source: ComponentError,
    },

    #[error("Internal invariant violated: {what}")]
    Invariant { what: String },
}

impl CalculationError {
    pub fn invalid(what: impl Into<String>) -> Self {
        CalculationError::InvalidConfiguration { what: what.into() }
    }

    pub fn lookup(fluid: Refrigerant, source: FluidError) -> Self {
        let requested_state = source
            .requested_state()
            .map(str::to_string)
            .unwrap_or_else(|| "unspecified state".to_string());
        CalculationError::PropertyLookupFailed {
            fluid,
            requested_state,
            source,
        }
    }

    /// Attach stage context to a component failure.
    pub fn component(fluid: Refrigerant, stage: &str, err: ComponentError) -> Self {
        match err {
            ComponentError::Property(source) => Self::lookup(fluid, source),
            ComponentError::InvalidPressureRatio { ratio } => {
                CalculationError::InvalidPressureRatio {
                    stage: stage.to_string(),
                    ratio,
                }
            }
            other => CalculationError::Component {
                stage: stage.to_string(),
                source: other,
            },
        }
    }

    /// Whether re-running with the same input could succeed. Always false.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

impl From<CalculationError> for RcError {
    fn from(e: CalculationError) -> Self {
        RcError::Invariant {
            what: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_property_error_becomes_lookup_failure() {
        let source = FluidError::OutOfRange {
            fluid: "R744".into(),
            input: "T=318.150 K, Q=0.0000".into(),
            message: "above critical point".into(),
        };
        let err = CalculationError::component(
            Refrigerant::CarbonDioxide,
            "stage 1",
            ComponentError::Property(source),
        );
        match err {
            CalculationError::PropertyLookupFailed {
                fluid,
                requested_state,
                ..
            } => {
                assert_eq!(fluid, Refrigerant::CarbonDioxide);
                assert!(requested_state.contains("318.150 K"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn ratio_error_keeps_stage() {
        let err = CalculationError::component(
            Refrigerant::Ammonia,
            "high stage",
            ComponentError::InvalidPressureRatio { ratio: 0.9 },
        );
        assert!(err.to_string().contains("high stage"));
        assert!(!err.is_retryable());
    }
}
