//! Property provider trait and validation helpers.

use crate::error::FluidResult;
use crate::refrigerant::Refrigerant;
use crate::state::{StateInput, StateProperties};

/// Source of refrigerant properties.
///
/// Given a fluid and two independent properties, return the full property bundle.
/// Lookups are deterministic and side-effect-free from the caller's point of view;
/// a backend may cache internally. Unsupported fluids and states outside the valid
/// region are reported as errors, never as silently-wrong numbers.
pub trait PropertyProvider {
    /// Get the provider name (for debugging/logging).
    fn name(&self) -> &str;

    /// Check if this provider has an equation of state for the fluid.
    fn supports(&self, fluid: Refrigerant) -> bool;

    /// Look up the state fixed by `input`.
    fn lookup(&self, fluid: Refrigerant, input: StateInput) -> FluidResult<StateProperties>;
}

impl<P: PropertyProvider + ?Sized> PropertyProvider for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn supports(&self, fluid: Refrigerant) -> bool {
        (**self).supports(fluid)
    }

    fn lookup(&self, fluid: Refrigerant, input: StateInput) -> FluidResult<StateProperties> {
        (**self).lookup(fluid, input)
    }
}

/// Validation helpers for lookup inputs and outputs.
pub(crate) mod validation {
    use crate::error::{FluidError, FluidResult};
    use crate::state::{StateInput, StateProperties};

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: f64) -> FluidResult<()> {
        if !p.is_finite() || p <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: f64) -> FluidResult<()> {
        if !t.is_finite() || t <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure quality lies in [0, 1].
    pub fn validate_quality(q: f64) -> FluidResult<()> {
        if !q.is_finite() || !(0.0..=1.0).contains(&q) {
            return Err(FluidError::InvalidArg {
                what: "quality must lie in [0, 1]",
            });
        }
        Ok(())
    }

    /// Ensure a caloric property is finite (can be negative).
    pub fn validate_finite(v: f64, what: &'static str) -> FluidResult<()> {
        if !v.is_finite() {
            return Err(FluidError::NonPhysical { what });
        }
        Ok(())
    }

    /// Check both halves of a state input before it reaches the backend.
    pub fn validate_input(input: &StateInput) -> FluidResult<()> {
        match *input {
            StateInput::PT { p, t } => {
                validate_pressure(p.value)?;
                validate_temperature(t.value)
            }
            StateInput::PH { p, h } => {
                validate_pressure(p.value)?;
                validate_finite(h, "enthalpy must be finite")
            }
            StateInput::PS { p, s } => {
                validate_pressure(p.value)?;
                validate_finite(s, "entropy must be finite")
            }
            StateInput::PQ { p, q } => {
                validate_pressure(p.value)?;
                validate_quality(q)
            }
            StateInput::TQ { t, q } => {
                validate_temperature(t.value)?;
                validate_quality(q)
            }
        }
    }

    /// Check a backend result for physical plausibility.
    pub fn validate_output(props: &StateProperties) -> FluidResult<()> {
        validate_pressure(props.pressure.value)?;
        validate_temperature(props.temperature.value)?;
        if !props.density.value.is_finite() || props.density.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        validate_finite(props.enthalpy, "enthalpy must be finite")?;
        validate_finite(props.entropy, "entropy must be finite")
    }
}
