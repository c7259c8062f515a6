//! CoolProp-based property provider.

use crate::error::{FluidError, FluidResult};
use crate::provider::{PropertyProvider, validation};
use crate::refrigerant::{BackendSubstance, Refrigerant};
use crate::state::{StateInput, StateProperties};
use rc_core::units::{Density, k, pa};
use rfluids::prelude::*;
use tracing::trace;
use uom::si::mass_density::kilogram_per_cubic_meter;

/// CoolProp backend for refrigerant properties.
///
/// Every lookup builds a fresh rfluids state, so the provider itself holds no mutable
/// data and can be shared between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoolPropProvider;

impl CoolPropProvider {
    /// Create a new CoolProp provider.
    pub fn new() -> Self {
        Self
    }

    fn fluid_in_state(&self, fluid: Refrigerant, input: &StateInput) -> FluidResult<Fluid> {
        let (a, b) = match *input {
            StateInput::PT { p, t } => (
                FluidInput::pressure(p.value),
                FluidInput::temperature(t.value),
            ),
            StateInput::PH { p, h } => (FluidInput::pressure(p.value), FluidInput::enthalpy(h)),
            StateInput::PS { p, s } => (FluidInput::pressure(p.value), FluidInput::entropy(s)),
            StateInput::PQ { p, q } => (FluidInput::pressure(p.value), FluidInput::quality(q)),
            StateInput::TQ { t, q } => (FluidInput::temperature(t.value), FluidInput::quality(q)),
        };

        build(fluid, a, b).map_err(|message| rejected(fluid, input, message, self.supports(fluid)))
    }
}

fn build(fluid: Refrigerant, a: FluidInput, b: FluidInput) -> Result<Fluid, String> {
    let built = match fluid.backend_substance() {
        BackendSubstance::Pure(pure) => Fluid::from(pure).in_state(a, b),
        BackendSubstance::Mix(mix) => Fluid::from(mix).in_state(a, b),
    };
    built.map_err(|e| e.to_string())
}

/// Dew point at 0 °C lies inside the two-phase region of every catalogued refrigerant.
fn reference_state() -> (FluidInput, FluidInput) {
    (FluidInput::temperature(273.15), FluidInput::quality(1.0))
}

/// Classify a failed state construction. A fluid the backend cannot load at its
/// reference state is unsupported; otherwise the requested state is out of range.
fn rejected(fluid: Refrigerant, input: &StateInput, message: String, loadable: bool) -> FluidError {
    trace!(fluid = fluid.key(), %input, %message, loadable, "backend rejected state");
    if loadable {
        FluidError::OutOfRange {
            fluid: fluid.key().to_string(),
            input: input.to_string(),
            message,
        }
    } else {
        FluidError::UnsupportedFluid {
            fluid: fluid.key().to_string(),
            input: input.to_string(),
        }
    }
}

fn out_of_range(fluid: Refrigerant, input: &StateInput, message: String) -> FluidError {
    rejected(fluid, input, message, true)
}

impl PropertyProvider for CoolPropProvider {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn supports(&self, fluid: Refrigerant) -> bool {
        let (a, b) = reference_state();
        build(fluid, a, b).is_ok()
    }

    fn lookup(&self, fluid: Refrigerant, input: StateInput) -> FluidResult<StateProperties> {
        validation::validate_input(&input)?;

        let mut state = self.fluid_in_state(fluid, &input)?;
        let output = |name: &str, e: String| out_of_range(fluid, &input, format!("{name}: {e}"));

        let pressure = state
            .pressure()
            .map_err(|e| output("pressure", format!("{}", e)))?;
        let temperature = state
            .temperature()
            .map_err(|e| output("temperature", format!("{}", e)))?;
        let density = state
            .density()
            .map_err(|e| output("density", format!("{}", e)))?;
        let enthalpy = state
            .enthalpy()
            .map_err(|e| output("enthalpy", format!("{}", e)))?;
        let entropy = state
            .entropy()
            .map_err(|e| output("entropy", format!("{}", e)))?;

        // CoolProp reports a sentinel outside [0, 1] for single-phase states.
        let quality = match input {
            StateInput::PQ { q, .. } | StateInput::TQ { q, .. } => Some(q),
            _ => state.quality().ok().filter(|q| (0.0..=1.0).contains(q)),
        };

        let props = StateProperties {
            pressure: pa(pressure),
            temperature: k(temperature),
            density: Density::new::<kilogram_per_cubic_meter>(density),
            enthalpy,
            entropy,
            quality,
        };
        validation::validate_output(&props)?;
        Ok(props)
    }
}
