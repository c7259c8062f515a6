//! Building blocks shared by the cycle walks.
//!
//! A `Walker` binds a provider to one fluid and turns every property failure into a
//! `PropertyLookupFailed` carrying that fluid.

use crate::config::Condition;
use crate::error::{CalcResult, CalculationError};
use rc_components::{CompressionOutcome, CompressorSpec, OilDilution, compress};
use rc_core::units::{Pressure, TempInterval, Temperature, k};
use rc_fluids::{
    FluidResult, PropertyProvider, Refrigerant, SaturationSide, StateInput, StateProperties,
    saturated_at_pressure, saturation_pressure, saturation_temperature,
};

/// Below this a superheat or subcooling margin is treated as zero.
const MARGIN_EPS: f64 = 1e-9;

/// Outcome of throttling into a flash tank.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FlashSplit {
    /// Two-phase state entering the tank
    pub inlet: StateProperties,
    pub liquid: StateProperties,
    pub vapor: StateProperties,
    /// Vapor mass per unit of inflow, clamped to [0, 1]
    pub vapor_fraction: f64,
}

pub(crate) struct Walker<'a> {
    provider: &'a dyn PropertyProvider,
    pub fluid: Refrigerant,
}

impl<'a> Walker<'a> {
    pub fn new(provider: &'a dyn PropertyProvider, fluid: Refrigerant) -> Self {
        Self { provider, fluid }
    }

    pub fn lookup(&self, input: StateInput) -> CalcResult<StateProperties> {
        self.wrap(self.provider.lookup(self.fluid, input))
    }

    fn wrap<T>(&self, result: FluidResult<T>) -> CalcResult<T> {
        result.map_err(|e| CalculationError::lookup(self.fluid, e))
    }

    pub fn dew(&self, p: Pressure) -> CalcResult<StateProperties> {
        self.wrap(saturated_at_pressure(self.provider, self.fluid, p, SaturationSide::Dew))
    }

    pub fn bubble(&self, p: Pressure) -> CalcResult<StateProperties> {
        self.wrap(saturated_at_pressure(self.provider, self.fluid, p, SaturationSide::Bubble))
    }

    /// Dew-point pressure at saturation temperature `t`.
    pub fn saturation_pressure(&self, t: Temperature) -> CalcResult<Pressure> {
        self.wrap(saturation_pressure(self.provider, self.fluid, t, SaturationSide::Dew))
    }

    /// Dew-point temperature at pressure `p`.
    pub fn saturation_temperature(&self, p: Pressure) -> CalcResult<Temperature> {
        self.wrap(saturation_temperature(self.provider, self.fluid, p, SaturationSide::Dew))
    }

    pub fn resolve(&self, condition: Condition) -> CalcResult<Pressure> {
        match condition {
            Condition::Pressure(p) => Ok(p),
            Condition::SaturationTemperature(t) => self.saturation_pressure(t),
        }
    }

    /// Resolve a mixture saturation temperature through the oil offset.
    ///
    /// A bare pressure carries no mixture temperature to shift and is refused.
    pub fn resolve_with_oil(&self, condition: Condition, oil: &OilDilution) -> CalcResult<Pressure> {
        match condition {
            Condition::Pressure(_) => Err(CalculationError::invalid(
                "oil-diluted levels must be given as saturation temperatures",
            )),
            Condition::SaturationTemperature(t) => {
                self.saturation_pressure(oil.lookup_temperature(t))
            }
        }
    }

    /// Saturated vapor at `p`, or superheated by `superheat` above the dew point.
    pub fn evaporator_outlet(
        &self,
        p: Pressure,
        superheat: TempInterval,
    ) -> CalcResult<StateProperties> {
        let dew = self.dew(p)?;
        if superheat.value <= MARGIN_EPS {
            return Ok(dew);
        }
        self.lookup(StateInput::PT {
            p,
            t: k(dew.temperature.value + superheat.value),
        })
    }

    /// Saturated liquid at `p`, or subcooled by `subcooling` below the bubble point.
    pub fn condenser_outlet(
        &self,
        p: Pressure,
        subcooling: TempInterval,
    ) -> CalcResult<StateProperties> {
        let bubble = self.bubble(p)?;
        if subcooling.value <= MARGIN_EPS {
            return Ok(bubble);
        }
        self.lookup(StateInput::PT {
            p,
            t: k(bubble.temperature.value - subcooling.value),
        })
    }

    /// Isenthalpic expansion to `p`.
    pub fn throttle(&self, p: Pressure, h: f64) -> CalcResult<StateProperties> {
        self.lookup(StateInput::PH { p, h })
    }

    pub fn compress(
        &self,
        stage: &str,
        inlet: &StateProperties,
        p_out: Pressure,
        spec: &CompressorSpec,
    ) -> CalcResult<CompressionOutcome> {
        compress(self.provider, self.fluid, inlet, p_out, spec)
            .map_err(|e| CalculationError::component(self.fluid, stage, e))
    }

    /// Throttle liquid of enthalpy `h_in` into a flash tank at `p`.
    ///
    /// x = (h_in - h_f) / (h_g - h_f)
    ///
    /// Liquid already colder than the tank (h_in <= h_f) does not flash; it leaves
    /// at the throttled inlet state with x = 0.
    pub fn flash(&self, p: Pressure, h_in: f64) -> CalcResult<FlashSplit> {
        let saturated = self.bubble(p)?;
        let vapor = self.dew(p)?;
        let latent = vapor.enthalpy - saturated.enthalpy;
        if latent <= 0.0 {
            return Err(CalculationError::Invariant {
                what: format!("non-positive latent heat at {:.0} Pa", p.value),
            });
        }
        let inlet = self.throttle(p, h_in)?;
        if h_in <= saturated.enthalpy {
            return Ok(FlashSplit {
                inlet,
                liquid: inlet,
                vapor,
                vapor_fraction: 0.0,
            });
        }
        let vapor_fraction = ((h_in - saturated.enthalpy) / latent).clamp(0.0, 1.0);
        Ok(FlashSplit {
            inlet,
            liquid: saturated,
            vapor,
            vapor_fraction,
        })
    }

    /// Adiabatic mixing of `(mass flow, enthalpy)` streams at `p`.
    pub fn mix(&self, p: Pressure, streams: &[(f64, f64)]) -> CalcResult<StateProperties> {
        let total: f64 = streams.iter().map(|(m, _)| m).sum();
        if total <= 0.0 {
            return Err(CalculationError::Invariant {
                what: "mixing requires positive total flow".to_string(),
            });
        }
        let h = streams.iter().map(|(m, h)| m * h).sum::<f64>() / total;
        self.lookup(StateInput::PH { p, h })
    }
}

/// Fail unless resolved pressures strictly increase along the cycle.
pub(crate) fn ensure_increasing(levels: &[(&str, Pressure)]) -> CalcResult<()> {
    for pair in levels.windows(2) {
        let (lower_name, lower) = pair[0];
        let (upper_name, upper) = pair[1];
        if lower.value >= upper.value {
            return Err(CalculationError::invalid(format!(
                "{lower_name} pressure ({:.0} Pa) must be below {upper_name} pressure ({:.0} Pa)",
                lower.value, upper.value
            )));
        }
    }
    Ok(())
}

/// p_k = p_e·(p_c/p_e)^(k/(N+1)) for level `k` of `levels`.
pub(crate) fn equal_ratio_pressure(pe: Pressure, pc: Pressure, k: usize, levels: usize) -> Pressure {
    let exponent = k as f64 / (levels + 1) as f64;
    pe * (pc.value / pe.value).powf(exponent)
}
