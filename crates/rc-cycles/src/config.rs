//! Cycle configuration.
//!
//! A `CycleConfiguration` is an immutable value object. Which optional sections a
//! calculation needs depends on the mode; the orchestrator checks completeness before
//! any property lookup.

use rc_components::{CompressorSpec, OilDilution};
use rc_core::units::{MassRate, Power, Pressure, TempInterval, Temperature, dk};
use rc_fluids::Refrigerant;

/// A saturation level, given either way.
///
/// Saturation temperatures are dew-point temperatures; for blends with glide this
/// fixes the pressure unambiguously.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    SaturationTemperature(Temperature),
    Pressure(Pressure),
}

impl Condition {
    pub fn temperature(&self) -> Option<Temperature> {
        match self {
            Condition::SaturationTemperature(t) => Some(*t),
            Condition::Pressure(_) => None,
        }
    }

    pub fn pressure(&self) -> Option<Pressure> {
        match self {
            Condition::Pressure(p) => Some(*p),
            Condition::SaturationTemperature(_) => None,
        }
    }
}

/// What the cycle must deliver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Duty {
    /// Refrigerant mass flow through the evaporator.
    MassFlow(MassRate),
    /// Evaporator capacity.
    CoolingCapacity(Power),
    /// Heat rejected by the condenser (and subcooler, if any).
    HeatingCapacity(Power),
}

/// Intermediate (economizer) pressure level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intermediate {
    Pressure(Pressure),
    SaturationTemperature(Temperature),
    /// Equal pressure ratio across all stages: p_k = p_e·(p_c/p_e)^(k/(N+1)).
    EqualPressureRatio,
}

impl Intermediate {
    /// Same level expressed as a `Condition`, when it is given explicitly.
    pub fn as_condition(&self) -> Option<Condition> {
        match self {
            Intermediate::Pressure(p) => Some(Condition::Pressure(*p)),
            Intermediate::SaturationTemperature(t) => Some(Condition::SaturationTemperature(*t)),
            Intermediate::EqualPressureRatio => None,
        }
    }
}

/// High-temperature loop of a cascade (mode 4).
///
/// The main configuration describes the low loop's evaporator and the high loop's
/// condenser; this section fills in the coupling.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeLoop {
    pub high_fluid: Refrigerant,
    /// Low-loop condensing level in the cascade heat exchanger.
    pub cascade_condensing: Condition,
    /// High-loop evaporating temperature sits this far below the low loop's condensing.
    pub approach: TempInterval,
    pub high_superheat: TempInterval,
    pub high_subcooling: TempInterval,
}

impl CascadeLoop {
    pub fn new(high_fluid: Refrigerant, cascade_condensing: Condition, approach: TempInterval) -> Self {
        Self {
            high_fluid,
            cascade_condensing,
            approach,
            high_superheat: dk(0.0),
            high_subcooling: dk(0.0),
        }
    }

    pub fn with_superheat(mut self, superheat: TempInterval) -> Self {
        self.high_superheat = superheat;
        self
    }

    pub fn with_subcooling(mut self, subcooling: TempInterval) -> Self {
        self.high_subcooling = subcooling;
        self
    }
}

/// Heat-sink side of the ammonia heat pump (mode 7).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatDelivery {
    /// Temperature of the delivered heat (e.g. hot-water supply).
    pub supply_temperature: Temperature,
    /// Condensing temperature minus supply temperature.
    pub approach: TempInterval,
}

/// Per-mode input bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleConfiguration {
    pub fluid: Refrigerant,
    pub evaporating: Condition,
    /// Required by every mode except 7, which derives it from `heat_delivery`.
    pub condensing: Option<Condition>,
    pub superheat: TempInterval,
    pub subcooling: TempInterval,
    /// Stage `i` uses `compressors[min(i, len - 1)]`; one spec serves every stage.
    pub compressors: Vec<CompressorSpec>,
    /// When absent, the low-stage compressor's swept volume sizes the cycle.
    pub duty: Option<Duty>,
    /// Modes 3 (two-stage) and 5.
    pub intermediate: Option<Intermediate>,
    /// Mode 6: exactly two levels, lower first.
    pub economizers: Vec<Intermediate>,
    /// Mode 5: subcooled liquid ends this far above T_sat(p_int). Defaults to 0 K.
    pub subcooler_approach: Option<TempInterval>,
    /// Mode 2.
    pub oil: Option<OilDilution>,
    /// Mode 4.
    pub cascade: Option<CascadeLoop>,
    /// Mode 7.
    pub heat_delivery: Option<HeatDelivery>,
}

impl CycleConfiguration {
    pub fn new(fluid: Refrigerant, evaporating: Condition) -> Self {
        Self {
            fluid,
            evaporating,
            condensing: None,
            superheat: dk(0.0),
            subcooling: dk(0.0),
            compressors: Vec::new(),
            duty: None,
            intermediate: None,
            economizers: Vec::new(),
            subcooler_approach: None,
            oil: None,
            cascade: None,
            heat_delivery: None,
        }
    }

    pub fn with_condensing(mut self, condensing: Condition) -> Self {
        self.condensing = Some(condensing);
        self
    }

    pub fn with_superheat(mut self, superheat: TempInterval) -> Self {
        self.superheat = superheat;
        self
    }

    pub fn with_subcooling(mut self, subcooling: TempInterval) -> Self {
        self.subcooling = subcooling;
        self
    }

    /// Append a compressor; call once per stage, lowest stage first.
    pub fn with_compressor(mut self, spec: CompressorSpec) -> Self {
        self.compressors.push(spec);
        self
    }

    pub fn with_duty(mut self, duty: Duty) -> Self {
        self.duty = Some(duty);
        self
    }

    pub fn with_intermediate(mut self, intermediate: Intermediate) -> Self {
        self.intermediate = Some(intermediate);
        self
    }

    pub fn with_economizers(mut self, lower: Intermediate, upper: Intermediate) -> Self {
        self.economizers = vec![lower, upper];
        self
    }

    pub fn with_subcooler_approach(mut self, approach: TempInterval) -> Self {
        self.subcooler_approach = Some(approach);
        self
    }

    pub fn with_oil(mut self, oil: OilDilution) -> Self {
        self.oil = Some(oil);
        self
    }

    pub fn with_cascade(mut self, cascade: CascadeLoop) -> Self {
        self.cascade = Some(cascade);
        self
    }

    pub fn with_heat_delivery(mut self, heat_delivery: HeatDelivery) -> Self {
        self.heat_delivery = Some(heat_delivery);
        self
    }

    /// Compressor for stage `index` (0 = lowest).
    pub fn compressor(&self, index: usize) -> Option<&CompressorSpec> {
        let last = self.compressors.len().checked_sub(1)?;
        self.compressors.get(index.min(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_core::units::degc;

    #[test]
    fn compressor_index_reuses_last_spec() {
        let cfg = CycleConfiguration::new(
            Refrigerant::Ammonia,
            Condition::SaturationTemperature(degc(-30.0)),
        )
        .with_compressor(CompressorSpec::isentropic(0.7).named("low"))
        .with_compressor(CompressorSpec::isentropic(0.75).named("high"));

        assert_eq!(cfg.compressor(0).map(|c| c.name.as_str()), Some("low"));
        assert_eq!(cfg.compressor(1).map(|c| c.name.as_str()), Some("high"));
        assert_eq!(cfg.compressor(2).map(|c| c.name.as_str()), Some("high"));
    }

    #[test]
    fn no_compressor_yields_none() {
        let cfg = CycleConfiguration::new(
            Refrigerant::R134a,
            Condition::SaturationTemperature(degc(-10.0)),
        );
        assert!(cfg.compressor(0).is_none());
    }

    #[test]
    fn condition_accessors() {
        let t = Condition::SaturationTemperature(degc(5.0));
        assert!(t.temperature().is_some());
        assert!(t.pressure().is_none());
        assert!(Intermediate::EqualPressureRatio.as_condition().is_none());
    }
}
