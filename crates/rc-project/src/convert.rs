//! File definitions → calculator inputs.

use crate::schema::{
    CascadeDef, CaseDef, CharacteristicDef, CompressorDef, DutyDef, IntermediateDef, LevelDef,
    MotorDef,
};
use crate::validate::ValidationError;
use rc_components::{Characteristic, CompressorSpec, MotorEfficiency, OilDilution};
use rc_core::units::{bar, degc, dk, kgps, kw, m3ph};
use rc_cycles::{
    CascadeLoop, Condition, CycleConfiguration, CycleMode, Duty, HeatDelivery, Intermediate,
};
use rc_fluids::Refrigerant;

fn invalid(field: impl Into<String>, value: impl ToString, reason: impl ToString) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn parse_fluid(field: &str, name: &str) -> Result<Refrigerant, ValidationError> {
    name.parse().map_err(|e| invalid(field, name, e))
}

impl LevelDef {
    pub fn to_condition(self) -> Condition {
        match self {
            LevelDef::SaturationTemperature { t_c } => Condition::SaturationTemperature(degc(t_c)),
            LevelDef::Pressure { p_bar } => Condition::Pressure(bar(p_bar)),
        }
    }
}

impl IntermediateDef {
    pub fn to_intermediate(self) -> Intermediate {
        match self {
            IntermediateDef::SaturationTemperature { t_c } => {
                Intermediate::SaturationTemperature(degc(t_c))
            }
            IntermediateDef::Pressure { p_bar } => Intermediate::Pressure(bar(p_bar)),
            IntermediateDef::EqualPressureRatio => Intermediate::EqualPressureRatio,
        }
    }
}

impl DutyDef {
    pub fn to_duty(self) -> Duty {
        match self {
            DutyDef::MassFlow { kg_per_s } => Duty::MassFlow(kgps(kg_per_s)),
            DutyDef::CoolingCapacity { kw: q } => Duty::CoolingCapacity(kw(q)),
            DutyDef::HeatingCapacity { kw: q } => Duty::HeatingCapacity(kw(q)),
        }
    }
}

impl CharacteristicDef {
    pub fn to_characteristic(&self, field: &str) -> Result<Characteristic, ValidationError> {
        let built = match self {
            CharacteristicDef::Constant { value } => Ok(Characteristic::constant(*value)),
            CharacteristicDef::Polynomial {
                coefficients,
                min,
                max,
            } => Characteristic::polynomial(coefficients.clone(), *min, *max),
            CharacteristicDef::Curve { points } => {
                Characteristic::curve(points.iter().map(|[x, y]| (*x, *y)).collect())
            }
        };
        built.map_err(|e| invalid(field, format!("{self:?}"), e))
    }
}

impl CompressorDef {
    pub fn to_spec(&self, field: &str) -> Result<CompressorSpec, ValidationError> {
        let mut spec = CompressorSpec::with_characteristic(
            self.isentropic
                .to_characteristic(&format!("{field}.isentropic"))?,
        )
        .named(self.name.clone())
        .with_mechanical_efficiency(self.mechanical_efficiency);
        if let Some(volumetric) = &self.volumetric {
            spec = spec.with_volumetric_efficiency(
                volumetric.to_characteristic(&format!("{field}.volumetric"))?,
            );
        }
        if let Some(swept) = self.swept_volume_m3_per_h {
            spec = spec.with_swept_volume(m3ph(swept));
        }
        let motor = match &self.motor {
            MotorDef::Constant { efficiency } => MotorEfficiency::Constant(*efficiency),
            MotorDef::LoadDependent {
                rated_shaft_kw,
                curve,
            } => MotorEfficiency::LoadDependent {
                rated_shaft_power: kw(*rated_shaft_kw),
                curve: curve.to_characteristic(&format!("{field}.motor.curve"))?,
            },
        };
        spec = spec.with_motor(motor);
        spec.validate().map_err(|e| invalid(field, &self.name, e))?;
        Ok(spec)
    }
}

impl CascadeDef {
    pub fn to_loop(&self, field: &str) -> Result<CascadeLoop, ValidationError> {
        let high_fluid = parse_fluid(&format!("{field}.high_fluid"), &self.high_fluid)?;
        Ok(CascadeLoop::new(
            high_fluid,
            self.cascade_condensing.to_condition(),
            dk(self.approach_k),
        )
        .with_superheat(dk(self.high_superheat_k))
        .with_subcooling(dk(self.high_subcooling_k)))
    }
}

impl CaseDef {
    pub fn cycle_mode(&self) -> Result<CycleMode, ValidationError> {
        CycleMode::from_number(self.mode, self.two_stage).ok_or_else(|| {
            invalid(
                format!("cases.{}.mode", self.id),
                self.mode,
                "mode must be 2-7",
            )
        })
    }

    /// Build the calculator input. Structural problems are reported here; physical
    /// consistency is left to the calculator.
    pub fn to_configuration(&self) -> Result<CycleConfiguration, ValidationError> {
        let field = |name: &str| format!("cases.{}.{name}", self.id);

        let fluid = parse_fluid(&field("fluid"), &self.fluid)?;
        let mut config = CycleConfiguration::new(fluid, self.evaporating.to_condition())
            .with_superheat(dk(self.superheat_k))
            .with_subcooling(dk(self.subcooling_k));
        config.condensing = self.condensing.map(LevelDef::to_condition);
        config.duty = self.duty.map(DutyDef::to_duty);
        config.intermediate = self.intermediate.map(IntermediateDef::to_intermediate);
        config.economizers = self
            .economizers
            .iter()
            .map(|e| e.to_intermediate())
            .collect();
        config.subcooler_approach = self.subcooler_approach_k.map(dk);
        config.heat_delivery = self.heat_delivery.map(|h| HeatDelivery {
            supply_temperature: degc(h.supply_temperature_c),
            approach: dk(h.approach_k),
        });

        for (i, compressor) in self.compressors.iter().enumerate() {
            config = config.with_compressor(compressor.to_spec(&field(&format!("compressors[{i}]")))?);
        }
        if let Some(oil) = self.oil {
            let dilution = OilDilution::new(oil.oil_mass_fraction, dk(oil.shift_coefficient_k))
                .map_err(|e| invalid(field("oil"), oil.oil_mass_fraction, e))?;
            config = config.with_oil(dilution);
        }
        if let Some(cascade) = &self.cascade {
            config = config.with_cascade(cascade.to_loop(&field("cascade"))?);
        }
        Ok(config)
    }
}
