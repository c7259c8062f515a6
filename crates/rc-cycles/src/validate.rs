//! Configuration checks that need no property lookup.
//!
//! Completeness for the selected mode is reported as `MissingParameter`; anything
//! physically impossible as `InvalidConfiguration`. Saturation levels given the same
//! way (two temperatures, or two pressures of one fluid) are ordered here; mixed pairs
//! are ordered by the solvers once resolved to pressures.

use crate::config::{Condition, CycleConfiguration, Duty};
use crate::error::{CalcResult, CalculationError};
use crate::mode::CycleMode;
use crate::solver::require;
use rc_core::units::TempInterval;
use rc_fluids::Refrigerant;

pub(crate) fn check(mode: CycleMode, config: &CycleConfiguration) -> CalcResult<()> {
    check_sections(mode, config)?;
    check_values(config)?;
    check_ordering(mode, config)
}

fn missing(mode: CycleMode, what: &'static str) -> CalculationError {
    CalculationError::MissingParameter {
        mode: mode.number(),
        what,
    }
}

fn check_sections(mode: CycleMode, config: &CycleConfiguration) -> CalcResult<()> {
    if config.compressors.is_empty() {
        return Err(missing(mode, "compressor specification"));
    }
    if config.duty.is_none()
        && config
            .compressor(0)
            .and_then(|c| c.swept_volume)
            .is_none()
    {
        return Err(missing(mode, "duty or low-stage swept volume"));
    }

    match mode {
        CycleMode::AmmoniaHeatPump => {
            if config.condensing.is_some() {
                return Err(CalculationError::invalid(
                    "mode 7 derives the condensing level from heat delivery; \
                     remove the condensing condition",
                ));
            }
            if config.fluid != Refrigerant::Ammonia {
                return Err(CalculationError::invalid(format!(
                    "mode 7 is an ammonia heat pump; got {}",
                    config.fluid
                )));
            }
            require(config.heat_delivery, mode, "heat delivery")?;
        }
        _ => {
            require(config.condensing, mode, "condensing condition")?;
        }
    }

    match mode {
        CycleMode::SingleStageOil => {
            require(config.oil.as_ref(), mode, "oil dilution")?;
            let pressure_given = matches!(config.evaporating, Condition::Pressure(_))
                || matches!(config.condensing, Some(Condition::Pressure(_)));
            if pressure_given {
                return Err(CalculationError::invalid(
                    "mode 2 levels must be mixture saturation temperatures, not pressures",
                ));
            }
        }
        CycleMode::TwoStageFlash | CycleMode::TwoStageSubcooled => {
            require(config.intermediate, mode, "intermediate pressure")?;
        }
        CycleMode::TwoStageDoubleEconomizer => match config.economizers.len() {
            0 | 1 => return Err(missing(mode, "two economizer levels")),
            2 => {}
            n => {
                return Err(CalculationError::invalid(format!(
                    "mode 6 takes exactly 2 economizer levels, got {n}"
                )));
            }
        },
        CycleMode::Cascade => {
            require(config.cascade.as_ref(), mode, "cascade loop")?;
        }
        CycleMode::SingleStage | CycleMode::AmmoniaHeatPump => {}
    }
    Ok(())
}

fn check_condition(condition: Condition, what: &str) -> CalcResult<()> {
    let (value, unit) = match condition {
        Condition::SaturationTemperature(t) => (t.value, "K"),
        Condition::Pressure(p) => (p.value, "Pa"),
    };
    if !value.is_finite() || value <= 0.0 {
        return Err(CalculationError::invalid(format!(
            "{what} must be finite and positive, got {value} {unit}"
        )));
    }
    Ok(())
}

fn check_margin(margin: TempInterval, what: &str) -> CalcResult<()> {
    if !margin.value.is_finite() || margin.value < 0.0 {
        return Err(CalculationError::invalid(format!(
            "{what} must be finite and non-negative, got {} K",
            margin.value
        )));
    }
    Ok(())
}

fn check_values(config: &CycleConfiguration) -> CalcResult<()> {
    check_condition(config.evaporating, "evaporating level")?;
    if let Some(c) = config.condensing {
        check_condition(c, "condensing level")?;
    }
    if let Some(c) = config.intermediate.and_then(|i| i.as_condition()) {
        check_condition(c, "intermediate level")?;
    }
    for c in config.economizers.iter().filter_map(|i| i.as_condition()) {
        check_condition(c, "economizer level")?;
    }
    check_margin(config.superheat, "superheat")?;
    check_margin(config.subcooling, "subcooling")?;
    if let Some(a) = config.subcooler_approach {
        check_margin(a, "subcooler approach")?;
    }

    for (i, spec) in config.compressors.iter().enumerate() {
        spec.validate().map_err(|e| {
            CalculationError::invalid(format!("compressor {} ({}): {e}", i + 1, spec.name))
        })?;
    }

    if let Some(duty) = config.duty {
        let (value, what) = match duty {
            Duty::MassFlow(m) => (m.value, "mass flow"),
            Duty::CoolingCapacity(q) => (q.value, "cooling capacity"),
            Duty::HeatingCapacity(q) => (q.value, "heating capacity"),
        };
        if !value.is_finite() || value <= 0.0 {
            return Err(CalculationError::invalid(format!(
                "{what} duty must be finite and positive, got {value}"
            )));
        }
    }

    if let Some(oil) = &config.oil {
        oil.validate()
            .map_err(|e| CalculationError::invalid(format!("oil dilution: {e}")))?;
    }
    if let Some(cascade) = &config.cascade {
        check_condition(cascade.cascade_condensing, "cascade condensing level")?;
        check_margin(cascade.approach, "cascade approach")?;
        check_margin(cascade.high_superheat, "high-loop superheat")?;
        check_margin(cascade.high_subcooling, "high-loop subcooling")?;
    }
    if let Some(delivery) = config.heat_delivery {
        check_condition(
            Condition::SaturationTemperature(delivery.supply_temperature),
            "supply temperature",
        )?;
        check_margin(delivery.approach, "heat delivery approach")?;
    }
    Ok(())
}

/// Strictly increasing among levels stated the same way.
fn check_chain(levels: &[(&str, Condition)]) -> CalcResult<()> {
    for (i, (lower_name, lower)) in levels.iter().enumerate() {
        for (upper_name, upper) in &levels[i + 1..] {
            let out_of_order = match (lower, upper) {
                (Condition::SaturationTemperature(a), Condition::SaturationTemperature(b)) => {
                    a.value >= b.value
                }
                (Condition::Pressure(a), Condition::Pressure(b)) => a.value >= b.value,
                _ => false,
            };
            if out_of_order {
                return Err(CalculationError::invalid(format!(
                    "{lower_name} level must be below {upper_name} level"
                )));
            }
        }
    }
    Ok(())
}

fn check_ordering(mode: CycleMode, config: &CycleConfiguration) -> CalcResult<()> {
    let evaporating = ("evaporating", config.evaporating);
    match mode {
        CycleMode::Cascade => {
            let Some(cascade) = &config.cascade else {
                return Ok(());
            };
            check_chain(&[evaporating, ("cascade condensing", cascade.cascade_condensing)])?;
            let condensing = config.condensing.and_then(|c| c.temperature());
            if let (Some(te), Some(tc)) = (config.evaporating.temperature(), condensing) {
                if te.value >= tc.value {
                    return Err(CalculationError::invalid(
                        "evaporating temperature must be below the high-loop condensing temperature",
                    ));
                }
            }
            if let (Some(tcc), Some(tc)) = (cascade.cascade_condensing.temperature(), condensing) {
                if tcc.value - cascade.approach.value >= tc.value {
                    return Err(CalculationError::invalid(
                        "high-loop evaporating temperature must be below its condensing temperature",
                    ));
                }
            }
            Ok(())
        }
        CycleMode::AmmoniaHeatPump => {
            let (Some(te), Some(delivery)) = (config.evaporating.temperature(), config.heat_delivery)
            else {
                return Ok(());
            };
            if te.value >= delivery.supply_temperature.value + delivery.approach.value {
                return Err(CalculationError::invalid(
                    "evaporating temperature must be below supply temperature plus approach",
                ));
            }
            Ok(())
        }
        _ => {
            let mut levels = vec![evaporating];
            if matches!(mode, CycleMode::TwoStageFlash | CycleMode::TwoStageSubcooled) {
                if let Some(c) = config.intermediate.and_then(|i| i.as_condition()) {
                    levels.push(("intermediate", c));
                }
            }
            if mode == CycleMode::TwoStageDoubleEconomizer {
                for (name, level) in ["lower economizer", "upper economizer"]
                    .into_iter()
                    .zip(&config.economizers)
                {
                    if let Some(c) = level.as_condition() {
                        levels.push((name, c));
                    }
                }
            }
            if let Some(c) = config.condensing {
                levels.push(("condensing", c));
            }
            check_chain(&levels)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CascadeLoop, HeatDelivery, Intermediate};
    use rc_components::{CompressorSpec, OilDilution};
    use rc_core::units::{bar, degc, dk, kw, m3ph};

    fn base(mode_fluid: Refrigerant) -> CycleConfiguration {
        CycleConfiguration::new(mode_fluid, Condition::SaturationTemperature(degc(-10.0)))
            .with_condensing(Condition::SaturationTemperature(degc(40.0)))
            .with_compressor(CompressorSpec::isentropic(0.7))
            .with_duty(Duty::CoolingCapacity(kw(100.0)))
    }

    #[test]
    fn complete_single_stage_passes() {
        assert!(check(CycleMode::SingleStage, &base(Refrigerant::R134a)).is_ok());
    }

    #[test]
    fn missing_sections_are_named() {
        let cfg = base(Refrigerant::Ammonia);
        let cases = [
            (CycleMode::SingleStageOil, "oil dilution"),
            (CycleMode::TwoStageFlash, "intermediate pressure"),
            (CycleMode::TwoStageSubcooled, "intermediate pressure"),
            (CycleMode::TwoStageDoubleEconomizer, "two economizer levels"),
            (CycleMode::Cascade, "cascade loop"),
        ];
        for (mode, what) in cases {
            match check(mode, &cfg) {
                Err(CalculationError::MissingParameter { what: w, .. }) => assert_eq!(w, what),
                other => panic!("{mode}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn oil_mode_rejects_pressure_levels() {
        let oil = OilDilution {
            oil_mass_fraction: 0.05,
            temperature_shift_coefficient: dk(40.0),
        };
        let mut cfg = base(Refrigerant::R134a).with_oil(oil);
        assert!(check(CycleMode::SingleStageOil, &cfg).is_ok());

        cfg.condensing = Some(Condition::Pressure(bar(10.0)));
        assert!(matches!(
            check(CycleMode::SingleStageOil, &cfg),
            Err(CalculationError::InvalidConfiguration { .. })
        ));

        let mut cfg = base(Refrigerant::R134a).with_oil(oil);
        cfg.evaporating = Condition::Pressure(bar(2.0));
        assert!(matches!(
            check(CycleMode::SingleStageOil, &cfg),
            Err(CalculationError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn displacement_replaces_duty() {
        let mut cfg = base(Refrigerant::Ammonia);
        cfg.duty = None;
        assert!(matches!(
            check(CycleMode::SingleStage, &cfg),
            Err(CalculationError::MissingParameter { .. })
        ));
        cfg.compressors = vec![CompressorSpec::isentropic(0.7).with_swept_volume(m3ph(200.0))];
        assert!(check(CycleMode::SingleStage, &cfg).is_ok());
    }

    #[test]
    fn negative_margins_and_duty_rejected() {
        let cfg = base(Refrigerant::R134a).with_superheat(dk(-1.0));
        assert!(matches!(
            check(CycleMode::SingleStage, &cfg),
            Err(CalculationError::InvalidConfiguration { .. })
        ));
        let cfg = base(Refrigerant::R134a).with_duty(Duty::CoolingCapacity(kw(0.0)));
        assert!(check(CycleMode::SingleStage, &cfg).is_err());
        let cfg = base(Refrigerant::R134a).with_oil(OilDilution {
            oil_mass_fraction: 1.0,
            temperature_shift_coefficient: dk(10.0),
        });
        assert!(check(CycleMode::SingleStageOil, &cfg).is_err());
    }

    #[test]
    fn like_kind_levels_are_ordered() {
        let cfg = base(Refrigerant::Ammonia)
            .with_intermediate(Intermediate::SaturationTemperature(degc(50.0)));
        assert!(check(CycleMode::TwoStageFlash, &cfg).is_err());

        let cfg = base(Refrigerant::Ammonia).with_economizers(
            Intermediate::SaturationTemperature(degc(10.0)),
            Intermediate::SaturationTemperature(degc(0.0)),
        );
        assert!(check(CycleMode::TwoStageDoubleEconomizer, &cfg).is_err());

        // Mixed kinds are left to the solver.
        let cfg = base(Refrigerant::Ammonia).with_intermediate(Intermediate::Pressure(bar(4.0)));
        assert!(check(CycleMode::TwoStageFlash, &cfg).is_ok());
    }

    #[test]
    fn cascade_and_heat_pump_ordering() {
        let cfg = base(Refrigerant::CarbonDioxide).with_cascade(CascadeLoop::new(
            Refrigerant::Ammonia,
            Condition::SaturationTemperature(degc(-20.0)),
            dk(5.0),
        ));
        assert!(check(CycleMode::Cascade, &cfg).is_err());

        let mut cfg = base(Refrigerant::Ammonia).with_heat_delivery(HeatDelivery {
            supply_temperature: degc(60.0),
            approach: dk(5.0),
        });
        assert!(check(CycleMode::AmmoniaHeatPump, &cfg).is_err());
        cfg.condensing = None;
        assert!(check(CycleMode::AmmoniaHeatPump, &cfg).is_ok());
        cfg.fluid = Refrigerant::R134a;
        assert!(check(CycleMode::AmmoniaHeatPump, &cfg).is_err());
    }
}
