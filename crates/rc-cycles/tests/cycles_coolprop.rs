//! Cycle calculations against the CoolProp backend.
//!
//! Expected values are plausibility bands from refrigeration tables, not exact figures.

use rc_components::{Characteristic, CompressorSpec, OilDilution, isentropic_efficiency};
use rc_core::numeric::{Tolerances, nearly_equal};
use rc_core::units::{Temperature, bar, degc, dk, kgps, kw, m3ph};
use rc_cycles::{
    CalculationError, CalculationWarning, CascadeLoop, Condition, CycleConfiguration, CycleMode,
    CycleResult, Duty, HeatDelivery, Intermediate, calculate, condensing_temperatures,
    sweep_condensing,
};
use rc_fluids::{CoolPropProvider, Refrigerant};

const LOOSE: Tolerances = Tolerances {
    abs: 1e-6,
    rel: 1e-4,
};

fn sat(t_c: f64) -> Condition {
    Condition::SaturationTemperature(degc(t_c))
}

/// A complete configuration for `mode` condensing (or delivering) at `t_cond` °C.
fn config_for(mode: CycleMode, t_cond: f64) -> CycleConfiguration {
    let compressor = CompressorSpec::isentropic(0.7);
    let duty = Duty::CoolingCapacity(kw(100.0));
    match mode {
        CycleMode::SingleStageOil => CycleConfiguration::new(Refrigerant::Ammonia, sat(-10.0))
            .with_condensing(sat(t_cond))
            .with_superheat(dk(5.0))
            .with_subcooling(dk(5.0))
            .with_compressor(compressor)
            .with_duty(duty)
            .with_oil(OilDilution {
                oil_mass_fraction: 0.02,
                temperature_shift_coefficient: dk(50.0),
            }),
        CycleMode::SingleStage => CycleConfiguration::new(Refrigerant::Ammonia, sat(-10.0))
            .with_condensing(sat(t_cond))
            .with_superheat(dk(5.0))
            .with_subcooling(dk(5.0))
            .with_compressor(compressor)
            .with_duty(duty),
        CycleMode::TwoStageFlash | CycleMode::TwoStageSubcooled => {
            CycleConfiguration::new(Refrigerant::Ammonia, sat(-35.0))
                .with_condensing(sat(t_cond))
                .with_superheat(dk(5.0))
                .with_compressor(compressor)
                .with_duty(duty)
                .with_intermediate(Intermediate::EqualPressureRatio)
        }
        CycleMode::TwoStageDoubleEconomizer => {
            CycleConfiguration::new(Refrigerant::Ammonia, sat(-30.0))
                .with_condensing(sat(t_cond))
                .with_compressor(compressor)
                .with_duty(duty)
                .with_economizers(
                    Intermediate::SaturationTemperature(degc(-10.0)),
                    Intermediate::SaturationTemperature(degc(10.0)),
                )
        }
        CycleMode::Cascade => CycleConfiguration::new(Refrigerant::CarbonDioxide, sat(-45.0))
            .with_condensing(sat(t_cond))
            .with_superheat(dk(5.0))
            .with_compressor(compressor.clone().named("CO2"))
            .with_compressor(compressor.named("NH3"))
            .with_duty(duty)
            .with_cascade(
                CascadeLoop::new(Refrigerant::Ammonia, sat(-5.0), dk(5.0))
                    .with_superheat(dk(5.0)),
            ),
        CycleMode::AmmoniaHeatPump => CycleConfiguration::new(Refrigerant::Ammonia, sat(0.0))
            .with_superheat(dk(5.0))
            .with_compressor(compressor)
            .with_duty(duty)
            .with_heat_delivery(HeatDelivery {
                supply_temperature: degc(t_cond - 5.0),
                approach: dk(5.0),
            }),
    }
}

fn solve(mode: CycleMode, config: &CycleConfiguration) -> CycleResult {
    calculate(&CoolPropProvider::new(), mode, config).unwrap_or_else(|e| panic!("{mode}: {e}"))
}

fn assert_energy_balance(result: &CycleResult) {
    let m = &result.metrics;
    let absorbed = m.cooling_capacity.value + m.indicated_power.value;
    assert!(
        nearly_equal(absorbed, m.heat_rejected.value, LOOSE),
        "{}: in {absorbed} W, out {} W",
        result.mode,
        m.heat_rejected.value
    );
}

#[test]
fn ammonia_single_stage_reference_point() {
    let result = solve(CycleMode::SingleStage, &config_for(CycleMode::SingleStage, 40.0));
    let m = &result.metrics;

    assert!(m.cop > 3.0 && m.cop < 3.6, "COP = {}", m.cop);
    assert!(nearly_equal(m.cooling_capacity.value, 100_000.0, LOOSE));
    let discharge = result.max_discharge_temperature().unwrap();
    assert!(discharge.value > degc(40.0).value);
    assert_eq!(result.stages.len(), 1);
    assert_eq!(result.points.len(), 4);
    assert!(!result.has_warnings());
    assert_energy_balance(&result);
}

#[test]
fn cop_recomputes_from_state_points() {
    let result = solve(CycleMode::SingleStage, &config_for(CycleMode::SingleStage, 40.0));
    let h = |label: &str| result.point(label).unwrap().state.enthalpy;

    let cop = (h("evaporator outlet") - h("evaporator inlet"))
        / (h("stage 1 discharge") - h("evaporator outlet"));
    assert!(nearly_equal(cop, result.metrics.cop, LOOSE), "{cop} vs {}", result.metrics.cop);
}

#[test]
fn efficiency_recovers_from_discharge_state() {
    let provider = CoolPropProvider::new();
    let result = solve(CycleMode::SingleStage, &config_for(CycleMode::SingleStage, 40.0));
    let inlet = result.point("evaporator outlet").unwrap().state;
    let outlet = result.point("stage 1 discharge").unwrap().state;

    let eta = isentropic_efficiency(&provider, Refrigerant::Ammonia, &inlet, &outlet).unwrap();
    assert!((eta - 0.7).abs() < 1e-4, "eta = {eta}");
}

#[test]
fn cop_falls_with_condensing_temperature_in_every_mode() {
    let provider = CoolPropProvider::new();
    let temperatures: Vec<Temperature> = condensing_temperatures(degc(35.0), degc(40.0), 2);
    for mode in CycleMode::ALL {
        let config = config_for(mode, 35.0);
        let points = sweep_condensing(&provider, mode, &config, &temperatures);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].condensing_temperature, degc(35.0));

        let cops: Vec<f64> = points
            .iter()
            .map(|p| match &p.result {
                Ok(r) => r.metrics.cop,
                Err(e) => panic!("{mode}: {e}"),
            })
            .collect();
        assert!(cops[0] > cops[1], "{mode}: {cops:?}");
    }
}

#[test]
fn every_mode_closes_its_energy_balance() {
    for mode in CycleMode::ALL {
        let result = solve(mode, &config_for(mode, 35.0));
        assert_eq!(result.mode, mode);
        assert!(result.metrics.cop > 0.0);
        assert!(result.metrics.cop_electrical <= result.metrics.cop);
        assert_energy_balance(&result);
    }
}

#[test]
fn oil_dilution_lowers_suction_pressure() {
    let plain = solve(CycleMode::SingleStage, &config_for(CycleMode::SingleStage, 40.0));
    let oily = solve(CycleMode::SingleStageOil, &config_for(CycleMode::SingleStageOil, 40.0));
    assert!(oily.stages[0].suction_pressure.value < plain.stages[0].suction_pressure.value);

    let mut no_oil = config_for(CycleMode::SingleStageOil, 40.0);
    no_oil.oil = Some(OilDilution {
        oil_mass_fraction: 0.0,
        temperature_shift_coefficient: dk(50.0),
    });
    let same = solve(CycleMode::SingleStageOil, &no_oil);
    assert!(nearly_equal(same.metrics.cop, plain.metrics.cop, LOOSE));
}

#[test]
fn flash_economizer_injects_vapor_into_high_stage() {
    let result = solve(CycleMode::TwoStageFlash, &config_for(CycleMode::TwoStageFlash, 35.0));
    assert_eq!(result.stages.len(), 2);
    assert!(result.stages[1].mass_flow.value > result.stages[0].mass_flow.value);
    assert!(result.point("economizer 1 vapor").is_some());

    let single = solve(CycleMode::SingleStage, &{
        let mut cfg = config_for(CycleMode::SingleStage, 35.0);
        cfg.evaporating = sat(-35.0);
        cfg.subcooling = dk(0.0);
        cfg
    });
    assert!(result.metrics.cop > single.metrics.cop);
}

#[test]
fn double_economizer_runs_three_legs() {
    let result = solve(
        CycleMode::TwoStageDoubleEconomizer,
        &config_for(CycleMode::TwoStageDoubleEconomizer, 35.0),
    );
    assert_eq!(result.stages.len(), 3);
    let flows: Vec<f64> = result.stages.iter().map(|s| s.mass_flow.value).collect();
    assert!(flows[0] < flows[1] && flows[1] < flows[2], "{flows:?}");
    for pair in result.stages.windows(2) {
        assert!(nearly_equal(
            pair[0].discharge_pressure.value,
            pair[1].suction_pressure.value,
            LOOSE
        ));
    }
    for label in ["economizer 1 liquid", "economizer 2 liquid", "stage 3 suction"] {
        assert!(result.point(label).is_some(), "{label}");
    }
}

#[test]
fn subcooled_liquid_below_economizer_saturation_does_not_flash() {
    // Condenser liquid at 25 °C enters a tank saturated at 30 °C.
    let mut two_stage = config_for(CycleMode::TwoStageFlash, 35.0);
    two_stage.subcooling = dk(10.0);
    two_stage.intermediate = Some(Intermediate::SaturationTemperature(degc(30.0)));
    let result = solve(CycleMode::TwoStageFlash, &two_stage);
    assert_energy_balance(&result);
    assert!(nearly_equal(
        result.stages[0].mass_flow.value,
        result.stages[1].mass_flow.value,
        LOOSE
    ));
    let h_liquid = result.point("condenser outlet").unwrap().state.enthalpy;
    let h_tank = result.point("economizer 1 liquid").unwrap().state.enthalpy;
    assert!(nearly_equal(h_tank, h_liquid, LOOSE), "{h_tank} vs {h_liquid}");

    let mut double = config_for(CycleMode::TwoStageDoubleEconomizer, 35.0);
    double.subcooling = dk(10.0);
    double.economizers = vec![
        Intermediate::SaturationTemperature(degc(-10.0)),
        Intermediate::SaturationTemperature(degc(30.0)),
    ];
    let result = solve(CycleMode::TwoStageDoubleEconomizer, &double);
    assert_energy_balance(&result);
    let flows: Vec<f64> = result.stages.iter().map(|s| s.mass_flow.value).collect();
    assert!(flows[0] < flows[1], "{flows:?}");
    assert!(nearly_equal(flows[1], flows[2], LOOSE), "{flows:?}");
}

#[test]
fn oil_mode_refuses_pressure_levels() {
    let mut config = config_for(CycleMode::SingleStageOil, 40.0);
    config.condensing = Some(Condition::Pressure(bar(15.0)));
    let err = calculate(&CoolPropProvider::new(), CycleMode::SingleStageOil, &config).unwrap_err();
    assert!(
        matches!(err, CalculationError::InvalidConfiguration { .. }),
        "{err}"
    );
}

#[test]
fn double_economizer_rejects_mixed_levels_out_of_order() {
    let mut config = config_for(CycleMode::TwoStageDoubleEconomizer, 35.0);
    // 6 bar sits above the ammonia saturation pressure at -10 °C (about 2.9 bar).
    config.economizers = vec![
        Intermediate::Pressure(bar(6.0)),
        Intermediate::SaturationTemperature(degc(-10.0)),
    ];
    let err = calculate(&CoolPropProvider::new(), CycleMode::TwoStageDoubleEconomizer, &config)
        .unwrap_err();
    assert!(
        matches!(err, CalculationError::InvalidConfiguration { .. }),
        "{err}"
    );
}

#[test]
fn subcooler_duty_counts_as_rejected_heat() {
    let result = solve(
        CycleMode::TwoStageSubcooled,
        &config_for(CycleMode::TwoStageSubcooled, 35.0),
    );
    let m = &result.metrics;
    assert!(m.subcooler_duty.value > 0.0);
    assert!(m.heat_rejected.value > m.subcooler_duty.value);
    assert!(nearly_equal(
        result.stages[0].mass_flow.value,
        result.stages[1].mass_flow.value,
        LOOSE
    ));

    let condenser = result.point("condenser outlet").unwrap().state;
    let subcooled = result.point("subcooler outlet").unwrap().state;
    assert!(subcooled.temperature.value < condenser.temperature.value);
    assert!(subcooled.temperature.value < degc(0.0).value);
}

#[test]
fn cascade_exchanger_closes() {
    let result = solve(CycleMode::Cascade, &config_for(CycleMode::Cascade, 35.0));
    assert_eq!(result.loops.len(), 2);
    let (low, high) = (&result.loops[0], &result.loops[1]);

    assert_eq!(low.fluid, Refrigerant::CarbonDioxide);
    assert_eq!(high.fluid, Refrigerant::Ammonia);
    assert!(nearly_equal(
        low.metrics.heat_rejected.value,
        high.metrics.cooling_capacity.value,
        Tolerances::ENERGY_BALANCE
    ));
    assert_eq!(result.stages.len(), 2);
    assert_eq!(result.stages[0].label, "low:stage 1");
    assert_eq!(result.stages[1].compressor, "NH3");
    assert!(result.point("high:condenser outlet").is_some());

    let indicated = low.metrics.indicated_power.value + high.metrics.indicated_power.value;
    assert!(nearly_equal(
        result.metrics.cop,
        low.metrics.cooling_capacity.value / indicated,
        LOOSE
    ));
}

#[test]
fn cascade_sized_by_heating_capacity() {
    let mut config = config_for(CycleMode::Cascade, 35.0);
    config.duty = Some(Duty::HeatingCapacity(kw(250.0)));
    let result = solve(CycleMode::Cascade, &config);
    assert!(nearly_equal(result.metrics.heat_rejected.value, 250_000.0, LOOSE));
}

#[test]
fn heat_pump_condenses_above_supply() {
    let result = solve(
        CycleMode::AmmoniaHeatPump,
        &config_for(CycleMode::AmmoniaHeatPump, 65.0),
    );
    let liquid = result.point("condenser outlet").unwrap().state;
    assert!((liquid.temperature.value - degc(65.0).value).abs() < 0.1);
    assert!(nearly_equal(result.metrics.cop_heating, result.metrics.cop + 1.0, LOOSE));
}

#[test]
fn heat_pump_requires_ammonia() {
    let mut config = config_for(CycleMode::AmmoniaHeatPump, 65.0);
    config.fluid = Refrigerant::R134a;
    let err = calculate(&CoolPropProvider::new(), CycleMode::AmmoniaHeatPump, &config).unwrap_err();
    assert!(matches!(err, CalculationError::InvalidConfiguration { .. }));
}

#[test]
fn displacement_sizes_the_cycle() {
    let mut config = config_for(CycleMode::SingleStageOil, 40.0);
    config.duty = None;
    config.compressors = vec![
        CompressorSpec::isentropic(0.7)
            .with_swept_volume(m3ph(300.0))
            .with_volumetric_efficiency(Characteristic::constant(0.8)),
    ];
    let result = solve(CycleMode::SingleStageOil, &config);
    let stage = &result.stages[0];
    assert!(nearly_equal(stage.required_swept_volume.value, 300.0 / 3600.0, LOOSE));
    assert!((stage.volumetric_efficiency - 0.8).abs() < 1e-12);
}

#[test]
fn mass_flow_duty_is_used_verbatim() {
    let mut config = config_for(CycleMode::SingleStage, 40.0);
    config.duty = Some(Duty::MassFlow(kgps(0.25)));
    let result = solve(CycleMode::SingleStage, &config);
    assert!((result.metrics.evaporator_mass_flow.value - 0.25).abs() < 1e-12);
}

#[test]
fn clamped_efficiency_curve_warns() {
    let mut config = config_for(CycleMode::SingleStage, 40.0);
    // NH3 -10/40 runs at a ratio above 5; the fit only covers 1..3.
    config.compressors = vec![CompressorSpec::with_characteristic(
        Characteristic::polynomial(vec![0.6, 0.02], 1.0, 3.0).unwrap(),
    )];
    let result = solve(CycleMode::SingleStage, &config);
    assert!(result.has_warnings());
    match &result.warnings[0] {
        CalculationWarning::EfficiencyCurveClamped {
            stage,
            characteristic,
            requested,
            used,
        } => {
            assert_eq!(stage, "stage 1");
            assert_eq!(*characteristic, "isentropic efficiency");
            assert!(*requested > 3.0);
            assert_eq!(*used, 3.0);
        }
    }
    assert!((result.stages[0].isentropic_efficiency - 0.66).abs() < 1e-9);
}
