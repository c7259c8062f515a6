//! Cascade (mode 4): two single-stage loops coupled by a cascade heat exchanger.
//!
//! The low loop condenses at the cascade level; the high loop evaporates `approach`
//! below it and absorbs exactly the heat the low loop rejects. Each loop runs through
//! the orchestrator as an ordinary mode 3 calculation.

use crate::config::{CascadeLoop, Condition, CycleConfiguration, Duty};
use crate::error::{CalcResult, CalculationError};
use crate::legs::Walker;
use crate::mode::CycleMode;
use crate::orchestrator;
use crate::result::{CalculationWarning, CycleResult, StageResult, StatePoint};
use crate::solver::{CycleSolver, compressor_for, require};
use crate::specific::combine_metrics;
use rc_core::numeric::{Tolerances, nearly_equal};
use rc_core::units::{Temperature, k, kgps, watts};
use rc_fluids::PropertyProvider;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct CascadeSolver;

impl CascadeSolver {
    fn low_config(
        config: &CycleConfiguration,
        cascade: &CascadeLoop,
        duty: Option<Duty>,
    ) -> CalcResult<CycleConfiguration> {
        let spec = compressor_for(config, CycleMode::Cascade, 0)?;
        let mut low = CycleConfiguration::new(config.fluid, config.evaporating)
            .with_condensing(cascade.cascade_condensing)
            .with_superheat(config.superheat)
            .with_subcooling(config.subcooling)
            .with_compressor(spec.clone());
        low.duty = duty;
        Ok(low)
    }

    fn high_config(
        config: &CycleConfiguration,
        cascade: &CascadeLoop,
        condensing: Condition,
        t_evaporating: Temperature,
        absorbed: f64,
    ) -> CalcResult<CycleConfiguration> {
        let spec = compressor_for(config, CycleMode::Cascade, 1)?;
        Ok(CycleConfiguration::new(
            cascade.high_fluid,
            Condition::SaturationTemperature(t_evaporating),
        )
        .with_condensing(condensing)
        .with_superheat(cascade.high_superheat)
        .with_subcooling(cascade.high_subcooling)
        .with_compressor(spec.clone())
        .with_duty(Duty::CoolingCapacity(watts(absorbed))))
    }
}

impl CycleSolver for CascadeSolver {
    fn mode(&self) -> CycleMode {
        CycleMode::Cascade
    }

    fn solve(
        &self,
        provider: &dyn PropertyProvider,
        config: &CycleConfiguration,
    ) -> CalcResult<CycleResult> {
        let mode = self.mode();
        let condensing = require(config.condensing, mode, "condensing condition")?;
        let cascade = require(config.cascade.as_ref(), mode, "cascade loop")?;

        let t_cascade = match cascade.cascade_condensing {
            Condition::SaturationTemperature(t) => t,
            Condition::Pressure(p) => Walker::new(provider, config.fluid).saturation_temperature(p)?,
        };
        let t_high_evap = k(t_cascade.value - cascade.approach.value);

        let run_pair = |duty: Option<Duty>| -> CalcResult<(CycleResult, CycleResult)> {
            let low_cfg = Self::low_config(config, cascade, duty)?;
            let low = orchestrator::run(provider, CycleMode::SingleStage, &low_cfg)?;
            let high_cfg = Self::high_config(
                config,
                cascade,
                condensing,
                t_high_evap,
                low.metrics.heat_rejected.value,
            )?;
            let high = orchestrator::run(provider, CycleMode::SingleStage, &high_cfg)?;
            Ok((low, high))
        };

        let (low, high) = match config.duty {
            Some(Duty::HeatingCapacity(q)) => {
                // Both loops scale linearly with the low flow: size on 1 kg/s, then rescale.
                let (_, probe) = run_pair(Some(Duty::MassFlow(kgps(1.0))))?;
                let per_unit = probe.metrics.heat_rejected.value;
                if per_unit <= 0.0 {
                    return Err(CalculationError::Invariant {
                        what: "high loop rejects no heat".to_string(),
                    });
                }
                run_pair(Some(Duty::MassFlow(kgps(q.value / per_unit))))?
            }
            duty => run_pair(duty)?,
        };

        let closure = Tolerances::ENERGY_BALANCE;
        if !nearly_equal(
            low.metrics.heat_rejected.value,
            high.metrics.cooling_capacity.value,
            closure,
        ) {
            return Err(CalculationError::Invariant {
                what: format!(
                    "cascade heat exchanger not closed: low rejects {:.3} W, high absorbs {:.3} W",
                    low.metrics.heat_rejected.value, high.metrics.cooling_capacity.value
                ),
            });
        }
        debug!(
            cascade_w = low.metrics.heat_rejected.value,
            low_flow = low.metrics.evaporator_mass_flow.value,
            high_flow = high.metrics.evaporator_mass_flow.value,
            "cascade loops coupled"
        );

        let mut points = Vec::with_capacity(low.points.len() + high.points.len());
        let mut stages = Vec::with_capacity(low.stages.len() + high.stages.len());
        let mut warnings = Vec::new();
        for (prefix, part) in [("low", &low), ("high", &high)] {
            points.extend(part.points.iter().map(|p| StatePoint {
                label: format!("{prefix}:{}", p.label),
                state: p.state,
            }));
            stages.extend(part.stages.iter().map(|s| StageResult {
                label: format!("{prefix}:{}", s.label),
                ..s.clone()
            }));
            warnings.extend(part.warnings.iter().map(|w| prefixed(prefix, w)));
        }

        let metrics = combine_metrics(
            &stages,
            low.metrics.cooling_capacity,
            high.metrics.heat_rejected,
            watts(0.0),
            low.metrics.evaporator_mass_flow,
        );

        Ok(CycleResult {
            mode,
            fluid: config.fluid,
            points,
            stages,
            metrics,
            warnings,
            loops: vec![low, high],
        })
    }
}

fn prefixed(prefix: &str, warning: &CalculationWarning) -> CalculationWarning {
    match warning {
        CalculationWarning::EfficiencyCurveClamped {
            stage,
            characteristic,
            requested,
            used,
        } => CalculationWarning::EfficiencyCurveClamped {
            stage: format!("{prefix}:{stage}"),
            characteristic: *characteristic,
            requested: *requested,
            used: *used,
        },
    }
}
