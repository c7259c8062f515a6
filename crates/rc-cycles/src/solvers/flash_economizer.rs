//! Multi-stage cycles with flash economizers (mode 3 two-stage variant, mode 6).
//!
//! Condenser liquid is throttled into a flash tank at each intermediate level, top
//! down. Flash vapor joins the discharge of the stage below; saturated liquid
//! continues to the next lower level and finally to the evaporator.
//!
//! Per unit evaporator flow, with vapor fraction x_k of tank k:
//!
//! ```text
//! F_1     = 1
//! F_{k+1} = F_k / (1 - x_k)
//! h_suction,k+1 = (F_k·h_discharge,k + (F_{k+1} - F_k)·h_g(p_k)) / F_{k+1}
//! ```

use crate::config::{CycleConfiguration, Intermediate};
use crate::error::{CalcResult, CalculationError};
use crate::legs::{FlashSplit, Walker, ensure_increasing, equal_ratio_pressure};
use crate::mode::CycleMode;
use crate::result::CycleResult;
use crate::solver::{CycleSolver, compressor_for, require};
use crate::specific::SpecificCycle;
use rc_core::units::Pressure;
use rc_fluids::PropertyProvider;
use tracing::debug;

/// Flash-economizer chain with a fixed number of intermediate levels.
#[derive(Debug, Clone, Copy)]
pub struct FlashEconomizer {
    mode: CycleMode,
    levels: usize,
}

impl FlashEconomizer {
    pub const fn new(mode: CycleMode, levels: usize) -> Self {
        Self { mode, levels }
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    fn intermediate_levels(&self, config: &CycleConfiguration) -> CalcResult<Vec<Intermediate>> {
        match self.mode {
            CycleMode::TwoStageDoubleEconomizer => {
                if config.economizers.len() < self.levels {
                    return Err(CalculationError::MissingParameter {
                        mode: self.mode.number(),
                        what: "two economizer levels",
                    });
                }
                if config.economizers.len() > self.levels {
                    return Err(CalculationError::invalid(format!(
                        "mode 6 takes exactly {} economizer levels, got {}",
                        self.levels,
                        config.economizers.len()
                    )));
                }
                Ok(config.economizers.clone())
            }
            _ => {
                let level = require(config.intermediate, self.mode, "intermediate pressure")?;
                Ok(vec![level])
            }
        }
    }
}

impl CycleSolver for FlashEconomizer {
    fn mode(&self) -> CycleMode {
        self.mode
    }

    fn solve(
        &self,
        provider: &dyn PropertyProvider,
        config: &CycleConfiguration,
    ) -> CalcResult<CycleResult> {
        let mode = self.mode;
        let condensing = require(config.condensing, mode, "condensing condition")?;
        let levels = self.intermediate_levels(config)?;
        let n = levels.len();

        let walker = Walker::new(provider, config.fluid);
        let pe = walker.resolve(config.evaporating)?;
        let pc = walker.resolve(condensing)?;

        let mut pressures: Vec<Pressure> = Vec::with_capacity(n);
        for (i, level) in levels.iter().enumerate() {
            let p = match *level {
                Intermediate::Pressure(p) => p,
                Intermediate::SaturationTemperature(t) => walker.saturation_pressure(t)?,
                Intermediate::EqualPressureRatio => equal_ratio_pressure(pe, pc, i + 1, n),
            };
            pressures.push(p);
        }

        let names: Vec<String> = (1..=n).map(|k| format!("economizer {k}")).collect();
        let mut ordered: Vec<(&str, Pressure)> = vec![("evaporating", pe)];
        ordered.extend(names.iter().map(|s| s.as_str()).zip(pressures.iter().copied()));
        ordered.push(("condensing", pc));
        ensure_increasing(&ordered)?;

        // Liquid side, top down.
        let liquid_top = walker.condenser_outlet(pc, config.subcooling)?;
        let mut flashes: Vec<FlashSplit> = Vec::with_capacity(n);
        let mut h_in = liquid_top.enthalpy;
        for k in (0..n).rev() {
            let split = walker.flash(pressures[k], h_in)?;
            if split.vapor_fraction >= 1.0 {
                return Err(CalculationError::Invariant {
                    what: format!("economizer {} receives no liquid", k + 1),
                });
            }
            h_in = split.liquid.enthalpy;
            flashes.push(split);
        }
        flashes.reverse();
        let expanded = walker.throttle(pe, h_in)?;

        let mut flows = vec![1.0_f64];
        for split in &flashes {
            let below = flows[flows.len() - 1];
            flows.push(below / (1.0 - split.vapor_fraction));
        }

        // Vapor side, bottom up.
        let mut cycle = SpecificCycle::new(config.fluid);
        let evaporator_outlet = walker.evaporator_outlet(pe, config.superheat)?;
        cycle.push_point("evaporator outlet", evaporator_outlet);

        let mut suction = evaporator_outlet;
        let mut discharge = evaporator_outlet;
        for stage in 0..=n {
            let label = format!("stage {}", stage + 1);
            let spec = compressor_for(config, mode, stage)?;
            let p_out = if stage < n { pressures[stage] } else { pc };

            if stage > 0 {
                let tank = &flashes[stage - 1];
                let injected = flows[stage] - flows[stage - 1];
                cycle.push_point(format!("economizer {stage} vapor"), tank.vapor);
                suction = walker.mix(
                    pressures[stage - 1],
                    &[
                        (flows[stage - 1], discharge.enthalpy),
                        (injected, tank.vapor.enthalpy),
                    ],
                )?;
                cycle.push_point(format!("{label} suction"), suction);
            }

            let compression = walker.compress(&label, &suction, p_out, spec)?;
            discharge = compression.outlet;
            cycle.push_point(format!("{label} discharge"), discharge);
            debug!(
                stage = %label,
                flow_ratio = flows[stage],
                suction_pa = suction.pressure.value,
                discharge_pa = p_out.value,
                "economizer chain leg"
            );
            cycle.push_leg(label, spec, suction, compression, flows[stage]);
        }

        cycle.push_point("condenser outlet", liquid_top);
        for k in (0..n).rev() {
            cycle.push_point(format!("economizer {} inlet", k + 1), flashes[k].inlet);
            cycle.push_point(format!("economizer {} liquid", k + 1), flashes[k].liquid);
        }
        cycle.push_point("evaporator inlet", expanded);

        cycle.q_evaporator = evaporator_outlet.enthalpy - expanded.enthalpy;
        cycle.q_condenser = flows[n] * (discharge.enthalpy - liquid_top.enthalpy);
        cycle.scale(mode, config.duty)
    }
}
