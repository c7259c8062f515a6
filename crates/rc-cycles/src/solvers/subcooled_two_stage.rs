//! Two-stage cycle with a liquid subcooler at the intermediate level (mode 5).
//!
//! One mass flow passes through both stages; there is no vapor injection, so the
//! high stage draws the low-stage discharge directly. Condenser liquid is cooled in a
//! subcooler served from the intermediate level to T_sat(p_int) + approach before
//! expansion. The subcooler duty leaves the cycle and is counted in heat rejected.

use crate::config::{CycleConfiguration, Intermediate};
use crate::error::CalcResult;
use crate::legs::{Walker, ensure_increasing, equal_ratio_pressure};
use crate::mode::CycleMode;
use crate::result::CycleResult;
use crate::solver::{CycleSolver, compressor_for, require};
use crate::specific::SpecificCycle;
use rc_core::units::k;
use rc_fluids::{PropertyProvider, StateInput};

#[derive(Debug, Clone, Copy, Default)]
pub struct SubcooledTwoStage;

impl CycleSolver for SubcooledTwoStage {
    fn mode(&self) -> CycleMode {
        CycleMode::TwoStageSubcooled
    }

    fn solve(
        &self,
        provider: &dyn PropertyProvider,
        config: &CycleConfiguration,
    ) -> CalcResult<CycleResult> {
        let mode = self.mode();
        let condensing = require(config.condensing, mode, "condensing condition")?;
        let level = require(config.intermediate, mode, "intermediate pressure")?;
        let low_spec = compressor_for(config, mode, 0)?;
        let high_spec = compressor_for(config, mode, 1)?;
        let approach = config.subcooler_approach.map(|a| a.value).unwrap_or(0.0);

        let walker = Walker::new(provider, config.fluid);
        let pe = walker.resolve(config.evaporating)?;
        let pc = walker.resolve(condensing)?;
        let pi = match level {
            Intermediate::Pressure(p) => p,
            Intermediate::SaturationTemperature(t) => walker.saturation_pressure(t)?,
            Intermediate::EqualPressureRatio => equal_ratio_pressure(pe, pc, 1, 1),
        };
        ensure_increasing(&[
            ("evaporating", pe),
            ("intermediate", pi),
            ("condensing", pc),
        ])?;

        let suction = walker.evaporator_outlet(pe, config.superheat)?;
        let low = walker.compress("stage 1", &suction, pi, low_spec)?;
        let high = walker.compress("stage 2", &low.outlet, pc, high_spec)?;

        let liquid = walker.condenser_outlet(pc, config.subcooling)?;
        let t_target = walker.saturation_temperature(pi)?.value + approach;
        // A target at or above the liquid temperature means the subcooler does nothing.
        let subcooled = if t_target < liquid.temperature.value {
            walker.lookup(StateInput::PT {
                p: pc,
                t: k(t_target),
            })?
        } else {
            liquid
        };
        let expanded = walker.throttle(pe, subcooled.enthalpy)?;

        let mut cycle = SpecificCycle::new(config.fluid);
        cycle.push_point("evaporator outlet", suction);
        cycle.push_point("stage 1 discharge", low.outlet);
        cycle.push_point("stage 2 discharge", high.outlet);
        cycle.push_point("condenser outlet", liquid);
        cycle.push_point("subcooler outlet", subcooled);
        cycle.push_point("evaporator inlet", expanded);

        cycle.q_evaporator = suction.enthalpy - expanded.enthalpy;
        cycle.q_condenser = high.outlet.enthalpy - liquid.enthalpy;
        cycle.q_subcooler = liquid.enthalpy - subcooled.enthalpy;

        let low_outlet = low.outlet;
        cycle.push_leg("stage 1", low_spec, suction, low, 1.0);
        cycle.push_leg("stage 2", high_spec, low_outlet, high, 1.0);
        cycle.scale(mode, config.duty)
    }
}
