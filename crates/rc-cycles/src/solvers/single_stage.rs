//! Single-stage cycles (modes 2 and 3).
//!
//! ```text
//!        condenser
//!   3 <------------- 2
//!   |                ^
//!   v valve          | compressor
//!   4 -------------> 1
//!        evaporator
//! ```

use crate::config::CycleConfiguration;
use crate::error::CalcResult;
use crate::legs::{Walker, ensure_increasing};
use crate::mode::CycleMode;
use crate::result::CycleResult;
use crate::solver::{CycleSolver, compressor_for, require};
use crate::specific::SpecificCycle;
use rc_components::CompressorSpec;
use rc_core::units::{Pressure, TempInterval};
use rc_fluids::PropertyProvider;
use tracing::debug;

/// Walk evaporator outlet → compression → condenser outlet → valve between two
/// resolved pressure levels.
pub(crate) fn walk_single_stage(
    walker: &Walker<'_>,
    pe: Pressure,
    pc: Pressure,
    superheat: TempInterval,
    subcooling: TempInterval,
    spec: &CompressorSpec,
) -> CalcResult<SpecificCycle> {
    ensure_increasing(&[("evaporating", pe), ("condensing", pc)])?;

    let suction = walker.evaporator_outlet(pe, superheat)?;
    let compression = walker.compress("stage 1", &suction, pc, spec)?;
    let liquid = walker.condenser_outlet(pc, subcooling)?;
    let expanded = walker.throttle(pe, liquid.enthalpy)?;

    let mut cycle = SpecificCycle::new(walker.fluid);
    cycle.push_point("evaporator outlet", suction);
    cycle.push_point("stage 1 discharge", compression.outlet);
    cycle.push_point("condenser outlet", liquid);
    cycle.push_point("evaporator inlet", expanded);
    cycle.q_evaporator = suction.enthalpy - expanded.enthalpy;
    cycle.q_condenser = compression.outlet.enthalpy - liquid.enthalpy;
    cycle.push_leg("stage 1", spec, suction, compression, 1.0);
    Ok(cycle)
}

/// Mode 3: refrigerant only, the reference topology.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleStage;

impl CycleSolver for SingleStage {
    fn mode(&self) -> CycleMode {
        CycleMode::SingleStage
    }

    fn solve(
        &self,
        provider: &dyn PropertyProvider,
        config: &CycleConfiguration,
    ) -> CalcResult<CycleResult> {
        let mode = self.mode();
        let condensing = require(config.condensing, mode, "condensing condition")?;
        let spec = compressor_for(config, mode, 0)?;

        let walker = Walker::new(provider, config.fluid);
        let pe = walker.resolve(config.evaporating)?;
        let pc = walker.resolve(condensing)?;

        walk_single_stage(&walker, pe, pc, config.superheat, config.subcooling, spec)?
            .scale(mode, config.duty)
    }
}

/// Mode 2: single stage with oil circulating in the refrigerant.
///
/// Saturation temperatures given for evaporator and condenser are mixture temperatures;
/// both are converted to refrigerant saturation pressures through the oil offset.
/// When sized from displacement only `1 - w` of the compressed mass is refrigerant.
#[derive(Debug, Clone, Copy, Default)]
pub struct OilSingleStage;

impl CycleSolver for OilSingleStage {
    fn mode(&self) -> CycleMode {
        CycleMode::SingleStageOil
    }

    fn solve(
        &self,
        provider: &dyn PropertyProvider,
        config: &CycleConfiguration,
    ) -> CalcResult<CycleResult> {
        let mode = self.mode();
        let condensing = require(config.condensing, mode, "condensing condition")?;
        let oil = require(config.oil.as_ref(), mode, "oil dilution")?;
        let spec = compressor_for(config, mode, 0)?;

        debug!(
            oil_mass_fraction = oil.oil_mass_fraction,
            shift_k = oil.saturation_shift().value,
            "applying oil dilution offset"
        );

        let walker = Walker::new(provider, config.fluid);
        let pe = walker.resolve_with_oil(config.evaporating, oil)?;
        let pc = walker.resolve_with_oil(condensing, oil)?;

        let mut cycle =
            walk_single_stage(&walker, pe, pc, config.superheat, config.subcooling, spec)?;
        cycle.refrigerant_fraction = oil.refrigerant_fraction();
        cycle.scale(mode, config.duty)
    }
}
