//! Ammonia heat pump (mode 7).

use crate::config::CycleConfiguration;
use crate::error::{CalcResult, CalculationError};
use crate::legs::Walker;
use crate::mode::CycleMode;
use crate::result::CycleResult;
use crate::solver::{CycleSolver, compressor_for, require};
use crate::solvers::walk_single_stage;
use rc_core::units::{k, to_degc};
use rc_fluids::{PropertyProvider, Refrigerant};
use tracing::debug;

/// Same state-point walk as mode 3, but the condensing level follows the heat sink:
/// T_cond = T_supply + approach.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmmoniaHeatPump;

impl CycleSolver for AmmoniaHeatPump {
    fn mode(&self) -> CycleMode {
        CycleMode::AmmoniaHeatPump
    }

    fn solve(
        &self,
        provider: &dyn PropertyProvider,
        config: &CycleConfiguration,
    ) -> CalcResult<CycleResult> {
        let mode = self.mode();
        if config.fluid != Refrigerant::Ammonia {
            return Err(CalculationError::invalid(format!(
                "mode 7 is an ammonia heat pump; got {}",
                config.fluid
            )));
        }
        let delivery = require(config.heat_delivery, mode, "heat delivery")?;
        let spec = compressor_for(config, mode, 0)?;

        let t_cond = k(delivery.supply_temperature.value + delivery.approach.value);
        debug!(
            supply_c = to_degc(delivery.supply_temperature),
            condensing_c = to_degc(t_cond),
            "condensing level from heat delivery"
        );

        let walker = Walker::new(provider, config.fluid);
        let pe = walker.resolve(config.evaporating)?;
        let pc = walker.saturation_pressure(t_cond)?;

        walk_single_stage(&walker, pe, pc, config.superheat, config.subcooling, spec)?
            .scale(mode, config.duty)
    }
}
