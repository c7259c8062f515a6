//! Solver capability and mode dispatch.

use crate::config::CycleConfiguration;
use crate::error::{CalcResult, CalculationError};
use crate::mode::CycleMode;
use crate::result::CycleResult;
use crate::solvers::{
    AmmoniaHeatPump, CascadeSolver, FlashEconomizer, OilSingleStage, SingleStage,
    SubcooledTwoStage,
};
use rc_components::CompressorSpec;
use rc_fluids::PropertyProvider;

/// One cycle topology.
///
/// Solvers assume the configuration already passed the orchestrator's checks, but
/// still report a missing section as an error rather than panicking.
pub trait CycleSolver: Send + Sync {
    fn mode(&self) -> CycleMode;

    fn solve(
        &self,
        provider: &dyn PropertyProvider,
        config: &CycleConfiguration,
    ) -> CalcResult<CycleResult>;
}

static OIL_SINGLE_STAGE: OilSingleStage = OilSingleStage;
static SINGLE_STAGE: SingleStage = SingleStage;
static TWO_STAGE_FLASH: FlashEconomizer = FlashEconomizer::new(CycleMode::TwoStageFlash, 1);
static CASCADE: CascadeSolver = CascadeSolver;
static SUBCOOLED_TWO_STAGE: SubcooledTwoStage = SubcooledTwoStage;
static DOUBLE_ECONOMIZER: FlashEconomizer =
    FlashEconomizer::new(CycleMode::TwoStageDoubleEconomizer, 2);
static AMMONIA_HEAT_PUMP: AmmoniaHeatPump = AmmoniaHeatPump;

/// Solver for `mode`.
pub fn solver_for(mode: CycleMode) -> &'static dyn CycleSolver {
    match mode {
        CycleMode::SingleStageOil => &OIL_SINGLE_STAGE,
        CycleMode::SingleStage => &SINGLE_STAGE,
        CycleMode::TwoStageFlash => &TWO_STAGE_FLASH,
        CycleMode::Cascade => &CASCADE,
        CycleMode::TwoStageSubcooled => &SUBCOOLED_TWO_STAGE,
        CycleMode::TwoStageDoubleEconomizer => &DOUBLE_ECONOMIZER,
        CycleMode::AmmoniaHeatPump => &AMMONIA_HEAT_PUMP,
    }
}

pub(crate) fn require<T>(value: Option<T>, mode: CycleMode, what: &'static str) -> CalcResult<T> {
    value.ok_or(CalculationError::MissingParameter {
        mode: mode.number(),
        what,
    })
}

pub(crate) fn compressor_for(
    config: &CycleConfiguration,
    mode: CycleMode,
    stage: usize,
) -> CalcResult<&CompressorSpec> {
    require(config.compressor(stage), mode, "compressor specification")
}
