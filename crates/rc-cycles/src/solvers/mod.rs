//! Per-topology cycle solvers.

mod ammonia_heat_pump;
mod cascade;
mod flash_economizer;
mod single_stage;
mod subcooled_two_stage;

pub use ammonia_heat_pump::AmmoniaHeatPump;
pub use cascade::CascadeSolver;
pub use flash_economizer::FlashEconomizer;
pub use single_stage::{OilSingleStage, SingleStage};
pub use subcooled_two_stage::SubcooledTwoStage;

pub(crate) use single_stage::walk_single_stage;
