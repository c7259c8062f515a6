//! rc-cycles: refrigeration and heat-pump cycle solvers for refcalc.
//!
//! Provides:
//! - `CycleConfiguration`, the per-mode input bundle, and `CycleMode` (modes 2-7)
//! - One solver per topology behind the `CycleSolver` trait
//! - `calculate` / `Calculator`: validate, dispatch, return a `CycleResult`
//! - `sweep_condensing` for chart series over condensing temperature
//!
//! # Architecture
//!
//! Every solver walks its cycle once for 1 kg/s of evaporator flow, producing a
//! specific cycle (state points, compression legs, per-kg heat duties). The shared
//! scaling step then resolves the evaporator mass flow from the requested `Duty` or
//! from compressor displacement and layers on volumetric and drive losses.
//!
//! Property lookups go through a `PropertyCache` created per calculation; no state
//! survives between calls.
//!
//! # Example
//!
//! ```no_run
//! use rc_components::CompressorSpec;
//! use rc_core::units::{degc, dk, kw};
//! use rc_cycles::{Calculator, Condition, CycleConfiguration, CycleMode, Duty};
//! use rc_fluids::{CoolPropProvider, Refrigerant};
//!
//! let config = CycleConfiguration::new(
//!     Refrigerant::Ammonia,
//!     Condition::SaturationTemperature(degc(-10.0)),
//! )
//! .with_condensing(Condition::SaturationTemperature(degc(40.0)))
//! .with_superheat(dk(5.0))
//! .with_subcooling(dk(5.0))
//! .with_compressor(CompressorSpec::isentropic(0.7))
//! .with_duty(Duty::CoolingCapacity(kw(100.0)));
//!
//! let calculator = Calculator::new(CoolPropProvider::new());
//! let result = calculator.calculate(CycleMode::SingleStage, &config).unwrap();
//! println!("COP = {:.2}", result.metrics.cop);
//! ```

pub mod config;
pub mod error;
pub mod mode;
pub mod orchestrator;
pub mod result;
pub mod solver;
pub mod solvers;
pub mod sweep;

mod legs;
mod specific;
mod validate;

pub use config::{CascadeLoop, Condition, CycleConfiguration, Duty, HeatDelivery, Intermediate};
pub use error::{CalcResult, CalculationError};
pub use mode::CycleMode;
pub use orchestrator::{Calculator, calculate};
pub use result::{CalculationWarning, CycleMetrics, CycleResult, StageResult, StatePoint};
pub use solver::{CycleSolver, solver_for};
pub use sweep::{SweepPoint, condensing_temperatures, sweep_condensing};
