//! Calculation entry point.

use crate::config::CycleConfiguration;
use crate::error::CalcResult;
use crate::mode::CycleMode;
use crate::result::CycleResult;
use crate::solver::solver_for;
use crate::sweep::{SweepPoint, sweep_condensing};
use crate::validate;
use rc_core::units::Temperature;
use rc_fluids::{PropertyCache, PropertyProvider};
use tracing::{debug, info_span};

/// Validate `config` for `mode`, dispatch to its solver and return the result.
///
/// Lookups for this call are memoized in a fresh cache that is dropped on return.
/// Configuration errors are reported before the first property lookup.
pub fn calculate<P: PropertyProvider>(
    provider: &P,
    mode: CycleMode,
    config: &CycleConfiguration,
) -> CalcResult<CycleResult> {
    let span = info_span!("calculate", mode = mode.number(), fluid = %config.fluid);
    let _enter = span.enter();

    let cache = PropertyCache::new(provider);
    let result = run(&cache, mode, config);
    let stats = cache.stats();
    debug!(
        hits = stats.hits,
        misses = stats.misses,
        ok = result.is_ok(),
        "property cache"
    );
    result
}

/// Validate and solve against an already wrapped provider.
pub(crate) fn run(
    provider: &dyn PropertyProvider,
    mode: CycleMode,
    config: &CycleConfiguration,
) -> CalcResult<CycleResult> {
    validate::check(mode, config)?;
    let result = solver_for(mode).solve(provider, config)?;
    debug!(
        mode = %mode,
        cop = result.metrics.cop,
        cooling_w = result.metrics.cooling_capacity.value,
        indicated_w = result.metrics.indicated_power.value,
        warnings = result.warnings.len(),
        "cycle solved"
    );
    Ok(result)
}

/// A property provider bound to the calculation entry points.
#[derive(Debug, Clone)]
pub struct Calculator<P> {
    provider: P,
}

impl<P: PropertyProvider> Calculator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn calculate(&self, mode: CycleMode, config: &CycleConfiguration) -> CalcResult<CycleResult> {
        calculate(&self.provider, mode, config)
    }
}

impl<P: PropertyProvider + Sync> Calculator<P> {
    /// See [`sweep_condensing`].
    pub fn sweep_condensing(
        &self,
        mode: CycleMode,
        config: &CycleConfiguration,
        temperatures: &[Temperature],
    ) -> Vec<SweepPoint> {
        sweep_condensing(&self.provider, mode, config, temperatures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Condition;
    use crate::error::CalculationError;
    use rc_core::units::degc;
    use rc_fluids::{FluidResult, Refrigerant, StateInput, StateProperties};
    use std::cell::Cell;

    struct Refusing {
        calls: Cell<usize>,
    }

    impl PropertyProvider for Refusing {
        fn name(&self) -> &str {
            "refusing"
        }

        fn supports(&self, _: Refrigerant) -> bool {
            true
        }

        fn lookup(&self, fluid: Refrigerant, input: StateInput) -> FluidResult<StateProperties> {
            self.calls.set(self.calls.get() + 1);
            Err(rc_fluids::FluidError::UnsupportedFluid {
                fluid: fluid.to_string(),
                input: input.to_string(),
            })
        }
    }

    #[test]
    fn incomplete_configuration_fails_before_lookup() {
        let provider = Refusing {
            calls: Cell::new(0),
        };
        let config = CycleConfiguration::new(
            Refrigerant::Ammonia,
            Condition::SaturationTemperature(degc(-10.0)),
        );
        let err = calculate(&provider, CycleMode::SingleStage, &config).unwrap_err();
        assert!(matches!(err, CalculationError::MissingParameter { mode: 3, .. }));
        assert_eq!(provider.calls.get(), 0);
    }
}
