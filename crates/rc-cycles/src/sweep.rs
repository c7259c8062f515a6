//! Condensing-temperature sweeps for chart series.
//!
//! Each point is an independent calculation with its own property cache, so points
//! run in parallel and a failing point does not abort the series.

use crate::config::{Condition, CycleConfiguration};
use crate::error::CalcResult;
use crate::mode::CycleMode;
use crate::orchestrator::calculate;
use crate::result::CycleResult;
use rc_core::units::{Temperature, k};
use rc_fluids::PropertyProvider;
use rayon::prelude::*;
use tracing::{debug, warn};

/// One point of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub condensing_temperature: Temperature,
    pub result: CalcResult<CycleResult>,
}

impl SweepPoint {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// `points` evenly spaced temperatures from `from` to `to`, both included.
pub fn condensing_temperatures(from: Temperature, to: Temperature, points: usize) -> Vec<Temperature> {
    match points {
        0 => Vec::new(),
        1 => vec![from],
        n => {
            let delta = (to.value - from.value) / (n - 1) as f64;
            let mut out: Vec<Temperature> =
                (0..n).map(|i| k(from.value + i as f64 * delta)).collect();
            // Exact endpoint
            out[n - 1] = to;
            out
        }
    }
}

/// Copy of `config` condensing at `t`.
///
/// Mode 7 has no condensing condition; its supply temperature moves instead so that
/// supply + approach lands on `t`.
fn at_condensing(mode: CycleMode, config: &CycleConfiguration, t: Temperature) -> CycleConfiguration {
    let mut cfg = config.clone();
    if mode == CycleMode::AmmoniaHeatPump {
        if let Some(delivery) = cfg.heat_delivery.as_mut() {
            delivery.supply_temperature = k(t.value - delivery.approach.value);
        }
    } else {
        cfg.condensing = Some(Condition::SaturationTemperature(t));
    }
    cfg
}

/// Calculate `config` at each condensing temperature, in input order.
pub fn sweep_condensing<P: PropertyProvider + Sync>(
    provider: &P,
    mode: CycleMode,
    config: &CycleConfiguration,
    temperatures: &[Temperature],
) -> Vec<SweepPoint> {
    debug!(mode = %mode, points = temperatures.len(), "condensing sweep");
    let points: Vec<SweepPoint> = temperatures
        .par_iter()
        .map(|&t| SweepPoint {
            condensing_temperature: t,
            result: calculate(provider, mode, &at_condensing(mode, config, t)),
        })
        .collect();

    let failed = points.iter().filter(|p| !p.is_ok()).count();
    if failed > 0 {
        warn!(failed, total = points.len(), "sweep points failed");
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeatDelivery;
    use rc_core::units::{degc, dk};
    use rc_fluids::Refrigerant;

    #[test]
    fn linear_spacing_hits_both_ends() {
        let ts = condensing_temperatures(degc(30.0), degc(50.0), 5);
        assert_eq!(ts.len(), 5);
        assert_eq!(ts[0], degc(30.0));
        assert_eq!(ts[4], degc(50.0));
        assert!((ts[1].value - degc(35.0).value).abs() < 1e-9);
        assert!(condensing_temperatures(degc(30.0), degc(50.0), 0).is_empty());
        assert_eq!(condensing_temperatures(degc(30.0), degc(50.0), 1), vec![degc(30.0)]);
    }

    #[test]
    fn heat_pump_moves_supply_temperature() {
        let config = CycleConfiguration::new(
            Refrigerant::Ammonia,
            Condition::SaturationTemperature(degc(0.0)),
        )
        .with_heat_delivery(HeatDelivery {
            supply_temperature: degc(60.0),
            approach: dk(5.0),
        });
        let moved = at_condensing(CycleMode::AmmoniaHeatPump, &config, degc(70.0));
        let supply = moved.heat_delivery.map(|d| d.supply_temperature.value);
        assert!((supply.unwrap_or_default() - degc(65.0).value).abs() < 1e-9);
        assert!(moved.condensing.is_none());

        let moved = at_condensing(CycleMode::SingleStage, &config, degc(40.0));
        assert_eq!(moved.condensing, Some(Condition::SaturationTemperature(degc(40.0))));
    }
}
