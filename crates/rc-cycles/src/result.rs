//! Cycle results.

use crate::mode::CycleMode;
use rc_core::units::{MassRate, Power, Pressure, Temperature, VolumeRate};
use rc_fluids::{Refrigerant, StateProperties};
use std::fmt;

/// One node of the cycle, in cycle order.
#[derive(Debug, Clone, PartialEq)]
pub struct StatePoint {
    pub label: String,
    pub state: StateProperties,
}

/// Scaled results for one compression leg.
#[derive(Debug, Clone, PartialEq)]
pub struct StageResult {
    /// Position in the loop ("stage 1", "low stage", "high:stage 1", ...)
    pub label: String,
    /// Name of the compressor that ran this stage
    pub compressor: String,
    pub mass_flow: MassRate,
    pub suction_pressure: Pressure,
    pub discharge_pressure: Pressure,
    pub pressure_ratio: f64,
    pub isentropic_efficiency: f64,
    pub volumetric_efficiency: f64,
    /// Specific isentropic work [J/kg]
    pub isentropic_work: f64,
    /// Specific actual work [J/kg]
    pub actual_work: f64,
    pub indicated_power: Power,
    pub shaft_power: Power,
    pub input_power: Power,
    pub discharge_temperature: Temperature,
    /// Displacement needed to carry `mass_flow` at this stage's suction state
    pub required_swept_volume: VolumeRate,
}

/// Derived scalar metrics for the whole calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleMetrics {
    pub cooling_capacity: Power,
    /// Condenser plus subcooler duty
    pub heat_rejected: Power,
    pub subcooler_duty: Power,
    pub indicated_power: Power,
    pub shaft_power: Power,
    pub input_power: Power,
    /// cooling / indicated power
    pub cop: f64,
    /// heat rejected / indicated power
    pub cop_heating: f64,
    /// cooling / electrical input power
    pub cop_electrical: f64,
    pub evaporator_mass_flow: MassRate,
}

/// Non-fatal event attached to a result.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationWarning {
    /// A characteristic was evaluated outside its domain and clamped.
    EfficiencyCurveClamped {
        stage: String,
        characteristic: &'static str,
        requested: f64,
        used: f64,
    },
}

impl fmt::Display for CalculationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationWarning::EfficiencyCurveClamped {
                stage,
                characteristic,
                requested,
                used,
            } => write!(
                f,
                "{stage}: {characteristic} characteristic evaluated at {requested:.3}, \
                 clamped to {used:.3}"
            ),
        }
    }
}

/// Complete output of one calculation. Immutable once returned.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleResult {
    pub mode: CycleMode,
    pub fluid: Refrigerant,
    pub points: Vec<StatePoint>,
    pub stages: Vec<StageResult>,
    pub metrics: CycleMetrics,
    pub warnings: Vec<CalculationWarning>,
    /// Sub-results of coupled loops (cascade: low, then high)
    pub loops: Vec<CycleResult>,
}

impl CycleResult {
    pub fn point(&self, label: &str) -> Option<&StatePoint> {
        self.points.iter().find(|p| p.label == label)
    }

    /// Highest discharge temperature of any stage.
    pub fn max_discharge_temperature(&self) -> Option<Temperature> {
        self.stages
            .iter()
            .map(|s| s.discharge_temperature)
            .reduce(|a, b| if b.value > a.value { b } else { a })
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_display() {
        let w = CalculationWarning::EfficiencyCurveClamped {
            stage: "stage 1".into(),
            characteristic: "isentropic efficiency",
            requested: 9.5,
            used: 8.0,
        };
        let text = w.to_string();
        assert!(text.contains("stage 1"));
        assert!(text.contains("9.500"));
        assert!(text.contains("8.000"));
    }
}
