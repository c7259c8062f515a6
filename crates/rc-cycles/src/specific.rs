//! Specific cycles (per kg/s of evaporator flow) and their scaling to a duty.

use crate::config::Duty;
use crate::error::{CalcResult, CalculationError};
use crate::mode::CycleMode;
use crate::result::{CalculationWarning, CycleMetrics, CycleResult, StageResult, StatePoint};
use rc_components::{
    Clamped, CompressionOutcome, CompressorSpec, intake_mass_flow, layer_losses,
    required_swept_volume,
};
use rc_core::numeric::{Tolerances, nearly_equal};
use rc_core::units::{MassRate, Power, kgps, watts};
use rc_fluids::{Refrigerant, StateProperties};
use tracing::{debug, warn};

/// Property-table data closes energy balances only to the lookup tolerance.
const BALANCE: Tolerances = Tolerances {
    abs: 1.0,
    rel: 1e-5,
};

/// One compression leg of a specific cycle.
#[derive(Debug, Clone)]
pub(crate) struct Leg {
    pub label: String,
    pub spec: CompressorSpec,
    pub suction: StateProperties,
    pub outcome: CompressionOutcome,
    /// Mass flow through this leg per unit evaporator flow
    pub flow_ratio: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct SpecificCycle {
    pub fluid: Refrigerant,
    pub points: Vec<StatePoint>,
    pub legs: Vec<Leg>,
    /// Evaporator duty per kg of evaporator flow [J/kg]
    pub q_evaporator: f64,
    /// Condenser duty per kg of evaporator flow [J/kg]
    pub q_condenser: f64,
    /// Subcooler duty per kg of evaporator flow [J/kg]
    pub q_subcooler: f64,
    /// Refrigerant share of the compressed mass (below 1 with circulating oil)
    pub refrigerant_fraction: f64,
}

impl SpecificCycle {
    pub fn new(fluid: Refrigerant) -> Self {
        Self {
            fluid,
            points: Vec::new(),
            legs: Vec::new(),
            q_evaporator: 0.0,
            q_condenser: 0.0,
            q_subcooler: 0.0,
            refrigerant_fraction: 1.0,
        }
    }

    pub fn push_point(&mut self, label: impl Into<String>, state: StateProperties) {
        self.points.push(StatePoint {
            label: label.into(),
            state,
        });
    }

    pub fn push_leg(
        &mut self,
        label: impl Into<String>,
        spec: &CompressorSpec,
        suction: StateProperties,
        outcome: CompressionOutcome,
        flow_ratio: f64,
    ) {
        self.legs.push(Leg {
            label: label.into(),
            spec: spec.clone(),
            suction,
            outcome,
            flow_ratio,
        });
    }

    /// Specific compressor work summed over legs [J/kg of evaporator flow].
    pub fn specific_work(&self) -> f64 {
        self.legs
            .iter()
            .map(|l| l.flow_ratio * l.outcome.actual_work)
            .sum()
    }

    pub fn q_rejected(&self) -> f64 {
        self.q_condenser + self.q_subcooler
    }

    fn check_balance(&self) -> CalcResult<()> {
        if self.q_evaporator <= 0.0 {
            return Err(CalculationError::Invariant {
                what: format!(
                    "evaporator duty must be positive, got {:.1} J/kg",
                    self.q_evaporator
                ),
            });
        }
        let absorbed = self.q_evaporator + self.specific_work();
        if !nearly_equal(absorbed, self.q_rejected(), BALANCE) {
            return Err(CalculationError::Invariant {
                what: format!(
                    "energy balance not closed: in {:.3} J/kg, out {:.3} J/kg",
                    absorbed,
                    self.q_rejected()
                ),
            });
        }
        Ok(())
    }

    fn evaporator_flow(&self, mode: CycleMode, duty: Option<Duty>) -> CalcResult<f64> {
        match duty {
            Some(Duty::MassFlow(m)) => Ok(m.value),
            Some(Duty::CoolingCapacity(q)) => Ok(q.value / self.q_evaporator),
            Some(Duty::HeatingCapacity(q)) => Ok(q.value / self.q_rejected()),
            None => {
                let leg = self.legs.first().ok_or_else(|| CalculationError::Invariant {
                    what: "cycle has no compression leg".to_string(),
                })?;
                let swept = leg
                    .spec
                    .swept_volume
                    .ok_or(CalculationError::MissingParameter {
                        mode: mode.number(),
                        what: "duty or low-stage swept volume",
                    })?;
                let lambda = leg
                    .spec
                    .volumetric
                    .evaluate_fraction(leg.outcome.pressure_ratio, "volumetric efficiency")
                    .map_err(|e| CalculationError::component(self.fluid, &leg.label, e))?;
                let intake = intake_mass_flow(swept, lambda.value, leg.suction.density)
                    .map_err(|e| CalculationError::component(self.fluid, &leg.label, e))?;
                Ok(intake.value * self.refrigerant_fraction / leg.flow_ratio)
            }
        }
    }

    /// Resolve the evaporator flow from `duty` and produce the scaled result.
    pub fn scale(self, mode: CycleMode, duty: Option<Duty>) -> CalcResult<CycleResult> {
        self.check_balance()?;
        let m_evap = self.evaporator_flow(mode, duty)?;
        if !m_evap.is_finite() || m_evap <= 0.0 {
            return Err(CalculationError::invalid(format!(
                "duty resolves to a non-positive evaporator mass flow ({m_evap})"
            )));
        }

        let mut warnings = Vec::new();
        let mut stages = Vec::with_capacity(self.legs.len());
        for leg in &self.legs {
            let wrap = |e| CalculationError::component(self.fluid, &leg.label, e);

            if let Some(c) = leg.outcome.clamped {
                warnings.push(clamp_warning(&leg.label, "isentropic efficiency", c));
            }
            let lambda = leg
                .spec
                .volumetric
                .evaluate_fraction(leg.outcome.pressure_ratio, "volumetric efficiency")
                .map_err(wrap)?;
            if let Some(c) = lambda.clamped {
                warnings.push(clamp_warning(&leg.label, "volumetric efficiency", c));
            }

            let mass_flow = m_evap * leg.flow_ratio;
            let swept = required_swept_volume(
                kgps(mass_flow / self.refrigerant_fraction),
                lambda.value,
                leg.suction.density,
            )
            .map_err(wrap)?;
            let chain = layer_losses(
                watts(mass_flow * leg.outcome.actual_work),
                leg.spec.mechanical_efficiency,
                &leg.spec.motor,
            )
            .map_err(wrap)?;
            if let Some(c) = chain.motor_clamped {
                warnings.push(clamp_warning(&leg.label, "motor efficiency", c));
            }

            debug!(
                stage = %leg.label,
                mass_flow,
                pressure_ratio = leg.outcome.pressure_ratio,
                eta_is = leg.outcome.efficiency,
                discharge_k = leg.outcome.outlet.temperature.value,
                indicated_w = chain.indicated.value,
                "stage resolved"
            );

            stages.push(StageResult {
                label: leg.label.clone(),
                compressor: leg.spec.name.clone(),
                mass_flow: kgps(mass_flow),
                suction_pressure: leg.suction.pressure,
                discharge_pressure: leg.outcome.outlet.pressure,
                pressure_ratio: leg.outcome.pressure_ratio,
                isentropic_efficiency: leg.outcome.efficiency,
                volumetric_efficiency: lambda.value,
                isentropic_work: leg.outcome.isentropic_work,
                actual_work: leg.outcome.actual_work,
                indicated_power: chain.indicated,
                shaft_power: chain.shaft,
                input_power: chain.input,
                discharge_temperature: leg.outcome.outlet.temperature,
                required_swept_volume: swept,
            });
        }

        let cooling = watts(m_evap * self.q_evaporator);
        let rejected = watts(m_evap * self.q_rejected());
        let metrics = combine_metrics(
            &stages,
            cooling,
            rejected,
            watts(m_evap * self.q_subcooler),
            kgps(m_evap),
        );

        Ok(CycleResult {
            mode,
            fluid: self.fluid,
            points: self.points,
            stages,
            metrics,
            warnings,
            loops: Vec::new(),
        })
    }
}

/// Sum stage powers and derive the COP family.
pub(crate) fn combine_metrics(
    stages: &[StageResult],
    cooling: Power,
    rejected: Power,
    subcooler: Power,
    evaporator_mass_flow: MassRate,
) -> CycleMetrics {
    let indicated: f64 = stages.iter().map(|s| s.indicated_power.value).sum();
    let shaft: f64 = stages.iter().map(|s| s.shaft_power.value).sum();
    let input: f64 = stages.iter().map(|s| s.input_power.value).sum();

    CycleMetrics {
        cooling_capacity: cooling,
        heat_rejected: rejected,
        subcooler_duty: subcooler,
        indicated_power: watts(indicated),
        shaft_power: watts(shaft),
        input_power: watts(input),
        cop: cooling.value / indicated,
        cop_heating: rejected.value / indicated,
        cop_electrical: cooling.value / input,
        evaporator_mass_flow,
    }
}

fn clamp_warning(stage: &str, characteristic: &'static str, c: Clamped) -> CalculationWarning {
    warn!(
        stage,
        characteristic,
        requested = c.requested,
        used = c.used,
        "characteristic evaluated outside its domain; clamped"
    );
    CalculationWarning::EfficiencyCurveClamped {
        stage: stage.to_string(),
        characteristic,
        requested: c.requested,
        used: c.used,
    }
}
