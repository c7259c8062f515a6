//! Serializable view of a calculation result, in display units.

use rc_core::units::to_degc;
use rc_cycles::{CycleResult, SweepPoint};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PointRow {
    pub label: String,
    pub pressure_bar: f64,
    pub temperature_c: f64,
    pub enthalpy_kj_per_kg: f64,
    pub entropy_kj_per_kg_k: f64,
    pub density_kg_per_m3: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StageRow {
    pub label: String,
    pub compressor: String,
    pub mass_flow_kg_per_s: f64,
    pub pressure_ratio: f64,
    pub isentropic_efficiency: f64,
    pub volumetric_efficiency: f64,
    pub discharge_temperature_c: f64,
    pub indicated_power_kw: f64,
    pub shaft_power_kw: f64,
    pub input_power_kw: f64,
    pub swept_volume_m3_per_h: f64,
}

#[derive(Debug, Serialize)]
pub struct MetricsRow {
    pub cooling_capacity_kw: f64,
    pub heat_rejected_kw: f64,
    pub subcooler_duty_kw: f64,
    pub indicated_power_kw: f64,
    pub input_power_kw: f64,
    pub cop: f64,
    pub cop_heating: f64,
    pub cop_electrical: f64,
    pub evaporator_mass_flow_kg_per_s: f64,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub case: String,
    pub mode: u8,
    pub topology: &'static str,
    pub fluid: &'static str,
    pub metrics: MetricsRow,
    pub stages: Vec<StageRow>,
    pub points: Vec<PointRow>,
    pub warnings: Vec<String>,
}

impl Report {
    pub fn new(case: &str, result: &CycleResult) -> Self {
        let m = &result.metrics;
        Self {
            case: case.to_string(),
            mode: result.mode.number(),
            topology: result.mode.description(),
            fluid: result.fluid.key(),
            metrics: MetricsRow {
                cooling_capacity_kw: m.cooling_capacity.value / 1e3,
                heat_rejected_kw: m.heat_rejected.value / 1e3,
                subcooler_duty_kw: m.subcooler_duty.value / 1e3,
                indicated_power_kw: m.indicated_power.value / 1e3,
                input_power_kw: m.input_power.value / 1e3,
                cop: m.cop,
                cop_heating: m.cop_heating,
                cop_electrical: m.cop_electrical,
                evaporator_mass_flow_kg_per_s: m.evaporator_mass_flow.value,
            },
            stages: result
                .stages
                .iter()
                .map(|s| StageRow {
                    label: s.label.clone(),
                    compressor: s.compressor.clone(),
                    mass_flow_kg_per_s: s.mass_flow.value,
                    pressure_ratio: s.pressure_ratio,
                    isentropic_efficiency: s.isentropic_efficiency,
                    volumetric_efficiency: s.volumetric_efficiency,
                    discharge_temperature_c: to_degc(s.discharge_temperature),
                    indicated_power_kw: s.indicated_power.value / 1e3,
                    shaft_power_kw: s.shaft_power.value / 1e3,
                    input_power_kw: s.input_power.value / 1e3,
                    swept_volume_m3_per_h: s.required_swept_volume.value * 3600.0,
                })
                .collect(),
            points: result
                .points
                .iter()
                .map(|p| PointRow {
                    label: p.label.clone(),
                    pressure_bar: p.state.pressure.value / 1e5,
                    temperature_c: to_degc(p.state.temperature),
                    enthalpy_kj_per_kg: p.state.enthalpy / 1e3,
                    entropy_kj_per_kg_k: p.state.entropy / 1e3,
                    density_kg_per_m3: p.state.density.value,
                    quality: p.state.quality,
                })
                .collect(),
            warnings: result.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn print_table(&self) {
        println!(
            "Case {} - mode {} ({}), {}",
            self.case, self.mode, self.topology, self.fluid
        );
        println!();
        println!(
            "  {:<28} {:>10} {:>10} {:>12} {:>12} {:>8}",
            "point", "p [bar]", "T [°C]", "h [kJ/kg]", "s [kJ/kgK]", "x [-]"
        );
        for p in &self.points {
            let quality = p
                .quality
                .map(|q| format!("{q:.3}"))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {:<28} {:>10.3} {:>10.2} {:>12.2} {:>12.4} {:>8}",
                p.label,
                p.pressure_bar,
                p.temperature_c,
                p.enthalpy_kj_per_kg,
                p.entropy_kj_per_kg_k,
                quality
            );
        }
        println!();
        for s in &self.stages {
            println!(
                "  {} [{}]: m = {:.4} kg/s, PR = {:.2}, eta_is = {:.3}, lambda = {:.3}, \
                 t_dis = {:.1} °C, P_ind = {:.2} kW, P_in = {:.2} kW, V = {:.1} m³/h",
                s.label,
                s.compressor,
                s.mass_flow_kg_per_s,
                s.pressure_ratio,
                s.isentropic_efficiency,
                s.volumetric_efficiency,
                s.discharge_temperature_c,
                s.indicated_power_kw,
                s.input_power_kw,
                s.swept_volume_m3_per_h
            );
        }
        println!();
        let m = &self.metrics;
        println!("  Cooling capacity:  {:.2} kW", m.cooling_capacity_kw);
        println!("  Heat rejected:     {:.2} kW", m.heat_rejected_kw);
        if m.subcooler_duty_kw > 0.0 {
            println!("  Subcooler duty:    {:.2} kW", m.subcooler_duty_kw);
        }
        println!("  Indicated power:   {:.2} kW", m.indicated_power_kw);
        println!("  Input power:       {:.2} kW", m.input_power_kw);
        println!(
            "  COP {:.3}   heating COP {:.3}   electrical COP {:.3}",
            m.cop, m.cop_heating, m.cop_electrical
        );
        for w in &self.warnings {
            println!("  warning: {w}");
        }
    }
}

/// One line of a sweep series.
#[derive(Debug, Serialize)]
pub struct SweepRow {
    pub condensing_temperature_c: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cop: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooling_capacity_kw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicated_power_kw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discharge_temperature_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&SweepPoint> for SweepRow {
    fn from(point: &SweepPoint) -> Self {
        let t = to_degc(point.condensing_temperature);
        match &point.result {
            Ok(r) => SweepRow {
                condensing_temperature_c: t,
                cop: Some(r.metrics.cop),
                cooling_capacity_kw: Some(r.metrics.cooling_capacity.value / 1e3),
                indicated_power_kw: Some(r.metrics.indicated_power.value / 1e3),
                max_discharge_temperature_c: r.max_discharge_temperature().map(to_degc),
                error: None,
            },
            Err(e) => SweepRow {
                condensing_temperature_c: t,
                cop: None,
                cooling_capacity_kw: None,
                indicated_power_kw: None,
                max_discharge_temperature_c: None,
                error: Some(e.to_string()),
            },
        }
    }
}
