//! Project file schema.
//!
//! Units in the file are the ones engineers type: °C, bar, K for differences, kW,
//! kg/s and m³/h. Conversion to SI happens in `convert`.

use serde::{Deserialize, Serialize};

/// Newest file version this crate reads and writes.
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectFile {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub cases: Vec<CaseDef>,
}

impl ProjectFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: CURRENT_VERSION,
            name: name.into(),
            cases: Vec::new(),
        }
    }

    pub fn case(&self, id: &str) -> Option<&CaseDef> {
        self.cases.iter().find(|c| c.id == id)
    }
}

/// One calculation: a mode plus everything that mode needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Mode number 2-7
    pub mode: u8,
    /// Selects the flash-economizer variant of mode 3
    #[serde(default)]
    pub two_stage: bool,
    pub fluid: String,
    pub evaporating: LevelDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condensing: Option<LevelDef>,
    #[serde(default)]
    pub superheat_k: f64,
    #[serde(default)]
    pub subcooling_k: f64,
    #[serde(default)]
    pub compressors: Vec<CompressorDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duty: Option<DutyDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate: Option<IntermediateDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub economizers: Vec<IntermediateDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcooler_approach_k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oil: Option<OilDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cascade: Option<CascadeDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_delivery: Option<HeatDeliveryDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum LevelDef {
    SaturationTemperature { t_c: f64 },
    Pressure { p_bar: f64 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum IntermediateDef {
    SaturationTemperature { t_c: f64 },
    Pressure { p_bar: f64 },
    EqualPressureRatio,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DutyDef {
    MassFlow { kg_per_s: f64 },
    CoolingCapacity { kw: f64 },
    HeatingCapacity { kw: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompressorDef {
    #[serde(default = "default_compressor_name")]
    pub name: String,
    /// Isentropic efficiency over pressure ratio
    pub isentropic: CharacteristicDef,
    /// Volumetric efficiency over pressure ratio; 1.0 when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumetric: Option<CharacteristicDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swept_volume_m3_per_h: Option<f64>,
    #[serde(default = "default_efficiency")]
    pub mechanical_efficiency: f64,
    #[serde(default)]
    pub motor: MotorDef,
}

fn default_compressor_name() -> String {
    "compressor".to_string()
}

fn default_efficiency() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum CharacteristicDef {
    Constant {
        value: f64,
    },
    Polynomial {
        /// Ascending powers: c0 + c1·x + c2·x² ...
        coefficients: Vec<f64>,
        min: f64,
        max: f64,
    },
    Curve {
        points: Vec<[f64; 2]>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum MotorDef {
    Constant {
        efficiency: f64,
    },
    LoadDependent {
        rated_shaft_kw: f64,
        /// Efficiency over shaft-power load fraction
        curve: CharacteristicDef,
    },
}

impl Default for MotorDef {
    fn default() -> Self {
        MotorDef::Constant { efficiency: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OilDef {
    pub oil_mass_fraction: f64,
    /// Empirical coefficient C in ΔT = C·w/(1-w)
    pub shift_coefficient_k: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CascadeDef {
    pub high_fluid: String,
    pub cascade_condensing: LevelDef,
    pub approach_k: f64,
    #[serde(default)]
    pub high_superheat_k: f64,
    #[serde(default)]
    pub high_subcooling_k: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HeatDeliveryDef {
    pub supply_temperature_c: f64,
    pub approach_k: f64,
}
