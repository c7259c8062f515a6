//! Compressor specification.

use crate::characteristic::{Characteristic, Evaluation};
use crate::common::{check_fraction, check_positive};
use crate::error::ComponentResult;
use rc_core::units::{Power, VolumeRate};

/// Drive motor efficiency.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorEfficiency {
    /// Fixed motor efficiency in (0, 1].
    Constant(f64),
    /// Efficiency as a function of load fraction = shaft power / rated shaft power.
    LoadDependent {
        rated_shaft_power: Power,
        curve: Characteristic,
    },
}

impl MotorEfficiency {
    pub fn validate(&self) -> ComponentResult<()> {
        match self {
            MotorEfficiency::Constant(eta) => check_fraction(*eta, "motor efficiency"),
            MotorEfficiency::LoadDependent {
                rated_shaft_power,
                curve,
            } => {
                check_positive(rated_shaft_power.value, "rated shaft power must be positive")?;
                curve.validate()
            }
        }
    }

    /// Motor efficiency at the given shaft power.
    pub fn at(&self, shaft: Power) -> ComponentResult<Evaluation> {
        match self {
            MotorEfficiency::Constant(eta) => {
                check_fraction(*eta, "motor efficiency")?;
                Ok(Evaluation {
                    value: *eta,
                    clamped: None,
                })
            }
            MotorEfficiency::LoadDependent {
                rated_shaft_power,
                curve,
            } => {
                check_positive(rated_shaft_power.value, "rated shaft power must be positive")?;
                let load = shaft.value / rated_shaft_power.value;
                curve.evaluate_fraction(load, "motor efficiency")
            }
        }
    }
}

/// Fluid-independent description of one compression stage.
///
/// Efficiencies are characteristics over pressure ratio p_out/p_in. The swept volume
/// is only needed when the cycle is sized from compressor displacement.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressorSpec {
    pub name: String,
    pub isentropic: Characteristic,
    pub volumetric: Characteristic,
    pub swept_volume: Option<VolumeRate>,
    pub mechanical_efficiency: f64,
    pub motor: MotorEfficiency,
}

impl CompressorSpec {
    /// Ideal-mechanics compressor with a constant isentropic efficiency.
    pub fn isentropic(eta: f64) -> Self {
        Self::with_characteristic(Characteristic::Constant(eta))
    }

    /// Ideal-mechanics compressor with an efficiency characteristic over pressure ratio.
    pub fn with_characteristic(isentropic: Characteristic) -> Self {
        Self {
            name: "compressor".to_string(),
            isentropic,
            volumetric: Characteristic::Constant(1.0),
            swept_volume: None,
            mechanical_efficiency: 1.0,
            motor: MotorEfficiency::Constant(1.0),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_swept_volume(mut self, swept: VolumeRate) -> Self {
        self.swept_volume = Some(swept);
        self
    }

    pub fn with_volumetric_efficiency(mut self, volumetric: Characteristic) -> Self {
        self.volumetric = volumetric;
        self
    }

    pub fn with_mechanical_efficiency(mut self, eta: f64) -> Self {
        self.mechanical_efficiency = eta;
        self
    }

    pub fn with_motor(mut self, motor: MotorEfficiency) -> Self {
        self.motor = motor;
        self
    }

    /// Check every parameter that can be checked without a pressure ratio.
    pub fn validate(&self) -> ComponentResult<()> {
        self.isentropic.validate()?;
        self.volumetric.validate()?;
        if let Characteristic::Constant(eta) = self.isentropic {
            check_fraction(eta, "isentropic efficiency")?;
        }
        if let Characteristic::Constant(eta) = self.volumetric {
            check_fraction(eta, "volumetric efficiency")?;
        }
        if let Some(swept) = self.swept_volume {
            check_positive(swept.value, "swept volume must be positive")?;
        }
        check_fraction(self.mechanical_efficiency, "mechanical efficiency")?;
        self.motor.validate()
    }
}
