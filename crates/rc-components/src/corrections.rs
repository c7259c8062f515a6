//! Stateless corrections applied around the compressor model.
//!
//! None of these perform property lookups.

use crate::characteristic::Clamped;
use crate::common::{check_finite, check_fraction, check_positive};
use crate::error::{ComponentError, ComponentResult};
use crate::spec::MotorEfficiency;
use rc_core::units::{
    Density, MassRate, Power, TempInterval, Temperature, VolumeRate, dk, k, kgps, m3ps, watts,
};

/// Actual intake mass flow from displacement.
///
/// `m = V_swept · λ · ρ_suction`
pub fn intake_mass_flow(
    swept_volume: VolumeRate,
    volumetric_efficiency: f64,
    suction_density: Density,
) -> ComponentResult<MassRate> {
    check_positive(swept_volume.value, "swept volume must be positive")?;
    check_fraction(volumetric_efficiency, "volumetric efficiency")?;
    check_positive(suction_density.value, "suction density must be positive")?;
    Ok(kgps(
        swept_volume.value * volumetric_efficiency * suction_density.value,
    ))
}

/// Swept volume needed to deliver `mass_flow`; inverse of [`intake_mass_flow`].
pub fn required_swept_volume(
    mass_flow: MassRate,
    volumetric_efficiency: f64,
    suction_density: Density,
) -> ComponentResult<VolumeRate> {
    check_finite(mass_flow.value, "mass flow")?;
    if mass_flow.value < 0.0 {
        return Err(ComponentError::InvalidArg {
            what: "mass flow cannot be negative",
        });
    }
    check_fraction(volumetric_efficiency, "volumetric efficiency")?;
    check_positive(suction_density.value, "suction density must be positive")?;
    Ok(m3ps(
        mass_flow.value / (volumetric_efficiency * suction_density.value),
    ))
}

/// Oil circulating with the refrigerant.
///
/// Dissolved oil lowers the refrigerant's partial pressure, so at a given mixture
/// temperature the pressure equals the pure-refrigerant saturation pressure at a lower
/// temperature. The offset is
///
/// ```text
/// ΔT = C · w / (1 - w)
/// ```
///
/// with oil mass fraction `w` and an empirical coefficient `C` taken from the oil
/// supplier's solubility data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OilDilution {
    pub oil_mass_fraction: f64,
    pub temperature_shift_coefficient: TempInterval,
}

impl OilDilution {
    pub fn new(oil_mass_fraction: f64, coefficient: TempInterval) -> ComponentResult<Self> {
        let oil = Self {
            oil_mass_fraction,
            temperature_shift_coefficient: coefficient,
        };
        oil.validate()?;
        Ok(oil)
    }

    pub fn validate(&self) -> ComponentResult<()> {
        check_finite(self.oil_mass_fraction, "oil mass fraction")?;
        if !(0.0..1.0).contains(&self.oil_mass_fraction) {
            return Err(ComponentError::InvalidArg {
                what: "oil mass fraction must lie in [0, 1)",
            });
        }
        check_finite(
            self.temperature_shift_coefficient.value,
            "oil shift coefficient",
        )
    }

    /// ΔT = C · w / (1 - w)
    pub fn saturation_shift(&self) -> TempInterval {
        let w = self.oil_mass_fraction;
        dk(self.temperature_shift_coefficient.value * w / (1.0 - w))
    }

    /// Pure-refrigerant saturation temperature to look up for a mixture at `t`.
    pub fn lookup_temperature(&self, t: Temperature) -> Temperature {
        k(t.value - self.saturation_shift().value)
    }

    /// Refrigerant share of the circulated mixture mass flow.
    pub fn refrigerant_fraction(&self) -> f64 {
        1.0 - self.oil_mass_fraction
    }
}

/// Indicated → shaft → electrical input power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerChain {
    pub indicated: Power,
    pub shaft: Power,
    pub input: Power,
    pub mechanical_efficiency: f64,
    pub motor_efficiency: f64,
    /// Set when a load-dependent motor curve was evaluated outside its domain
    pub motor_clamped: Option<Clamped>,
}

/// Layer mechanical and motor losses onto indicated power.
pub fn layer_losses(
    indicated: Power,
    mechanical_efficiency: f64,
    motor: &MotorEfficiency,
) -> ComponentResult<PowerChain> {
    check_finite(indicated.value, "indicated power")?;
    if indicated.value < 0.0 {
        return Err(ComponentError::InvalidArg {
            what: "indicated power cannot be negative",
        });
    }
    check_fraction(mechanical_efficiency, "mechanical efficiency")?;

    let shaft = watts(indicated.value / mechanical_efficiency);
    let motor_eta = motor.at(shaft)?;
    let input = watts(shaft.value / motor_eta.value);

    Ok(PowerChain {
        indicated,
        shaft,
        input,
        mechanical_efficiency,
        motor_efficiency: motor_eta.value,
        motor_clamped: motor_eta.clamped,
    })
}
