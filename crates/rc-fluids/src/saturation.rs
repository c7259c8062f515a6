//! Saturation-line helpers.
//!
//! For blends with glide the bubble line (liquid, Q=0) and dew line (vapor, Q=1)
//! differ; pure fluids give the same answer on either side.

use crate::error::FluidResult;
use crate::provider::PropertyProvider;
use crate::refrigerant::Refrigerant;
use crate::state::{StateInput, StateProperties};
use rc_core::units::{Pressure, Temperature};

/// Which saturation boundary to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaturationSide {
    /// Saturated liquid, Q = 0.
    Bubble,
    /// Saturated vapor, Q = 1.
    Dew,
}

impl SaturationSide {
    pub fn quality(self) -> f64 {
        match self {
            SaturationSide::Bubble => 0.0,
            SaturationSide::Dew => 1.0,
        }
    }
}

/// Saturated state at temperature `t` on the given side.
pub fn saturated_at_temperature<P: PropertyProvider + ?Sized>(
    provider: &P,
    fluid: Refrigerant,
    t: Temperature,
    side: SaturationSide,
) -> FluidResult<StateProperties> {
    provider.lookup(
        fluid,
        StateInput::TQ {
            t,
            q: side.quality(),
        },
    )
}

/// Saturated state at pressure `p` on the given side.
pub fn saturated_at_pressure<P: PropertyProvider + ?Sized>(
    provider: &P,
    fluid: Refrigerant,
    p: Pressure,
    side: SaturationSide,
) -> FluidResult<StateProperties> {
    provider.lookup(
        fluid,
        StateInput::PQ {
            p,
            q: side.quality(),
        },
    )
}

/// Saturation pressure at temperature `t`.
pub fn saturation_pressure<P: PropertyProvider + ?Sized>(
    provider: &P,
    fluid: Refrigerant,
    t: Temperature,
    side: SaturationSide,
) -> FluidResult<Pressure> {
    saturated_at_temperature(provider, fluid, t, side).map(|s| s.pressure)
}

/// Saturation temperature at pressure `p`.
pub fn saturation_temperature<P: PropertyProvider + ?Sized>(
    provider: &P,
    fluid: Refrigerant,
    p: Pressure,
    side: SaturationSide,
) -> FluidResult<Temperature> {
    saturated_at_pressure(provider, fluid, p, side).map(|s| s.temperature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coolprop::CoolPropProvider;
    use rc_core::units::degc;

    #[test]
    fn pressure_temperature_roundtrip() {
        let provider = CoolPropProvider::new();
        let t = degc(0.0);
        let p = saturation_pressure(&provider, Refrigerant::R134a, t, SaturationSide::Dew).unwrap();
        let back =
            saturation_temperature(&provider, Refrigerant::R134a, p, SaturationSide::Dew).unwrap();
        assert!((back.value - t.value).abs() < 1e-3);
    }

    #[test]
    fn pure_fluid_has_no_glide() {
        let provider = CoolPropProvider::new();
        let t = degc(20.0);
        let bubble =
            saturation_pressure(&provider, Refrigerant::Ammonia, t, SaturationSide::Bubble)
                .unwrap();
        let dew =
            saturation_pressure(&provider, Refrigerant::Ammonia, t, SaturationSide::Dew).unwrap();
        assert!((bubble.value - dew.value).abs() / dew.value < 1e-6);
    }
}
