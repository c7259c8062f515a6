//! State inputs and property bundles.

use rc_core::units::{Density, Pressure, Temperature};
use std::fmt;

/// Specific enthalpy [J/kg].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecEnthalpy = f64;

/// Specific entropy [J/(kg·K)].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecEntropy = f64;

/// Two independent properties that fix a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateInput {
    /// Pressure and temperature (single-phase only).
    PT { p: Pressure, t: Temperature },
    /// Pressure and specific enthalpy.
    PH { p: Pressure, h: SpecEnthalpy },
    /// Pressure and specific entropy.
    PS { p: Pressure, s: SpecEntropy },
    /// Pressure and vapor quality (saturation).
    PQ { p: Pressure, q: f64 },
    /// Temperature and vapor quality (saturation).
    TQ { t: Temperature, q: f64 },
}

impl StateInput {
    /// Short name of the input pair.
    pub fn label(&self) -> &'static str {
        match self {
            StateInput::PT { .. } => "P-T",
            StateInput::PH { .. } => "P-h",
            StateInput::PS { .. } => "P-s",
            StateInput::PQ { .. } => "P-Q",
            StateInput::TQ { .. } => "T-Q",
        }
    }

    /// Stable tag and raw SI values, used as cache key material.
    pub(crate) fn key_parts(&self) -> (u8, f64, f64) {
        match *self {
            StateInput::PT { p, t } => (0, p.value, t.value),
            StateInput::PH { p, h } => (1, p.value, h),
            StateInput::PS { p, s } => (2, p.value, s),
            StateInput::PQ { p, q } => (3, p.value, q),
            StateInput::TQ { t, q } => (4, t.value, q),
        }
    }
}

impl fmt::Display for StateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateInput::PT { p, t } => write!(f, "P={:.1} Pa, T={:.3} K", p.value, t.value),
            StateInput::PH { p, h } => write!(f, "P={:.1} Pa, h={:.1} J/kg", p.value, h),
            StateInput::PS { p, s } => write!(f, "P={:.1} Pa, s={:.3} J/(kg K)", p.value, s),
            StateInput::PQ { p, q } => write!(f, "P={:.1} Pa, Q={:.4}", p.value, q),
            StateInput::TQ { t, q } => write!(f, "T={:.3} K, Q={:.4}", t.value, q),
        }
    }
}

/// Complete set of properties returned by one lookup.
///
/// All fields come from the same backend state; a `StateProperties` is never
/// assembled from pieces of different lookups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateProperties {
    pub pressure: Pressure,
    pub temperature: Temperature,
    pub density: Density,
    /// Specific enthalpy [J/kg]
    pub enthalpy: SpecEnthalpy,
    /// Specific entropy [J/(kg·K)]
    pub entropy: SpecEntropy,
    /// Vapor quality, present only inside the two-phase region.
    pub quality: Option<f64>,
}

impl StateProperties {
    pub fn pressure_pa(&self) -> f64 {
        self.pressure.value
    }

    pub fn temperature_k(&self) -> f64 {
        self.temperature.value
    }

    pub fn density_kg_m3(&self) -> f64 {
        self.density.value
    }

    pub fn is_two_phase(&self) -> bool {
        self.quality.is_some()
    }

    /// Summary string of all contained properties (for debugging).
    pub fn summary(&self) -> String {
        let q = self
            .quality
            .map(|q| format!("{q:.4}"))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "State(P={:.0}Pa,T={:.2}K,ρ={:.3}kg/m³,h={:.1}J/kg,s={:.2}J/kg·K,Q={})",
            self.pressure.value, self.temperature.value, self.density.value, self.enthalpy,
            self.entropy, q
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_core::units::{k, pa};

    #[test]
    fn display_mentions_both_inputs() {
        let input = StateInput::PT {
            p: pa(200_000.0),
            t: k(263.15),
        };
        let text = input.to_string();
        assert!(text.contains("200000.0 Pa"));
        assert!(text.contains("263.150 K"));
        assert_eq!(input.label(), "P-T");
    }

    #[test]
    fn key_parts_distinguish_pairs() {
        let a = StateInput::PQ {
            p: pa(1.0e5),
            q: 1.0,
        };
        let b = StateInput::PH {
            p: pa(1.0e5),
            h: 1.0,
        };
        assert_ne!(a.key_parts().0, b.key_parts().0);
    }
}
