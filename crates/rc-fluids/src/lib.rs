//! rc-fluids: refrigerant property lookups for refcalc.
//!
//! Provides:
//! - Refrigerant identities (pure fluids and pseudo-pure named blends)
//! - Two-property state inputs and the resulting property bundle
//! - `PropertyProvider` trait for property lookups
//! - CoolProp backend for real fluid properties
//! - A per-calculation lookup cache
//!
//! # Architecture
//!
//! This crate defines a stable API (`PropertyProvider` trait) that isolates the cycle
//! solvers from backend dependencies. CoolProp (via `rfluids`) is the only backend; the
//! solvers never see `rfluids` types.
//!
//! # Example
//!
//! ```no_run
//! use rc_core::units::degc;
//! use rc_fluids::{CoolPropProvider, PropertyProvider, Refrigerant, StateInput};
//!
//! let provider = CoolPropProvider::new();
//! let dew = provider
//!     .lookup(Refrigerant::R134a, StateInput::TQ { t: degc(-10.0), q: 1.0 })
//!     .unwrap();
//! println!("p_sat = {} Pa, h_g = {} J/kg", dew.pressure.value, dew.enthalpy);
//! ```

pub mod cache;
pub mod coolprop;
pub mod error;
pub mod provider;
pub mod refrigerant;
pub mod saturation;
pub mod state;

// Re-exports for ergonomics
pub use cache::{CacheStats, PropertyCache};
pub use coolprop::CoolPropProvider;
pub use error::{FluidError, FluidResult};
pub use provider::PropertyProvider;
pub use refrigerant::Refrigerant;
pub use saturation::{
    SaturationSide, saturated_at_pressure, saturated_at_temperature, saturation_pressure,
    saturation_temperature,
};
pub use state::{SpecEnthalpy, SpecEntropy, StateInput, StateProperties};
