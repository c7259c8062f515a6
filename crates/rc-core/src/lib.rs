//! rc-core: units, float helpers and the base error shared by every refcalc crate.
//!
//! Quantities are `uom` SI types. The constructors in [`units`] cover the scales
//! refrigeration work is quoted in: °C, bar, kelvin differences, kW and m³/h.

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{RcError, RcResult};
pub use numeric::*;
pub use units::*;
