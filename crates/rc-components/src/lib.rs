//! rc-components: compressor and correction models for refcalc.
//!
//! Provides:
//! - `Characteristic` curves (constant, polynomial, piecewise linear) with domain clamping
//! - `CompressorSpec`, a fluid-independent description of one compression stage
//! - `compress` and its inverse `isentropic_efficiency`
//! - Stateless corrections: volumetric intake, oil dilution, mechanical/motor loss layering
//!
//! Only `compress` and `isentropic_efficiency` perform property lookups; the corrections
//! are plain functions on scalars.

pub mod characteristic;
pub mod common;
pub mod compressor;
pub mod corrections;
pub mod error;
pub mod spec;

pub use characteristic::{Characteristic, Clamped, Evaluation};
pub use compressor::{CompressionOutcome, compress, isentropic_efficiency};
pub use corrections::{
    OilDilution, PowerChain, intake_mass_flow, layer_losses, required_swept_volume,
};
pub use error::{ComponentError, ComponentResult};
pub use spec::{CompressorSpec, MotorEfficiency};
