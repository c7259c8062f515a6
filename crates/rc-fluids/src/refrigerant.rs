//! Working-fluid identities.

use std::fmt;

/// Refrigerants available to the cycle calculator.
///
/// The named blends (R404A, R407C, R410A, R507A) are handled by the backend as
/// pseudo-pure fluids, so a single identity token is enough to look them up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Refrigerant {
    /// Ammonia (R717)
    Ammonia,
    /// Carbon dioxide (R744)
    CarbonDioxide,
    /// Chlorodifluoromethane
    R22,
    /// Difluoromethane
    R32,
    /// Pentafluoroethane
    R125,
    /// 1,1,1,2-Tetrafluoroethane
    R134a,
    /// 1,1-Difluoroethane
    R152a,
    /// 2,3,3,3-Tetrafluoropropene
    R1234yf,
    /// Propane (R290)
    Propane,
    /// Isobutane (R600a)
    Isobutane,
    /// Propylene (R1270)
    Propylene,
    /// R125/R143a/R134a blend
    R404A,
    /// R32/R125/R134a blend
    R407C,
    /// R32/R125 blend
    R410A,
    /// R125/R143a azeotrope
    R507A,
}

impl Refrigerant {
    pub const ALL: [Refrigerant; 15] = [
        Refrigerant::Ammonia,
        Refrigerant::CarbonDioxide,
        Refrigerant::R22,
        Refrigerant::R32,
        Refrigerant::R125,
        Refrigerant::R134a,
        Refrigerant::R152a,
        Refrigerant::R1234yf,
        Refrigerant::Propane,
        Refrigerant::Isobutane,
        Refrigerant::Propylene,
        Refrigerant::R404A,
        Refrigerant::R407C,
        Refrigerant::R410A,
        Refrigerant::R507A,
    ];

    /// ASHRAE 34 designation, used as the canonical key in input files.
    pub fn key(&self) -> &'static str {
        match self {
            Refrigerant::Ammonia => "R717",
            Refrigerant::CarbonDioxide => "R744",
            Refrigerant::R22 => "R22",
            Refrigerant::R32 => "R32",
            Refrigerant::R125 => "R125",
            Refrigerant::R134a => "R134a",
            Refrigerant::R152a => "R152a",
            Refrigerant::R1234yf => "R1234yf",
            Refrigerant::Propane => "R290",
            Refrigerant::Isobutane => "R600a",
            Refrigerant::Propylene => "R1270",
            Refrigerant::R404A => "R404A",
            Refrigerant::R407C => "R407C",
            Refrigerant::R410A => "R410A",
            Refrigerant::R507A => "R507A",
        }
    }

    /// Get human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Refrigerant::Ammonia => "Ammonia",
            Refrigerant::CarbonDioxide => "Carbon Dioxide",
            Refrigerant::Propane => "Propane",
            Refrigerant::Isobutane => "Isobutane",
            Refrigerant::Propylene => "Propylene",
            other => other.key(),
        }
    }

    /// Whether the fluid is a multi-component blend (glide possible).
    pub fn is_blend(&self) -> bool {
        matches!(
            self,
            Refrigerant::R404A | Refrigerant::R407C | Refrigerant::R410A | Refrigerant::R507A
        )
    }

    /// Map to the rfluids substance (internal use for CoolProp backend).
    pub(crate) fn backend_substance(&self) -> BackendSubstance {
        use rfluids::prelude::{PredefinedMix, Pure};
        match self {
            Refrigerant::Ammonia => BackendSubstance::Pure(Pure::Ammonia),
            Refrigerant::CarbonDioxide => BackendSubstance::Pure(Pure::CarbonDioxide),
            Refrigerant::R22 => BackendSubstance::Pure(Pure::R22),
            Refrigerant::R32 => BackendSubstance::Pure(Pure::R32),
            Refrigerant::R125 => BackendSubstance::Pure(Pure::R125),
            Refrigerant::R134a => BackendSubstance::Pure(Pure::R134a),
            Refrigerant::R152a => BackendSubstance::Pure(Pure::R152a),
            Refrigerant::R1234yf => BackendSubstance::Pure(Pure::R1234yf),
            Refrigerant::Propane => BackendSubstance::Pure(Pure::nPropane),
            Refrigerant::Isobutane => BackendSubstance::Pure(Pure::Isobutane),
            Refrigerant::Propylene => BackendSubstance::Pure(Pure::Propylene),
            Refrigerant::R404A => BackendSubstance::Mix(PredefinedMix::R404A),
            Refrigerant::R407C => BackendSubstance::Mix(PredefinedMix::R407C),
            Refrigerant::R410A => BackendSubstance::Mix(PredefinedMix::R410A),
            Refrigerant::R507A => BackendSubstance::Mix(PredefinedMix::R507A),
        }
    }
}

/// rfluids substance behind a refrigerant identity.
#[derive(Debug, Clone, Copy)]
pub(crate) enum BackendSubstance {
    Pure(rfluids::prelude::Pure),
    Mix(rfluids::prelude::PredefinedMix),
}

impl fmt::Display for Refrigerant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Refrigerant {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', ' '], "").as_str() {
            "R717" | "NH3" | "AMMONIA" => Ok(Refrigerant::Ammonia),
            "R744" | "CO2" | "CARBONDIOXIDE" => Ok(Refrigerant::CarbonDioxide),
            "R22" => Ok(Refrigerant::R22),
            "R32" => Ok(Refrigerant::R32),
            "R125" => Ok(Refrigerant::R125),
            "R134A" => Ok(Refrigerant::R134a),
            "R152A" => Ok(Refrigerant::R152a),
            "R1234YF" => Ok(Refrigerant::R1234yf),
            "R290" | "PROPANE" | "NPROPANE" => Ok(Refrigerant::Propane),
            "R600A" | "ISOBUTANE" => Ok(Refrigerant::Isobutane),
            "R1270" | "PROPYLENE" | "PROPENE" => Ok(Refrigerant::Propylene),
            "R404A" => Ok(Refrigerant::R404A),
            "R407C" => Ok(Refrigerant::R407C),
            "R410A" => Ok(Refrigerant::R410A),
            "R507A" | "R507" => Ok(Refrigerant::R507A),
            _ => Err("unknown refrigerant"),
        }
    }
}
