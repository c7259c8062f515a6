//! Cycle topologies.

use std::fmt;

/// Supported cycle topologies.
///
/// Mode numbers follow the calculator's numbering; mode 3 has a single-stage and a
/// two-stage flash-economizer variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleMode {
    /// Mode 2: single stage with oil-dilution correction.
    SingleStageOil,
    /// Mode 3: single stage, refrigerant only.
    SingleStage,
    /// Mode 3, two-stage variant: one flash economizer with vapor injection.
    TwoStageFlash,
    /// Mode 4: two single-stage loops coupled by a cascade heat exchanger.
    Cascade,
    /// Mode 5: two stages, one mass flow, liquid subcooler at the intermediate level.
    TwoStageSubcooled,
    /// Mode 6: three stages with two flash economizers.
    TwoStageDoubleEconomizer,
    /// Mode 7: ammonia heat pump driven by heat-delivery temperature.
    AmmoniaHeatPump,
}

impl CycleMode {
    pub const ALL: [CycleMode; 7] = [
        CycleMode::SingleStageOil,
        CycleMode::SingleStage,
        CycleMode::TwoStageFlash,
        CycleMode::Cascade,
        CycleMode::TwoStageSubcooled,
        CycleMode::TwoStageDoubleEconomizer,
        CycleMode::AmmoniaHeatPump,
    ];

    pub fn number(&self) -> u8 {
        match self {
            CycleMode::SingleStageOil => 2,
            CycleMode::SingleStage | CycleMode::TwoStageFlash => 3,
            CycleMode::Cascade => 4,
            CycleMode::TwoStageSubcooled => 5,
            CycleMode::TwoStageDoubleEconomizer => 6,
            CycleMode::AmmoniaHeatPump => 7,
        }
    }

    /// Resolve a mode number; `two_stage` only matters for mode 3.
    pub fn from_number(n: u8, two_stage: bool) -> Option<CycleMode> {
        match (n, two_stage) {
            (2, _) => Some(CycleMode::SingleStageOil),
            (3, false) => Some(CycleMode::SingleStage),
            (3, true) => Some(CycleMode::TwoStageFlash),
            (4, _) => Some(CycleMode::Cascade),
            (5, _) => Some(CycleMode::TwoStageSubcooled),
            (6, _) => Some(CycleMode::TwoStageDoubleEconomizer),
            (7, _) => Some(CycleMode::AmmoniaHeatPump),
            _ => None,
        }
    }

    /// Number of compression legs in one refrigerant loop.
    pub fn stage_count(&self) -> usize {
        match self {
            CycleMode::SingleStageOil
            | CycleMode::SingleStage
            | CycleMode::Cascade
            | CycleMode::AmmoniaHeatPump => 1,
            CycleMode::TwoStageFlash | CycleMode::TwoStageSubcooled => 2,
            CycleMode::TwoStageDoubleEconomizer => 3,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CycleMode::SingleStageOil => "single stage with oil correction",
            CycleMode::SingleStage => "single stage",
            CycleMode::TwoStageFlash => "two stage with flash economizer",
            CycleMode::Cascade => "cascade",
            CycleMode::TwoStageSubcooled => "two stage with liquid subcooler",
            CycleMode::TwoStageDoubleEconomizer => "two stage with two economizers",
            CycleMode::AmmoniaHeatPump => "ammonia heat pump",
        }
    }
}

impl fmt::Display for CycleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mode {} ({})", self.number(), self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_roundtrip() {
        for mode in CycleMode::ALL {
            let two_stage = mode == CycleMode::TwoStageFlash;
            assert_eq!(CycleMode::from_number(mode.number(), two_stage), Some(mode));
        }
        assert_eq!(CycleMode::from_number(1, false), None);
        assert_eq!(CycleMode::from_number(8, false), None);
    }

    #[test]
    fn display_includes_number() {
        assert_eq!(
            CycleMode::Cascade.to_string(),
            "mode 4 (cascade)"
        );
        assert_eq!(CycleMode::TwoStageDoubleEconomizer.stage_count(), 3);
    }
}
