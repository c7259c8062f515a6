//! Compressor model.
//!
//! ## Model
//!
//! ```text
//! h_s   = h(p_out, s_in)                 isentropic outlet
//! w_s   = h_s - h_in                     specific isentropic work
//! eta   = isentropic(p_out / p_in)       clamped to the characteristic's domain
//! w     = w_s / eta                      specific actual work
//! out   = state(p_out, h_in + w)         real discharge
//! ```
//!
//! Work figures are specific [J/kg]; scaling by mass flow and loss layering happen in
//! the cycle solvers.

use crate::characteristic::Clamped;
use crate::common::check_positive;
use crate::error::{ComponentError, ComponentResult};
use crate::spec::CompressorSpec;
use rc_core::units::Pressure;
use rc_fluids::{PropertyProvider, Refrigerant, StateInput, StateProperties};

/// Everything one compression leg produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionOutcome {
    pub outlet: StateProperties,
    pub isentropic_outlet: StateProperties,
    /// Specific isentropic work [J/kg]
    pub isentropic_work: f64,
    /// Specific actual work [J/kg]
    pub actual_work: f64,
    /// Isentropic efficiency actually applied
    pub efficiency: f64,
    pub pressure_ratio: f64,
    /// Set when the efficiency characteristic was evaluated outside its domain
    pub clamped: Option<Clamped>,
}

fn pressure_ratio(p_in: f64, p_out: f64) -> ComponentResult<f64> {
    check_positive(p_in, "inlet pressure must be positive")?;
    check_positive(p_out, "outlet pressure must be positive")?;
    let ratio = p_out / p_in;
    if ratio <= 1.0 {
        return Err(ComponentError::InvalidPressureRatio { ratio });
    }
    Ok(ratio)
}

/// Compress `inlet` to `p_out` following `spec`.
///
/// # Errors
/// `InvalidPressureRatio` when `p_out <= inlet.pressure`; property errors from the
/// two lookups are passed through.
pub fn compress<P: PropertyProvider + ?Sized>(
    provider: &P,
    fluid: Refrigerant,
    inlet: &StateProperties,
    p_out: Pressure,
    spec: &CompressorSpec,
) -> ComponentResult<CompressionOutcome> {
    let ratio = pressure_ratio(inlet.pressure.value, p_out.value)?;
    let eta = spec
        .isentropic
        .evaluate_fraction(ratio, "isentropic efficiency")?;

    let isentropic_outlet = provider.lookup(
        fluid,
        StateInput::PS {
            p: p_out,
            s: inlet.entropy,
        },
    )?;
    let isentropic_work = isentropic_outlet.enthalpy - inlet.enthalpy;
    if isentropic_work <= 0.0 {
        return Err(ComponentError::NonPhysical {
            what: "isentropic compression work must be positive",
        });
    }

    let actual_work = isentropic_work / eta.value;
    let outlet = provider.lookup(
        fluid,
        StateInput::PH {
            p: p_out,
            h: inlet.enthalpy + actual_work,
        },
    )?;

    Ok(CompressionOutcome {
        outlet,
        isentropic_outlet,
        isentropic_work,
        actual_work,
        efficiency: eta.value,
        pressure_ratio: ratio,
        clamped: eta.clamped,
    })
}

/// Recover the isentropic efficiency that turns `inlet` into `outlet`.
pub fn isentropic_efficiency<P: PropertyProvider + ?Sized>(
    provider: &P,
    fluid: Refrigerant,
    inlet: &StateProperties,
    outlet: &StateProperties,
) -> ComponentResult<f64> {
    pressure_ratio(inlet.pressure.value, outlet.pressure.value)?;

    let actual_work = outlet.enthalpy - inlet.enthalpy;
    if actual_work <= 0.0 {
        return Err(ComponentError::NonPhysical {
            what: "outlet enthalpy must exceed inlet enthalpy",
        });
    }

    let isentropic_outlet = provider.lookup(
        fluid,
        StateInput::PS {
            p: outlet.pressure,
            s: inlet.entropy,
        },
    )?;
    Ok((isentropic_outlet.enthalpy - inlet.enthalpy) / actual_work)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characteristic::Characteristic;
    use rc_core::units::{bar, degc};
    use rc_fluids::CoolPropProvider;

    fn suction(provider: &CoolPropProvider) -> StateProperties {
        provider
            .lookup(
                Refrigerant::R134a,
                StateInput::PT {
                    p: bar(2.0),
                    t: degc(0.0),
                },
            )
            .unwrap()
    }

    #[test]
    fn rejects_non_compressive_ratio() {
        let provider = CoolPropProvider::new();
        let inlet = suction(&provider);
        let err = compress(
            &provider,
            Refrigerant::R134a,
            &inlet,
            bar(1.5),
            &CompressorSpec::isentropic(0.7),
        )
        .unwrap_err();
        match err {
            ComponentError::InvalidPressureRatio { ratio } => assert!((ratio - 0.75).abs() < 1e-9),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn actual_work_exceeds_isentropic() {
        let provider = CoolPropProvider::new();
        let inlet = suction(&provider);
        let out = compress(
            &provider,
            Refrigerant::R134a,
            &inlet,
            bar(10.0),
            &CompressorSpec::isentropic(0.7),
        )
        .unwrap();

        assert!((out.actual_work - out.isentropic_work / 0.7).abs() < 1e-6);
        assert!(out.outlet.temperature.value > out.isentropic_outlet.temperature.value);
        assert!((out.pressure_ratio - 5.0).abs() < 1e-9);
        assert!(out.clamped.is_none());
    }

    #[test]
    fn inversion_recovers_efficiency() {
        let provider = CoolPropProvider::new();
        let inlet = suction(&provider);
        let out = compress(
            &provider,
            Refrigerant::R134a,
            &inlet,
            bar(8.0),
            &CompressorSpec::isentropic(0.65),
        )
        .unwrap();
        let eta =
            isentropic_efficiency(&provider, Refrigerant::R134a, &inlet, &out.outlet).unwrap();
        assert!((eta - 0.65).abs() < 1e-3, "eta = {eta}");
    }

    #[test]
    fn curve_outside_domain_clamps() {
        let provider = CoolPropProvider::new();
        let inlet = suction(&provider);
        let spec = CompressorSpec::with_characteristic(
            Characteristic::curve(vec![(1.5, 0.6), (3.0, 0.72)]).unwrap(),
        );
        let out = compress(&provider, Refrigerant::R134a, &inlet, bar(10.0), &spec).unwrap();
        assert!((out.efficiency - 0.72).abs() < 1e-12);
        let clamped = out.clamped.unwrap();
        assert!((clamped.requested - 5.0).abs() < 1e-9);
        assert_eq!(clamped.used, 3.0);
    }
}
