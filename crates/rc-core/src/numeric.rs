//! Float comparisons for closing cycle balances.

use crate::RcError;

/// Scalar used for every quantity value.
pub type Real = f64;

/// Absolute and relative slack for [`nearly_equal`].
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Heat balances built from property-backend enthalpies.
    pub const ENERGY_BALANCE: Tolerances = Tolerances {
        abs: 1e-6,
        rel: 1e-6,
    };
}

/// `|a - b| <= abs`, or within `rel` of the larger magnitude.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RcError> {
    if !v.is_finite() {
        return Err(RcError::NonFinite { what, value: v });
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn balance_tolerance_accepts_rounding_noise() {
        let q_rejected = 125_431.7;
        assert!(nearly_equal(q_rejected, q_rejected * (1.0 + 5e-7), Tolerances::ENERGY_BALANCE));
        assert!(!nearly_equal(q_rejected, q_rejected + 1.0, Tolerances::ENERGY_BALANCE));
        assert!(nearly_equal(0.0, 5e-7, Tolerances::ENERGY_BALANCE));
    }

    #[test]
    fn non_finite_values_are_named() {
        let err = ensure_finite(Real::NAN, "suction enthalpy").unwrap_err();
        assert!(err.to_string().contains("suction enthalpy"));
        assert_eq!(ensure_finite(2.5, "cop"), Ok(2.5));
    }

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            let tol = Tolerances::ENERGY_BALANCE;
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }
    }
}
