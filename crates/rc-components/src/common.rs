//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use rc_core::numeric::ensure_finite;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Ensure an efficiency-like value lies in (0, 1].
pub fn check_fraction(value: f64, what: &'static str) -> ComponentResult<()> {
    check_finite(value, what)?;
    if value <= 0.0 || value > 1.0 {
        return Err(ComponentError::NonPhysical { what });
    }
    Ok(())
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> ComponentResult<()> {
    check_finite(value, what)?;
    if value <= 0.0 {
        return Err(ComponentError::InvalidArg { what });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_check_fraction() {
        assert!(check_fraction(1.0, "eta").is_ok());
        assert!(check_fraction(0.5, "eta").is_ok());
        assert!(check_fraction(0.0, "eta").is_err());
        assert!(check_fraction(1.01, "eta").is_err());
    }

    #[test]
    fn test_check_positive() {
        assert!(check_positive(1e-9, "x").is_ok());
        assert!(check_positive(0.0, "x").is_err());
        assert!(check_positive(-1.0, "x").is_err());
    }
}
