//! One-dimensional characteristic curves.
//!
//! Compressor data sheets give efficiencies as a fixed number, a fitted polynomial over
//! a stated range, or a table of points. All three evaluate the same way: inside the
//! domain the value is returned as-is, outside it the argument is clamped to the nearest
//! boundary and the clamp is reported so callers can surface a warning.

use crate::common::{check_finite, check_fraction};
use crate::error::{ComponentError, ComponentResult};

/// Scalar function of one argument (usually pressure ratio or load fraction).
#[derive(Debug, Clone, PartialEq)]
pub enum Characteristic {
    /// Same value everywhere.
    Constant(f64),
    /// value = Σ cᵢ·xⁱ on `domain = (min, max)`.
    Polynomial {
        coefficients: Vec<f64>,
        domain: (f64, f64),
    },
    /// Piecewise-linear through `(x, y)` points with strictly increasing `x`.
    Curve { points: Vec<(f64, f64)> },
}

/// Record of an out-of-domain evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clamped {
    pub requested: f64,
    pub used: f64,
}

/// Result of evaluating a characteristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub value: f64,
    pub clamped: Option<Clamped>,
}

impl Characteristic {
    pub fn constant(value: f64) -> Self {
        Characteristic::Constant(value)
    }

    /// Build a polynomial, validating coefficients and domain.
    pub fn polynomial(coefficients: Vec<f64>, min: f64, max: f64) -> ComponentResult<Self> {
        let c = Characteristic::Polynomial {
            coefficients,
            domain: (min, max),
        };
        c.validate()?;
        Ok(c)
    }

    /// Build a piecewise-linear curve, validating its points.
    pub fn curve(points: Vec<(f64, f64)>) -> ComponentResult<Self> {
        let c = Characteristic::Curve { points };
        c.validate()?;
        Ok(c)
    }

    pub fn validate(&self) -> ComponentResult<()> {
        match self {
            Characteristic::Constant(v) => check_finite(*v, "characteristic constant"),
            Characteristic::Polynomial {
                coefficients,
                domain,
            } => {
                if coefficients.is_empty() {
                    return Err(ComponentError::InvalidArg {
                        what: "polynomial needs at least one coefficient",
                    });
                }
                for c in coefficients {
                    check_finite(*c, "polynomial coefficient")?;
                }
                check_finite(domain.0, "polynomial domain")?;
                check_finite(domain.1, "polynomial domain")?;
                if domain.0 >= domain.1 {
                    return Err(ComponentError::InvalidArg {
                        what: "polynomial domain must satisfy min < max",
                    });
                }
                Ok(())
            }
            Characteristic::Curve { points } => {
                if points.len() < 2 {
                    return Err(ComponentError::InvalidArg {
                        what: "curve needs at least two points",
                    });
                }
                for (x, y) in points {
                    check_finite(*x, "curve abscissa")?;
                    check_finite(*y, "curve ordinate")?;
                }
                if points.windows(2).any(|w| w[1].0 <= w[0].0) {
                    return Err(ComponentError::InvalidArg {
                        what: "curve abscissae must be strictly increasing",
                    });
                }
                Ok(())
            }
        }
    }

    /// Valid argument range, `None` for constants.
    pub fn domain(&self) -> Option<(f64, f64)> {
        match self {
            Characteristic::Constant(_) => None,
            Characteristic::Polynomial { domain, .. } => Some(*domain),
            Characteristic::Curve { points } => match (points.first(), points.last()) {
                (Some(first), Some(last)) => Some((first.0, last.0)),
                _ => None,
            },
        }
    }

    /// Evaluate at `x`, clamping to the domain.
    pub fn evaluate(&self, x: f64) -> ComponentResult<Evaluation> {
        check_finite(x, "characteristic argument")?;

        let (used, clamped) = match self.domain() {
            Some((min, max)) if x < min || x > max => {
                let used = x.clamp(min, max);
                (
                    used,
                    Some(Clamped {
                        requested: x,
                        used,
                    }),
                )
            }
            _ => (x, None),
        };

        let value = match self {
            Characteristic::Constant(v) => *v,
            Characteristic::Polynomial { coefficients, .. } => coefficients
                .iter()
                .rev()
                .fold(0.0, |acc, c| acc * used + c),
            Characteristic::Curve { points } => interpolate(points, used),
        };

        check_finite(value, "characteristic value")?;
        Ok(Evaluation { value, clamped })
    }

    /// Evaluate an efficiency; the result must lie in (0, 1].
    pub fn evaluate_fraction(&self, x: f64, what: &'static str) -> ComponentResult<Evaluation> {
        let eval = self.evaluate(x)?;
        check_fraction(eval.value, what)?;
        Ok(eval)
    }
}

fn interpolate(points: &[(f64, f64)], x: f64) -> f64 {
    // x is already inside [first, last]
    for w in points.windows(2) {
        let (x0, y0) = w[0];
        let (x1, y1) = w[1];
        if x <= x1 {
            return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
        }
    }
    points.last().map(|p| p.1).unwrap_or(f64::NAN)
}
