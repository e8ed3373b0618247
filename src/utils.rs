//! Tolerance handling and small floating-point helpers.

use std::fmt;

use crate::error::InputError;

/// Default accept tolerance ε, in the same unit as the catalog (mm for the
/// reference sets).
pub const DEFAULT_TOLERANCE: f64 = 0.005;

/// Strict absolute tolerance used by the accept test `|sum - target| < ε`.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Tolerance(f64);

impl Tolerance {
    pub fn new(epsilon: f64) -> Result<Self, InputError> {
        if epsilon.is_finite() && epsilon > 0.0 {
            Ok(Self(epsilon))
        } else {
            Err(InputError::InvalidTolerance(epsilon))
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Strict accept test. A sum exactly `ε` away from the target is rejected.
    #[inline]
    pub fn accepts(self, sum: f64, target: f64) -> bool {
        (sum - target).abs() < self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_TOLERANCE)
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sum `values` left to right starting from `0.0`.
///
/// This is the accumulation order the engine uses for partial sums, so the
/// result is bit-identical to [`Combination::sum`](crate::blocks::Combination::sum).
#[inline]
pub fn sequential_sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc + v)
}

/// True when `target` lies beyond anything `count` blocks totalling `total`
/// could reach, even allowing for rounding in a different summation order.
#[inline]
pub fn beyond_total(target: f64, total: f64, count: usize, tolerance: Tolerance) -> bool {
    let slack = total * f64::EPSILON * count as f64;
    target - total >= tolerance.value() + slack
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_and_non_finite_tolerances() {
        for bad in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(Tolerance::new(bad).is_err(), "{bad} accepted");
        }
        assert_eq!(Tolerance::new(1e-9).map(Tolerance::value), Ok(1e-9));
    }

    #[test]
    fn default_is_five_thousandths() {
        assert_eq!(Tolerance::default().value(), DEFAULT_TOLERANCE);
        assert_eq!(DEFAULT_TOLERANCE, 0.005);
    }

    #[test]
    fn accept_test_is_strict() {
        // 0.5 and 0.25 are exact in binary, so these land on the boundary.
        let tol = Tolerance::new(0.5).unwrap();
        assert!(!tol.accepts(1.0, 1.5));
        assert!(!tol.accepts(2.0, 1.5));
        assert!(tol.accepts(1.25, 1.5));
        assert!(tol.accepts(1.5, 1.5));
    }

    #[test]
    fn sequential_sum_of_empty_is_zero() {
        assert_eq!(sequential_sum(&[]), 0.0);
        assert_eq!(sequential_sum(&[5.0, 1.0]), 6.0);
    }

    #[test]
    fn beyond_total_keeps_targets_within_tolerance() {
        let tol = Tolerance::default();
        assert!(!beyond_total(11.0, 11.0, 4, tol));
        assert!(!beyond_total(11.004, 11.0, 4, tol));
        assert!(beyond_total(11.5, 11.0, 4, tol));
        assert!(beyond_total(1.0, 0.0, 0, tol));
    }
}
