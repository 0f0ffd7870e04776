//! Closed-form model evaluation.
//!
//! Each function takes the family's coefficient vector in its canonical order:
//!
//! - Linear: `[a, b]` for `y = a·x + b`
//! - Quadratic / Cubic: `[c0, c1, ..., cd]` for `y = c0 + c1·x + ... + cd·x^d`
//! - Exponential: `[a, b]` for `y = a·e^(b·x)`
//! - Logarithmic: `[a, b]` for `y = a + b·ln(x)`
//! - Power: `[a, b]` for `y = a·x^b`
//!
//! Logarithmic and power models are undefined for `x <= 0`; their evaluators
//! return NaN there instead of whatever `ln`/`powf` would produce (`-inf`, `0`,
//! `inf` depending on the sign of `b`).
//!
//! # Panics
//! Evaluators index the slice directly. Callers go through [`predict`] or
//! [`crate::metrics::evaluate`], which check the length first.

use crate::domain::ModelFamily;
use crate::models::catalog;

pub fn eval_linear(c: &[f64], x: f64) -> f64 {
    c[0] * x + c[1]
}

/// Horner evaluation of `c0 + c1·x + ... + cd·x^d`.
pub fn eval_polynomial(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

pub fn eval_exponential(c: &[f64], x: f64) -> f64 {
    c[0] * (c[1] * x).exp()
}

pub fn eval_logarithmic(c: &[f64], x: f64) -> f64 {
    if x > 0.0 { c[0] + c[1] * x.ln() } else { f64::NAN }
}

pub fn eval_power(c: &[f64], x: f64) -> f64 {
    if x > 0.0 { c[0] * x.powf(c[1]) } else { f64::NAN }
}

/// Predict `y(x)` for a fitted model.
///
/// Returns NaN (rather than failing) for `Best`, for a coefficient vector of the
/// wrong length, and outside the model's domain. Used by residual/R²/plot code
/// where a single undefined point should poison the aggregate, not abort it.
pub fn predict(family: ModelFamily, coeffs: &[f64], x: f64) -> f64 {
    match catalog::lookup(family) {
        Ok(def) if coeffs.len() == def.param_count => (def.evaluate)(coeffs, x),
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn polynomial_uses_ascending_order() {
        // 1 + 2x + 3x² at x = 2 -> 17
        assert_relative_eq!(eval_polynomial(&[1.0, 2.0, 3.0], 2.0), 17.0);
        // 1 - x + 0x² + x³ at x = -2 -> -5
        assert_relative_eq!(eval_polynomial(&[1.0, -1.0, 0.0, 1.0], -2.0), -5.0);
    }

    #[test]
    fn closed_forms_match_definitions() {
        assert_relative_eq!(eval_linear(&[2.0, 1.0], 3.0), 7.0);
        assert_relative_eq!(eval_exponential(&[2.0, 0.5], 2.0), 2.0 * 1.0_f64.exp());
        assert_relative_eq!(eval_logarithmic(&[1.0, 2.0], std::f64::consts::E), 3.0, epsilon = 1e-12);
        assert_relative_eq!(eval_power(&[3.0, 2.0], 4.0), 48.0);
    }

    #[test]
    fn log_and_power_are_nan_at_non_positive_x() {
        assert!(eval_logarithmic(&[1.0, 1.0], 0.0).is_nan());
        assert!(eval_logarithmic(&[1.0, 1.0], -1.0).is_nan());
        assert!(eval_power(&[1.0, 2.0], 0.0).is_nan());
        assert!(eval_power(&[1.0, 0.5], -4.0).is_nan());
    }

    #[test]
    fn predict_guards_bad_inputs() {
        assert!(predict(ModelFamily::Best, &[1.0, 2.0], 1.0).is_nan());
        assert!(predict(ModelFamily::Quadratic, &[1.0, 2.0], 1.0).is_nan());
        assert_relative_eq!(predict(ModelFamily::Linear, &[2.0, 1.0], 3.0), 7.0);
    }
}
