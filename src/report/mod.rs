//! Reporting utilities: residuals, text tables, and JSON reports.
//!
//! Formatting lives here so the fitting core stays free of presentation code.

pub mod format;
pub mod json;

pub use format::*;
pub use json::*;

use serde::Serialize;

use crate::domain::{FitResult, Point};
use crate::models::{Form, lookup, predict};

/// Fitted value and residual for one observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Residual {
    pub point: Point,
    pub y_fit: f64,
    /// `y - y_fit`; NaN where the model is undefined at `x`.
    pub residual: f64,
}

/// Compute fitted values and residuals for each point, in input order.
pub fn compute_residuals(points: &[Point], fit: &FitResult) -> Vec<Residual> {
    points
        .iter()
        .map(|p| {
            let y_fit = predict(fit.family, &fit.coefficients, p.x);
            Residual {
                point: *p,
                y_fit,
                residual: p.y - y_fit,
            }
        })
        .collect()
}

/// Coefficient labels in the family's canonical order.
///
/// Polynomials use `c0..cd` (ascending powers); two-parameter models use `a, b`.
pub fn coefficient_names(fit: &FitResult) -> Vec<String> {
    match lookup(fit.family).map(|def| def.form) {
        Ok(Form::Polynomial { .. }) => (0..fit.coefficients.len()).map(|i| format!("c{i}")).collect(),
        _ => (0..fit.coefficients.len())
            .map(|i| match i {
                0 => "a".to_string(),
                1 => "b".to_string(),
                _ => format!("p{i}"),
            })
            .collect(),
    }
}

/// Formula string for a family, or an empty string for `Best`.
pub fn formula(fit: &FitResult) -> &'static str {
    lookup(fit.family).map(|def| def.formula).unwrap_or("")
}
