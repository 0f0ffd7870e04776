//! Low-level fitting routines for a single model family.
//!
//! Given points `(x_i, y_i)` and a concrete family, we solve the linear least
//! squares problem the family reduces to:
//!
//! - two-parameter families: a straight line in transformed space
//!   (`ln y` for exponential, `ln x` for logarithmic, both for power), solved in
//!   closed form from four sums
//! - polynomial families: the `(d+1)x(d+1)` normal equations
//!   `X[i][j] = Σ x^(i+j)`, `Y[i] = Σ y·x^i`, solved by Gaussian elimination
//!
//! Points outside a transform's domain (`x <= 0` under `ln x`, `y <= 0` under
//! `ln y`) are skipped when building the sums, and the regression uses the
//! number of points actually summed. Residual metrics are still computed over
//! the full point set.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::domain::{FitResult, ModelFamily, Point};
use crate::error::FitError;
use crate::math::{LinearSums, Line, solve_linear_system};
use crate::metrics::fit_quality;
use crate::models::{Form, ModelDef, lookup};

/// Fit `family` to `points` and return its coefficient vector.
///
/// `Best` runs model selection and returns the winner's coefficients; use
/// [`crate::fit::fit_best`] to also learn which family won.
pub fn fit(family: ModelFamily, points: &[Point]) -> Result<Vec<f64>, FitError> {
    if family == ModelFamily::Best {
        return crate::fit::selection::fit_best(points).map(|(_, coeffs)| coeffs);
    }
    fit_concrete(lookup(family)?, points)
}

/// Fit a family and compute its diagnostics over the same points.
///
/// For `Best` the returned `family` is the resolved concrete family.
pub fn fit_model(family: ModelFamily, points: &[Point]) -> Result<FitResult, FitError> {
    if family == ModelFamily::Best {
        return crate::fit::selection::fit_and_select(points).map(|selection| selection.best);
    }

    let coefficients = fit_concrete(lookup(family)?, points)?;
    let quality = fit_quality(family, &coefficients, points);
    Ok(FitResult {
        family,
        coefficients,
        quality,
    })
}

fn fit_concrete(def: &ModelDef, points: &[Point]) -> Result<Vec<f64>, FitError> {
    if points.len() < def.param_count {
        return Err(FitError::InsufficientData {
            family: def.family,
            needed: def.param_count,
            got: points.len(),
        });
    }

    let coefficients = (def.fit)(def, points)?;
    debug_assert_eq!(coefficients.len(), def.param_count);
    Ok(coefficients)
}

/// `y = a·x + b` -> `[a, b]`.
pub fn fit_linear(def: &ModelDef, points: &[Point]) -> Result<Vec<f64>, FitError> {
    let line = fit_line(def, points)?;
    Ok(vec![line.slope, line.intercept])
}

/// `y = a + b·ln(x)` -> `[a, b]`.
pub fn fit_logarithmic(def: &ModelDef, points: &[Point]) -> Result<Vec<f64>, FitError> {
    let line = fit_line(def, points)?;
    Ok(vec![line.intercept, line.slope])
}

/// `y = a·e^(b·x)` or `y = a·x^b` -> `[a, b]`.
///
/// Both are fitted on `ln y`, so the intercept is `ln a`.
pub fn fit_multiplicative(def: &ModelDef, points: &[Point]) -> Result<Vec<f64>, FitError> {
    let line = fit_line(def, points)?;
    let a = line.intercept.exp();
    if !a.is_finite() {
        return Err(FitError::DomainEvaluation {
            family: def.family,
            reason: format!("scale factor e^{} overflows", line.intercept),
        });
    }
    Ok(vec![a, line.slope])
}

/// `y = c0 + c1·x + ... + cd·x^d` -> `[c0, ..., cd]`.
pub fn fit_polynomial(def: &ModelDef, points: &[Point]) -> Result<Vec<f64>, FitError> {
    let Form::Polynomial { degree } = def.form else {
        return Err(FitError::InvalidFamily(format!(
            "{} is not a polynomial model",
            def.family
        )));
    };
    let m = degree + 1;

    // Normal equations. Powers up to x^(2d) are needed for the matrix.
    let mut x_mat = DMatrix::<f64>::zeros(m, m);
    let mut y_vec = DVector::<f64>::zeros(m);
    let mut powers = vec![0.0; 2 * degree + 1];

    for p in points {
        let mut xp = 1.0;
        for power in powers.iter_mut() {
            *power = xp;
            xp *= p.x;
        }
        for i in 0..m {
            for j in 0..m {
                x_mat[(i, j)] += powers[i + j];
            }
            y_vec[i] += p.y * powers[i];
        }
    }

    let coeffs = solve_linear_system(&x_mat, &y_vec)?;
    Ok(coeffs.iter().copied().collect())
}

/// Straight-line fit in the family's transformed space.
fn fit_line(def: &ModelDef, points: &[Point]) -> Result<Line, FitError> {
    let Form::Linearized { x: x_axis, y: y_axis } = def.form else {
        return Err(FitError::InvalidFamily(format!(
            "{} is not a two-parameter model",
            def.family
        )));
    };

    let sums: LinearSums = points.iter().filter_map(|p| def.transform(p)).collect();

    let skipped = points.len() - sums.n;
    if skipped > 0 {
        debug!(
            "{}: skipped {skipped} of {} point(s) outside the domain (x {}, y {}).",
            def.family,
            points.len(),
            x_axis.domain_label(),
            y_axis.domain_label()
        );
    }

    if sums.n == 0 {
        return Err(FitError::DomainEvaluation {
            family: def.family,
            reason: format!(
                "no points satisfy x {} and y {}",
                x_axis.domain_label(),
                y_axis.domain_label()
            ),
        });
    }
    if sums.n < def.param_count {
        return Err(FitError::InsufficientData {
            family: def.family,
            needed: def.param_count,
            got: sums.n,
        });
    }

    sums.solve()
}
