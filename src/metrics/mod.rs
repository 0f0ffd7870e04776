//! Evaluation and goodness-of-fit metrics.
//!
//! - [`evaluate`]: checked model evaluation at a single x
//! - [`residual_sum_of_squares`]: `Σ (y - ŷ)²` over *all* points
//! - [`pearson_correlation`]: linear correlation of the raw points
//! - [`r_squared`]: coefficient of determination `1 - RSS/TSS`
//!
//! Degenerate inputs return sentinels instead of errors:
//!
//! | metric | input | result |
//! | --- | --- | --- |
//! | Pearson r | empty set, or zero variance in x or y | `0.0` |
//! | R² | empty set | NaN |
//! | R² | flat y, zero residuals | `1.0` |
//! | R² | flat y, non-zero residuals | NaN |
//!
//! "Zero variance" and "flat" mean every value equals the others up to
//! `f64::EPSILON` of the largest magnitude.
//!
//! RSS and R² use the unchecked [`predict`], so a point outside the model's
//! domain (e.g. `x <= 0` for logarithmic) makes both NaN.

use crate::domain::{FitQuality, ModelFamily, Point};
use crate::error::FitError;
use crate::models::{catalog, predict};

/// Relative tolerance for treating a residual sum of squares as zero.
const ZERO_SS_TOL: f64 = 1e-12;

/// Evaluate a fitted model at `x`.
///
/// Fails for `Best` (not a concrete model), for a coefficient vector of the
/// wrong length, and with `DomainEvaluation` for logarithmic/power models at
/// `x <= 0`.
pub fn evaluate(family: ModelFamily, coeffs: &[f64], x: f64) -> Result<f64, FitError> {
    let def = catalog::lookup(family)?;
    if coeffs.len() != def.param_count {
        return Err(FitError::CoefficientCount {
            family,
            expected: def.param_count,
            got: coeffs.len(),
        });
    }
    if !def.admits_x(x) {
        return Err(FitError::DomainEvaluation {
            family,
            reason: format!("x = {x} is outside the domain x > 0"),
        });
    }
    Ok((def.evaluate)(coeffs, x))
}

/// `Σ (y_actual - y_predicted)²` over every point.
pub fn residual_sum_of_squares(family: ModelFamily, coeffs: &[f64], points: &[Point]) -> f64 {
    points
        .iter()
        .map(|p| {
            let r = p.y - predict(family, coeffs, p.x);
            r * r
        })
        .sum()
}

/// Root mean squared error from a residual sum of squares.
pub fn rmse(rss: f64, n: usize) -> f64 {
    if n == 0 {
        return f64::NAN;
    }
    (rss / n as f64).sqrt()
}

/// Pearson correlation coefficient of the points.
///
/// Returns `0.0` for an empty set or when either coordinate has zero variance.
pub fn pearson_correlation(points: &[Point]) -> f64 {
    if points.is_empty()
        || is_flat(points.iter().map(|p| p.x))
        || is_flat(points.iter().map(|p| p.y))
    {
        return 0.0;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;

    let mut s_xy = 0.0;
    let mut s_xx = 0.0;
    let mut s_yy = 0.0;
    for p in points {
        let dx = p.x - mean_x;
        let dy = p.y - mean_y;
        s_xy += dx * dy;
        s_xx += dx * dx;
        s_yy += dy * dy;
    }

    let denominator = (s_xx * s_yy).sqrt();
    if !(denominator > 0.0 && denominator.is_finite()) {
        return 0.0;
    }

    (s_xy / denominator).clamp(-1.0, 1.0)
}

/// Coefficient of determination, `1 - RSS / TSS`.
///
/// See the module docs for the degenerate cases.
pub fn r_squared(family: ModelFamily, coeffs: &[f64], points: &[Point]) -> f64 {
    if points.is_empty() {
        return f64::NAN;
    }

    let residual_ss = residual_sum_of_squares(family, coeffs, points);
    if is_flat(points.iter().map(|p| p.y)) {
        let scale = points
            .iter()
            .map(|p| p.y * p.y)
            .sum::<f64>()
            .max(f64::MIN_POSITIVE);
        return if residual_ss <= ZERO_SS_TOL * scale {
            1.0
        } else {
            f64::NAN
        };
    }

    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / points.len() as f64;
    let total_ss: f64 = points.iter().map(|p| (p.y - mean_y).powi(2)).sum();
    1.0 - residual_ss / total_ss
}

/// Range within `f64::EPSILON` of the largest magnitude.
fn is_flat(values: impl Iterator<Item = f64>) -> bool {
    let (min, max, max_abs) = values.fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0_f64),
        |(min, max, max_abs), v| (min.min(v), max.max(v), max_abs.max(v.abs())),
    );
    max - min <= f64::EPSILON * max_abs
}

/// All diagnostics for a fitted model over the given points.
///
/// Pearson r is only reported for the linear family, where it describes the
/// fitted relationship.
pub fn fit_quality(family: ModelFamily, coeffs: &[f64], points: &[Point]) -> FitQuality {
    let rss = residual_sum_of_squares(family, coeffs, points);
    FitQuality {
        rss,
        rmse: rmse(rss, points.len()),
        r_squared: r_squared(family, coeffs, points),
        pearson: (family == ModelFamily::Linear).then(|| pearson_correlation(points)),
        n: points.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn line_points(slope: f64, intercept: f64) -> Vec<Point> {
        (1..=8)
            .map(|i| {
                let x = i as f64;
                Point::new(x, slope * x + intercept)
            })
            .collect()
    }

    #[test]
    fn evaluate_checks_domain() {
        let err = evaluate(ModelFamily::Logarithmic, &[1.0, 2.0], 0.0).unwrap_err();
        assert!(matches!(
            err,
            FitError::DomainEvaluation {
                family: ModelFamily::Logarithmic,
                ..
            }
        ));

        let err = evaluate(ModelFamily::Power, &[1.0, 2.0], -2.0).unwrap_err();
        assert!(matches!(err, FitError::DomainEvaluation { .. }));

        // Exponential is defined everywhere.
        let y = evaluate(ModelFamily::Exponential, &[2.0, 0.5], -2.0).unwrap();
        assert_relative_eq!(y, 2.0 * (-1.0_f64).exp());
    }

    #[test]
    fn evaluate_rejects_wrong_coefficient_count_and_best() {
        assert_eq!(
            evaluate(ModelFamily::Cubic, &[1.0, 2.0], 1.0).unwrap_err(),
            FitError::CoefficientCount {
                family: ModelFamily::Cubic,
                expected: 4,
                got: 2,
            }
        );
        assert!(matches!(
            evaluate(ModelFamily::Best, &[1.0, 2.0], 1.0),
            Err(FitError::InvalidFamily(_))
        ));
    }

    #[test]
    fn rss_counts_every_point() {
        let points = vec![Point::new(0.0, 1.0), Point::new(1.0, 3.0), Point::new(2.0, 4.0)];
        // y = x + 1 -> residuals 0, 1, 1
        let rss = residual_sum_of_squares(ModelFamily::Linear, &[1.0, 1.0], &points);
        assert_abs_diff_eq!(rss, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rmse(rss, points.len()), (2.0_f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn rss_is_nan_outside_log_domain() {
        let points = vec![Point::new(0.0, 1.0), Point::new(1.0, 1.0)];
        assert!(residual_sum_of_squares(ModelFamily::Logarithmic, &[1.0, 1.0], &points).is_nan());
    }

    #[test]
    fn pearson_is_plus_or_minus_one_on_lines() {
        assert_relative_eq!(pearson_correlation(&line_points(2.0, 0.0)), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pearson_correlation(&line_points(-3.0, 5.0)), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn pearson_degenerate_cases_return_zero() {
        assert_eq!(pearson_correlation(&[]), 0.0);
        // Zero variance in y.
        assert_eq!(pearson_correlation(&line_points(0.0, 4.0)), 0.0);
        // Zero variance in x.
        let vertical: Vec<Point> = (0..5).map(|i| Point::new(2.0, i as f64)).collect();
        assert_eq!(pearson_correlation(&vertical), 0.0);
    }

    #[test]
    fn pearson_treats_inexact_constants_as_zero_variance() {
        // 0.1 has no exact binary form, so one-pass sums leave rounding noise.
        let constant_x: Vec<Point> = (0..8).map(|i| Point::new(0.1, i as f64)).collect();
        assert_eq!(pearson_correlation(&constant_x), 0.0);

        let constant_y: Vec<Point> = (0..8).map(|i| Point::new(i as f64, 0.1)).collect();
        assert_eq!(pearson_correlation(&constant_y), 0.0);
    }

    #[test]
    fn pearson_is_unaffected_by_a_large_offset() {
        let points = line_points(1.0, 0.0);
        let shifted: Vec<Point> = points.iter().map(|p| Point::new(p.x, p.y + 1e8)).collect();
        assert_relative_eq!(pearson_correlation(&shifted), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn r_squared_is_one_for_exact_fit() {
        let points = line_points(2.0, 0.0);
        assert_relative_eq!(r_squared(ModelFamily::Linear, &[2.0, 0.0], &points), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn r_squared_for_mean_model_is_zero() {
        let points = line_points(1.0, 0.0);
        // Predicting the mean (4.5) everywhere explains nothing.
        let r2 = r_squared(ModelFamily::Linear, &[0.0, 4.5], &points);
        assert_abs_diff_eq!(r2, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn r_squared_keeps_real_variance_under_a_large_offset() {
        // y = x ± 0.5 around the line y = x; every value is exact in f64.
        let wobble = |i: i32| if i % 2 == 0 { 0.5 } else { -0.5 };
        let near: Vec<Point> = (1..=8)
            .map(|i| Point::new(i as f64, i as f64 + wobble(i)))
            .collect();
        let far: Vec<Point> = near.iter().map(|p| Point::new(p.x, p.y + 1e8)).collect();

        let r2_near = r_squared(ModelFamily::Linear, &[1.0, 0.0], &near);
        let r2_far = r_squared(ModelFamily::Linear, &[1.0, 1e8], &far);
        assert!(r2_near < 0.99);
        assert_relative_eq!(r2_far, r2_near, epsilon = 1e-9);
    }

    #[test]
    fn r_squared_with_zero_total_variance() {
        let flat = line_points(0.0, 0.1);
        assert_eq!(r_squared(ModelFamily::Linear, &[0.0, 0.1], &flat), 1.0);
        assert!(r_squared(ModelFamily::Linear, &[1.0, 0.0], &flat).is_nan());
        assert!(r_squared(ModelFamily::Linear, &[1.0, 0.0], &[]).is_nan());
    }

    #[test]
    fn quality_reports_pearson_only_for_linear() {
        let points = line_points(2.0, 1.0);
        let linear = fit_quality(ModelFamily::Linear, &[2.0, 1.0], &points);
        assert_eq!(linear.n, 8);
        assert_abs_diff_eq!(linear.rss, 0.0, epsilon = 1e-12);
        assert_relative_eq!(linear.pearson.unwrap(), 1.0, epsilon = 1e-12);

        let quad = fit_quality(ModelFamily::Quadratic, &[1.0, 2.0, 0.0], &points);
        assert!(quad.pearson.is_none());
        assert_abs_diff_eq!(quad.rss, 0.0, epsilon = 1e-12);
    }
}
