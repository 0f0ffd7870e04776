//! Best-model selection.
//!
//! Every concrete family is fitted to the same points and the one with the
//! smallest residual sum of squares wins. Families are tried in catalog order
//! (linear, quadratic, cubic, exponential, logarithmic, power) and a later
//! family must be strictly better to replace an earlier one, so ties go to the
//! simpler model.
//!
//! A family that cannot be fitted (too few usable points, singular system) or
//! whose RSS is not finite (points outside its domain) is skipped rather than
//! failing the whole selection.

use log::{debug, warn};

use crate::domain::{FitResult, ModelFamily, Point};
use crate::error::FitError;
use crate::fit::fitter::fit_model;
use crate::models::catalog;

/// Output of fitting + selection.
#[derive(Debug, Clone)]
pub struct FitSelection {
    pub best: FitResult,
    /// Every family that produced a usable fit, in catalog order.
    pub fits: Vec<FitResult>,
    /// Families that were skipped and why.
    pub skipped: Vec<(ModelFamily, FitError)>,
}

/// Fit every concrete family and pick the best.
///
/// An empty point set fails with `InsufficientData` before any family is
/// tried; `NoViableModel` means points were given but nothing fit them.
pub fn fit_and_select(points: &[Point]) -> Result<FitSelection, FitError> {
    if points.is_empty() {
        let needed = catalog::all()
            .iter()
            .map(|def| def.param_count)
            .min()
            .unwrap_or(1);
        return Err(FitError::InsufficientData {
            family: ModelFamily::Best,
            needed,
            got: 0,
        });
    }

    let mut fits = Vec::new();
    let mut skipped = Vec::new();

    for def in catalog::all() {
        match fit_model(def.family, points) {
            Ok(fit) if fit.quality.rss.is_finite() => {
                debug!("{}: rss={:.6e}", fit.family, fit.quality.rss);
                fits.push(fit);
            }
            Ok(fit) => {
                warn!(
                    "Skipping {} model: residuals are undefined for some points.",
                    fit.family
                );
                skipped.push((
                    fit.family,
                    FitError::DomainEvaluation {
                        family: fit.family,
                        reason: "residual sum of squares is not finite".to_string(),
                    },
                ));
            }
            Err(err) => {
                warn!("Skipping {} model: {err}", def.family);
                skipped.push((def.family, err));
            }
        }
    }

    let best = best_of(&fits).cloned().ok_or(FitError::NoViableModel)?;
    debug!("Selected {} model (rss={:.6e}).", best.family, best.quality.rss);

    Ok(FitSelection {
        best,
        fits,
        skipped,
    })
}

/// The fit with the smallest RSS; the earliest wins a tie.
pub fn best_of(fits: &[FitResult]) -> Option<&FitResult> {
    let mut best: Option<&FitResult> = None;
    for fit in fits {
        match best {
            Some(current) if fit.quality.rss < current.quality.rss => best = Some(fit),
            None => best = Some(fit),
            _ => {}
        }
    }
    best
}

/// The family with the smallest RSS on `points`.
pub fn select_best(points: &[Point]) -> Result<ModelFamily, FitError> {
    fit_and_select(points).map(|selection| selection.best.family)
}

/// Resolve `Best`: the winning family and its coefficients.
pub fn fit_best(points: &[Point]) -> Result<(ModelFamily, Vec<f64>), FitError> {
    let selection = fit_and_select(points)?;
    Ok((selection.best.family, selection.best.coefficients))
}
