//! Shared "fit pipeline" logic used by the `fit` and `compare` commands.
//!
//! ingest -> fit (or select) -> residuals
//!
//! The commands then only decide how to present the outputs.

use log::info;

use crate::domain::{FitConfig, FitResult, ModelFamily, PointLimits};
use crate::error::AppError;
use crate::fit::fitter::fit_model;
use crate::fit::selection::{FitSelection, fit_and_select};
use crate::io::ingest::{IngestedData, load_points};
use crate::report::{Residual, compute_residuals};

/// All computed outputs of a single `trendfit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    /// The reported fit; for `best` this is the selected family.
    pub fit: FitResult,
    /// Present when `best` was requested.
    pub selection: Option<FitSelection>,
    pub residuals: Vec<Residual>,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let ingest = load_points(&config.input, config.limits)?;
    run_fit_on(ingest, config.family)
}

/// Fit already-ingested points.
pub fn run_fit_on(ingest: IngestedData, family: ModelFamily) -> Result<RunOutput, AppError> {
    let (fit, selection) = if family == ModelFamily::Best {
        let selection = fit_and_select(&ingest.points)?;
        (selection.best.clone(), Some(selection))
    } else {
        (fit_model(family, &ingest.points)?, None)
    };
    info!("Fitted {} model to {} point(s).", fit.family, ingest.points.len());

    let residuals = compute_residuals(&ingest.points, &fit);

    Ok(RunOutput {
        ingest,
        fit,
        selection,
        residuals,
    })
}

/// Load points and fit every family.
pub fn run_compare(
    input: &std::path::Path,
    limits: PointLimits,
) -> Result<(IngestedData, FitSelection), AppError> {
    let ingest = load_points(input, limits)?;
    let selection = fit_and_select(&ingest.points)?;
    Ok((ingest, selection))
}
