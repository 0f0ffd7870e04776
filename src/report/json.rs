//! JSON reports (`--format json`).
//!
//! Non-finite numbers (an undefined R² or residual) serialize as `null`.

use serde::Serialize;

use crate::domain::{DatasetStats, FitQuality, FitResult, ModelFamily};
use crate::error::AppError;
use crate::fit::selection::FitSelection;
use crate::io::ingest::IngestedData;
use crate::report::{Residual, formula};

#[derive(Debug, Clone, Serialize)]
pub struct FitReport<'a> {
    pub requested: ModelFamily,
    pub family: ModelFamily,
    pub formula: &'static str,
    pub coefficients: &'a [f64],
    pub quality: &'a FitQuality,
    pub stats: &'a DatasetStats,
    pub points_ignored: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residuals: Option<&'a [Residual]>,
}

impl<'a> FitReport<'a> {
    pub fn new(
        ingest: &'a IngestedData,
        requested: ModelFamily,
        fit: &'a FitResult,
        residuals: Option<&'a [Residual]>,
    ) -> Self {
        Self {
            requested,
            family: fit.family,
            formula: formula(fit),
            coefficients: &fit.coefficients,
            quality: &fit.quality,
            stats: &ingest.stats,
            points_ignored: ingest.points_ignored,
            residuals,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedModel {
    pub family: ModelFamily,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport<'a> {
    pub best: ModelFamily,
    pub stats: &'a DatasetStats,
    pub fits: &'a [FitResult],
    pub skipped: Vec<SkippedModel>,
}

impl<'a> ComparisonReport<'a> {
    pub fn new(ingest: &'a IngestedData, selection: &'a FitSelection) -> Self {
        Self {
            best: selection.best.family,
            stats: &ingest.stats,
            fits: &selection.fits,
            skipped: selection
                .skipped
                .iter()
                .map(|(family, err)| SkippedModel {
                    family: *family,
                    reason: err.to_string(),
                })
                .collect(),
        }
    }
}

/// Pretty-print any report as JSON.
pub fn to_json<T: Serialize>(report: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| AppError::new(4, format!("Failed to serialize report: {e}")))
}
