//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed by value/reference into the fitting core
//! - printed as JSON reports
//! - produced by the sample generator and the file loader

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// A single `(x, y)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Candidate model families.
///
/// `Best` is a meta-family: it is never fitted directly and resolves to one of
/// the six concrete families through model selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    /// `y = a·x + b`
    Linear,
    /// `y = c0 + c1·x + c2·x²`
    #[value(alias = "poly2")]
    Quadratic,
    /// `y = c0 + c1·x + c2·x² + c3·x³`
    #[value(alias = "poly3")]
    Cubic,
    /// `y = a·e^(b·x)`
    #[value(alias = "exp")]
    Exponential,
    /// `y = a + b·ln(x)`
    #[value(alias = "log")]
    Logarithmic,
    /// `y = a·x^b`
    Power,
    /// Lowest residual sum of squares among the concrete families.
    Best,
}

impl ModelFamily {
    /// Concrete families in selection order (ties keep the earlier one).
    pub const CONCRETE: [ModelFamily; 6] = [
        ModelFamily::Linear,
        ModelFamily::Quadratic,
        ModelFamily::Cubic,
        ModelFamily::Exponential,
        ModelFamily::Logarithmic,
        ModelFamily::Power,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelFamily::Linear => "Linear",
            ModelFamily::Quadratic => "Quadratic",
            ModelFamily::Cubic => "Cubic",
            ModelFamily::Exponential => "Exponential",
            ModelFamily::Logarithmic => "Logarithmic",
            ModelFamily::Power => "Power",
            ModelFamily::Best => "Best",
        }
    }

    pub fn is_concrete(self) -> bool {
        self != ModelFamily::Best
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ModelFamily {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "linear" => Ok(ModelFamily::Linear),
            "quadratic" | "poly2" => Ok(ModelFamily::Quadratic),
            "cubic" | "poly3" => Ok(ModelFamily::Cubic),
            "exponential" | "exp" => Ok(ModelFamily::Exponential),
            "logarithmic" | "log" => Ok(ModelFamily::Logarithmic),
            "power" => Ok(ModelFamily::Power),
            "best" => Ok(ModelFamily::Best),
            _ => Err(FitError::InvalidFamily(s.trim().to_string())),
        }
    }
}

/// Goodness-of-fit diagnostics for one fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    /// Residual sum of squares over every input point.
    pub rss: f64,
    pub rmse: f64,
    pub r_squared: f64,
    /// Pearson correlation of the raw points; only reported for `Linear`.
    pub pearson: Option<f64>,
    pub n: usize,
}

/// Fit output for a single concrete family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub family: ModelFamily,
    pub coefficients: Vec<f64>,
    pub quality: FitQuality,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Bounds on how many points the loader accepts.
///
/// This is an input policy, not a core invariant: the fitter only needs as many
/// points as the model has parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointLimits {
    pub min: usize,
    pub max: usize,
}

impl Default for PointLimits {
    fn default() -> Self {
        Self { min: 8, max: 12 }
    }
}

/// Summary stats about the points actually used for fitting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub input: PathBuf,
    pub family: ModelFamily,
    pub limits: PointLimits,
    pub format: OutputFormat,

    pub show_residuals: bool,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}
