//! Command-line parsing for the trend fitter.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fitting code. `app` turns these structs into plain config values.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ModelFamily, OutputFormat};
use crate::logging::LogLevel;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "trendfit",
    version,
    about = "Least-squares trend fitting for small 2-D point sets"
)]
pub struct Cli {
    /// Log verbosity (overrides TRENDFIT_LOG).
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit one model family (or the best one) and print coefficients and diagnostics.
    Fit(FitArgs),
    /// Fit every model family and compare their residuals.
    Compare(CompareArgs),
    /// Generate a synthetic point file from a known model.
    Sample(SampleArgs),
}

/// Where points come from and how many are accepted.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Point file: `*.csv` with `x,y` headers, or whitespace-separated `x y` pairs.
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: PathBuf,

    /// Minimum number of points required.
    #[arg(long, default_value_t = 8)]
    pub min_points: usize,

    /// Maximum number of points used; later points are ignored.
    #[arg(long, default_value_t = 12)]
    pub max_points: usize,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Options for `trendfit fit`.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Model family to fit (linear, quadratic, cubic, exponential, logarithmic, power, best).
    #[arg(short = 'm', long, value_enum, default_value_t = ModelFamily::Best)]
    pub model: ModelFamily,

    /// Print the per-point residual table.
    #[arg(long)]
    pub residuals: bool,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for `trendfit compare`.
#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Options for `trendfit sample`.
#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Model family to sample from.
    #[arg(short = 'm', long, value_enum)]
    pub model: ModelFamily,

    /// Coefficients in the family's order, comma-separated (e.g. `2,0.5`).
    #[arg(
        short = 'c',
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        required = true
    )]
    pub coefficients: Vec<f64>,

    /// Number of points.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Smallest x value.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub x_min: f64,

    /// Largest x value.
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub x_max: f64,

    /// Standard deviation of Gaussian noise added to y.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed for the noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write to this file instead of stdout.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
