//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - sample points (`Point`) and model families (`ModelFamily`)
//! - fit outputs (`FitResult`, `FitQuality`)
//! - run configuration (`FitConfig`, `PointLimits`, `OutputFormat`)

pub mod types;

pub use types::*;
