//! `trendfit` library crate.
//!
//! The binary (`trendfit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the fitting core (`math`, `models`, `fit`, `metrics`) can be used without
//!   the CLI, file loading, or reporting layers

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod metrics;
pub mod models;
pub mod plot;
pub mod report;
