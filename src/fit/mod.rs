//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - least-squares fit of a single family (`fitter`)
//! - fit every family and keep the smallest residual sum of squares (`selection`)

pub mod fitter;
pub mod selection;

pub use fitter::*;
pub use selection::*;
