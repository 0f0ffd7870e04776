//! Mathematical utilities: dense linear solver and closed-form line regression.

pub mod gauss;
pub mod ols;

pub use gauss::*;
pub use ols::*;
