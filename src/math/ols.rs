//! Closed-form simple linear regression.
//!
//! Every two-parameter family is fitted as a straight line in some transformed
//! space, so we only ever need:
//!
//! ```text
//! minimize Σ (v_i - (slope·u_i + intercept))^2
//! ```
//!
//! which has the textbook solution from four running sums:
//!
//! ```text
//! d         = n·Σu² - (Σu)²
//! slope     = (n·Σuv - Σu·Σv) / d
//! intercept = (Σv·Σu² - Σu·Σuv) / d
//! ```

use crate::error::FitError;
use crate::math::gauss::PIVOT_EPS;

/// Running sums for a simple linear regression.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinearSums {
    pub n: usize,
    pub sum_u: f64,
    pub sum_v: f64,
    pub sum_uv: f64,
    pub sum_uu: f64,
}

/// A fitted straight line `v = slope·u + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearSums {
    /// Accumulate one observation.
    pub fn push(&mut self, u: f64, v: f64) {
        self.n += 1;
        self.sum_u += u;
        self.sum_v += v;
        self.sum_uv += u * v;
        self.sum_uu += u * u;
    }

    /// Solve the 2x2 normal equations.
    ///
    /// Fails with `SingularSystem` when all `u` values coincide (including the
    /// `n <= 1` case), using the same relative tolerance as the Gaussian solver.
    pub fn solve(&self) -> Result<Line, FitError> {
        let n = self.n as f64;
        let scale = n * self.sum_uu;
        let denominator = scale - self.sum_u * self.sum_u;

        if !(denominator.is_finite() && denominator.abs() > PIVOT_EPS * scale.abs()) {
            return Err(FitError::SingularSystem { dim: 2 });
        }

        let slope = (n * self.sum_uv - self.sum_u * self.sum_v) / denominator;
        let intercept = (self.sum_v * self.sum_uu - self.sum_u * self.sum_uv) / denominator;
        if !(slope.is_finite() && intercept.is_finite()) {
            return Err(FitError::SingularSystem { dim: 2 });
        }

        Ok(Line { slope, intercept })
    }
}

impl FromIterator<(f64, f64)> for LinearSums {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut sums = LinearSums::default();
        for (u, v) in iter {
            sums.push(u, v);
        }
        sums
    }
}
