//! Dense linear solver: Gaussian elimination with partial pivoting.
//!
//! The polynomial fits produce tiny square systems (at most 4x4), so a direct
//! elimination is both the simplest and the fastest option.
//!
//! Numerical notes:
//! - Pivot selection picks the row with the largest `|A[j][i]|` at or below the
//!   diagonal; ties keep the first such row so results are deterministic.
//! - A pivot is treated as zero when `|pivot| <= PIVOT_EPS * max|A|`, measured
//!   against the largest entry of the *input* matrix. Normal-equation matrices
//!   hold power sums whose magnitude depends on the x scale, so an absolute
//!   threshold would be meaningless.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::FitError;

/// Relative threshold below which a pivot is considered zero.
pub const PIVOT_EPS: f64 = 1e-12;

/// Solve `A·x = b` without modifying the inputs.
pub fn solve_linear_system(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>, FitError> {
    let mut a = a.clone();
    let mut b = b.clone();
    solve_in_place(&mut a, &mut b)
}

/// Solve `A·x = b`, reducing `a` to upper-triangular form and permuting `b`.
///
/// On return (success or failure) both `a` and `b` hold intermediate
/// elimination state; pass copies if the originals are still needed.
pub fn solve_in_place(a: &mut DMatrix<f64>, b: &mut DVector<f64>) -> Result<DVector<f64>, FitError> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(FitError::DimensionMismatch(format!(
            "coefficient matrix must be square, got {}x{}",
            n,
            a.ncols()
        )));
    }
    if b.len() != n {
        return Err(FitError::DimensionMismatch(format!(
            "right-hand side has length {}, expected {n}",
            b.len()
        )));
    }
    if n == 0 {
        return Ok(DVector::zeros(0));
    }

    let scale = a.amax();
    if !(scale.is_finite() && scale > 0.0) {
        return Err(FitError::SingularSystem { dim: n });
    }
    let tol = PIVOT_EPS * scale;

    // Forward elimination.
    for i in 0..n {
        let mut max_row = i;
        let mut max_val = a[(i, i)].abs();
        for j in (i + 1)..n {
            let v = a[(j, i)].abs();
            if v > max_val {
                max_val = v;
                max_row = j;
            }
        }

        if !(max_val > tol) {
            debug!("Pivot {i} is {max_val:e} (tolerance {tol:e}); system is singular.");
            return Err(FitError::SingularSystem { dim: n });
        }

        if max_row != i {
            a.swap_rows(i, max_row);
            b.swap_rows(i, max_row);
        }

        for j in (i + 1)..n {
            let factor = a[(j, i)] / a[(i, i)];
            b[j] -= factor * b[i];
            for k in i..n {
                a[(j, k)] -= factor * a[(i, k)];
            }
        }
    }

    // Back substitution.
    let mut x = DVector::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += a[(i, j)] * x[j];
        }
        x[i] = (b[i] - sum) / a[(i, i)];
    }

    if x.iter().all(|v| v.is_finite()) {
        Ok(x)
    } else {
        Err(FitError::SingularSystem { dim: n })
    }
}
