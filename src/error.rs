//! Error types.
//!
//! Two layers:
//!
//! - [`FitError`]: typed, recoverable failures from the regression core
//!   (solver, fitter, selector, evaluator).
//! - [`AppError`]: what the binary reports; carries the process exit code.
//!
//! Exit codes:
//! - `2`: invalid input or configuration (bad file, unknown model family)
//! - `3`: not enough data to fit
//! - `4`: the fit itself failed (singular system, domain error, no viable model)

use crate::domain::ModelFamily;

/// Failures raised by the fitting core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Unknown family name, or a meta-family used where a concrete one is required.
    #[error("Invalid model family: {0}")]
    InvalidFamily(String),

    /// Empty point set, or fewer usable points than the model has parameters.
    #[error("Not enough data to fit {family}: need at least {needed} point(s), got {got}")]
    InsufficientData {
        family: ModelFamily,
        needed: usize,
        got: usize,
    },

    /// The normal equations have no unique solution.
    ///
    /// Usually the points share the same x value (or too few distinct x values
    /// for the requested degree).
    #[error("Linear system ({dim}x{dim}) is singular; x values may be identical or too few distinct")]
    SingularSystem { dim: usize },

    /// The model is undefined for the given input.
    #[error("{family} model is undefined here: {reason}")]
    DomainEvaluation {
        family: ModelFamily,
        reason: String,
    },

    /// A coefficient vector does not match the family's parameter count.
    #[error("{family} model takes {expected} coefficient(s), got {got}")]
    CoefficientCount {
        family: ModelFamily,
        expected: usize,
        got: usize,
    },

    /// Solver inputs have incompatible shapes.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Best-fit selection could not fit any concrete family.
    #[error("None of the candidate models could be fitted to these points")]
    NoViableModel,
}

impl FitError {
    /// Exit code used when this error reaches the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            FitError::InvalidFamily(_) | FitError::CoefficientCount { .. } => 2,
            FitError::InsufficientData { .. } => 3,
            FitError::SingularSystem { .. }
            | FitError::DomainEvaluation { .. }
            | FitError::DimensionMismatch(_)
            | FitError::NoViableModel => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_errors_map_to_exit_codes() {
        let err: AppError = FitError::InvalidFamily("spline".to_string()).into();
        assert_eq!(err.exit_code(), 2);

        let err: AppError = FitError::InsufficientData {
            family: ModelFamily::Cubic,
            needed: 4,
            got: 2,
        }
        .into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("need at least 4"));

        let err: AppError = FitError::SingularSystem { dim: 3 }.into();
        assert_eq!(err.exit_code(), 4);
    }
}
