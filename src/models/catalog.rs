//! Model catalog: one record per concrete family.
//!
//! Fitting, evaluation, and reporting all dispatch through [`lookup`] instead
//! of matching on [`ModelFamily`] in several places. A record holds:
//!
//! - the parameter count (length of the coefficient vector)
//! - the form used for least squares: a straight line after transforming the
//!   axes, or a polynomial solved through the normal equations
//! - the fit and evaluate functions

use crate::domain::{ModelFamily, Point};
use crate::error::FitError;
use crate::fit::fitter::{fit_linear, fit_logarithmic, fit_multiplicative, fit_polynomial};
use crate::models::model::{
    eval_exponential, eval_linear, eval_logarithmic, eval_polynomial, eval_power,
};

pub type FitFn = fn(&ModelDef, &[Point]) -> Result<Vec<f64>, FitError>;
pub type EvalFn = fn(&[f64], f64) -> f64;

/// Transform applied to one axis before a straight-line fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Identity,
    /// Natural log; only positive values are admissible.
    Ln,
}

impl Axis {
    /// Transform `v`, or `None` if it lies outside the transform's domain.
    pub fn apply(self, v: f64) -> Option<f64> {
        match self {
            Axis::Identity => Some(v),
            Axis::Ln if v > 0.0 => Some(v.ln()),
            Axis::Ln => None,
        }
    }

    pub fn domain_label(self) -> &'static str {
        match self {
            Axis::Identity => "any",
            Axis::Ln => "> 0",
        }
    }
}

/// How a family is reduced to linear least squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// Fit `y' = slope·x' + intercept` with `x' = x.apply(x)`, `y' = y.apply(y)`.
    Linearized { x: Axis, y: Axis },
    /// Solve the `(degree+1)²` normal equations.
    Polynomial { degree: usize },
}

/// Strategy record for one concrete family.
#[derive(Debug)]
pub struct ModelDef {
    pub family: ModelFamily,
    pub param_count: usize,
    pub form: Form,
    /// Human-readable model equation.
    pub formula: &'static str,
    pub fit: FitFn,
    pub evaluate: EvalFn,
}

impl ModelDef {
    /// Whether the model is defined at `x`.
    pub fn admits_x(&self, x: f64) -> bool {
        match self.form {
            Form::Linearized { x: axis, .. } => axis.apply(x).is_some(),
            Form::Polynomial { .. } => true,
        }
    }

    /// The point in the space the model is fitted in, or `None` if the
    /// transform is undefined there.
    pub fn transform(&self, p: &Point) -> Option<(f64, f64)> {
        match self.form {
            Form::Linearized { x, y } => Some((x.apply(p.x)?, y.apply(p.y)?)),
            Form::Polynomial { .. } => Some((p.x, p.y)),
        }
    }

    /// Number of points that survive the fitting transform.
    pub fn usable_points(&self, points: &[Point]) -> usize {
        points.iter().filter(|p| self.transform(p).is_some()).count()
    }
}

static CATALOG: [ModelDef; 6] = [
    ModelDef {
        family: ModelFamily::Linear,
        param_count: 2,
        form: Form::Linearized {
            x: Axis::Identity,
            y: Axis::Identity,
        },
        formula: "y = a*x + b",
        fit: fit_linear,
        evaluate: eval_linear,
    },
    ModelDef {
        family: ModelFamily::Quadratic,
        param_count: 3,
        form: Form::Polynomial { degree: 2 },
        formula: "y = c0 + c1*x + c2*x^2",
        fit: fit_polynomial,
        evaluate: eval_polynomial,
    },
    ModelDef {
        family: ModelFamily::Cubic,
        param_count: 4,
        form: Form::Polynomial { degree: 3 },
        formula: "y = c0 + c1*x + c2*x^2 + c3*x^3",
        fit: fit_polynomial,
        evaluate: eval_polynomial,
    },
    ModelDef {
        family: ModelFamily::Exponential,
        param_count: 2,
        form: Form::Linearized {
            x: Axis::Identity,
            y: Axis::Ln,
        },
        formula: "y = a*e^(b*x)",
        fit: fit_multiplicative,
        evaluate: eval_exponential,
    },
    ModelDef {
        family: ModelFamily::Logarithmic,
        param_count: 2,
        form: Form::Linearized {
            x: Axis::Ln,
            y: Axis::Identity,
        },
        formula: "y = a + b*ln(x)",
        fit: fit_logarithmic,
        evaluate: eval_logarithmic,
    },
    ModelDef {
        family: ModelFamily::Power,
        param_count: 2,
        form: Form::Linearized {
            x: Axis::Ln,
            y: Axis::Ln,
        },
        formula: "y = a*x^b",
        fit: fit_multiplicative,
        evaluate: eval_power,
    },
];

/// Find the record for a concrete family.
///
/// `Best` has no record: it must be resolved by model selection first.
pub fn lookup(family: ModelFamily) -> Result<&'static ModelDef, FitError> {
    CATALOG.iter().find(|def| def.family == family).ok_or_else(|| {
        FitError::InvalidFamily(format!(
            "{family} is not a concrete model; resolve it with best-fit selection first"
        ))
    })
}

/// All records, in selection order.
pub fn all() -> &'static [ModelDef] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_concrete_family_in_order() {
        let families: Vec<ModelFamily> = all().iter().map(|d| d.family).collect();
        assert_eq!(families, ModelFamily::CONCRETE.to_vec());
    }

    #[test]
    fn parameter_counts() {
        let count = |f| lookup(f).unwrap().param_count;
        assert_eq!(count(ModelFamily::Linear), 2);
        assert_eq!(count(ModelFamily::Quadratic), 3);
        assert_eq!(count(ModelFamily::Cubic), 4);
        assert_eq!(count(ModelFamily::Exponential), 2);
        assert_eq!(count(ModelFamily::Logarithmic), 2);
        assert_eq!(count(ModelFamily::Power), 2);
    }

    #[test]
    fn polynomial_degree_matches_parameter_count() {
        for def in all() {
            if let Form::Polynomial { degree } = def.form {
                assert_eq!(degree + 1, def.param_count);
            }
        }
    }

    #[test]
    fn best_has_no_record() {
        assert!(matches!(
            lookup(ModelFamily::Best),
            Err(FitError::InvalidFamily(_))
        ));
    }

    #[test]
    fn domains_follow_axis_transforms() {
        let log = lookup(ModelFamily::Logarithmic).unwrap();
        assert!(log.admits_x(1.0));
        assert!(!log.admits_x(0.0));

        let exp = lookup(ModelFamily::Exponential).unwrap();
        assert!(exp.admits_x(-3.0));

        let points = [
            Point::new(-1.0, 2.0),
            Point::new(1.0, -2.0),
            Point::new(2.0, 3.0),
        ];
        assert_eq!(lookup(ModelFamily::Power).unwrap().usable_points(&points), 1);
        assert_eq!(lookup(ModelFamily::Exponential).unwrap().usable_points(&points), 2);
        assert_eq!(lookup(ModelFamily::Logarithmic).unwrap().usable_points(&points), 2);
        assert_eq!(lookup(ModelFamily::Cubic).unwrap().usable_points(&points), 3);
    }
}
