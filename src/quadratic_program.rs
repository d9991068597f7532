#![allow(non_snake_case)]
//! Definition of a quadratic program.
//!
//! To get started, see the documentation of [`Problem`] on how to build a [`Problem`] through the builder pattern.
use crate::{error::QuadProgError, float::Float};
use ndarray::prelude::*;

/// A convex quadratic program with linear equality and inequality constraints.
///
/// Variables throughout this crate use the following naming convention:
/// ```text
/// min_x 0.5 x' H x + g0' x
/// st    CE x + ce0 == 0
///       CI x + ci0 >= 0
/// ```
/// with `H` the symmetric positive definite Hessian, `g0` the gradient of the linear term,
/// and each row of `CE`/`CI` the normal of one constraint.
///
/// To construct a problem, use [`ProblemBuilder::new`] or [`Problem::target`].
pub struct Problem<F> {
    H: Array2<F>,
    g0: Array1<F>,
    CE: Array2<F>,
    ce0: Array1<F>,
    CI: Array2<F>,
    ci0: Array1<F>,
    J0: Option<Array2<F>>,
}

impl<F: Float> Problem<F> {
    /// Build a quadratic program using the builder pattern.
    ///
    /// Specify the Hessian `H` and gradient `g0` for which we will minimize `0.5 x'Hx + g0'x`.
    /// Returns a [`ProblemBuilder`] object that can be further configured with equality and
    /// inequality constraints.
    pub fn target<'a>(H: &'a Array2<F>, g0: &'a Array1<F>) -> ProblemBuilder<'a, F> {
        ProblemBuilder::new(H, g0)
    }

    /// Return the Hessian
    pub fn H(&self) -> &Array2<F> {
        &self.H
    }

    /// Return the gradient of the linear term
    pub fn g0(&self) -> &Array1<F> {
        &self.g0
    }

    /// Return the equality constraint matrix
    pub fn CE(&self) -> &Array2<F> {
        &self.CE
    }

    /// Return the equality constraint vector
    pub fn ce0(&self) -> &Array1<F> {
        &self.ce0
    }

    /// Return the inequality constraint matrix
    pub fn CI(&self) -> &Array2<F> {
        &self.CI
    }

    /// Return the inequality constraint vector
    pub fn ci0(&self) -> &Array1<F> {
        &self.ci0
    }

    /// Return the caller-supplied inverse Cholesky factor, if one was given
    pub(crate) fn J0(&self) -> Option<&Array2<F>> {
        self.J0.as_ref()
    }

    /// The number of variables
    pub fn n_vars(&self) -> usize {
        self.g0.len()
    }

    /// The number of equality constraints
    pub fn n_eq(&self) -> usize {
        self.ce0.len()
    }

    /// The number of inequality constraints
    pub fn n_ineq(&self) -> usize {
        self.ci0.len()
    }
}

/// Construct a quadratic program from a quadratic target and linear constraints.
pub struct ProblemBuilder<'a, F> {
    H: &'a Array2<F>,
    g0: &'a Array1<F>,
    eq: Option<(&'a Array2<F>, &'a Array1<F>)>,
    ineq: Option<(&'a Array2<F>, &'a Array1<F>)>,
    J0: Option<&'a Array2<F>>,
}

impl<'a, F: Float> ProblemBuilder<'a, F> {
    /// Start building a problem. Takes the Hessian `H` and gradient `g0` for which the goal is
    /// to minimize `0.5 x'Hx + g0'x`.
    pub fn new(H: &'a Array2<F>, g0: &'a Array1<F>) -> ProblemBuilder<'a, F> {
        ProblemBuilder {
            H,
            g0,
            eq: None,
            ineq: None,
            J0: None,
        }
    }

    /// Set the equality constraints of the problem, such that `CE x + ce0 == 0`.
    /// Each row of `CE` is one constraint. The rows must be linearly independent, or the solver
    /// reports the equalities as redundant.
    pub fn eq(mut self, CE: &'a Array2<F>, ce0: &'a Array1<F>) -> Self {
        self.eq = Some((CE, ce0));
        self
    }

    /// Set the inequality constraints of the problem, such that `CI x + ci0 >= 0`.
    /// Each row of `CI` is one constraint. To prevent numerical problems, it is advisable to
    /// scale all constraints to roughly the same order of magnitude.
    pub fn ineq(mut self, CI: &'a Array2<F>, ci0: &'a Array1<F>) -> Self {
        self.ineq = Some((CI, ci0));
        self
    }

    /// Supply a precomputed inverse Cholesky factor `J0 = L^-T` where `H = L L'`.
    ///
    /// When given, the solver skips its own factorization of `H` and starts from `J0` directly.
    /// This is useful when many problems share one Hessian: factor it once, reuse the factor.
    pub fn inverse_factor(mut self, J0: &'a Array2<F>) -> Self {
        self.J0 = Some(J0);
        self
    }

    /// Construct a quadratic program from the provided inputs, validating the input values.
    ///
    /// Returns an error if any of the dimensions do not conform to the definition above.
    pub fn build(self) -> Result<Problem<F>, QuadProgError<F>> {
        let n = self.g0.len();
        let CE_empty = Array2::zeros((0, n));
        let ce0_empty = Array1::zeros(0);
        let CI_empty = Array2::zeros((0, n));
        let ci0_empty = Array1::zeros(0);
        let (CE, ce0) = self.eq.unwrap_or((&CE_empty, &ce0_empty));
        let (CI, ci0) = self.ineq.unwrap_or((&CI_empty, &ci0_empty));

        if self.H.dim() != (n, n)
            || CE.nrows() != ce0.len()
            || (CE.nrows() > 0 && CE.ncols() != n)
            || CI.nrows() != ci0.len()
            || (CI.nrows() > 0 && CI.ncols() != n)
        {
            return Err(QuadProgError::IncompatibleInputDimensions);
        }
        if let Some(J0) = self.J0 {
            if J0.dim() != (n, n) {
                return Err(QuadProgError::IncompatibleInputDimensions);
            }
        }

        Ok(Problem {
            H: self.H.to_owned(),
            g0: self.g0.to_owned(),
            CE: CE.to_owned(),
            ce0: ce0.to_owned(),
            CI: CI.to_owned(),
            ci0: ci0.to_owned(),
            J0: self.J0.map(|J0| J0.to_owned()),
        })
    }
}
