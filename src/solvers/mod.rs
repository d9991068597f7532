//! Solvers for quadratic programs.
pub mod dual_active_set;

pub use dual_active_set::DualActiveSet;
use ndarray::Array1;

use std::fmt::Debug;

use crate::{error::QuadProgError, quadratic_program::Problem};

/// Solver trait that any solver should implement to make experimentation with different solvers
/// more easy.
///
/// The receiver is mutable: a solver owns a workspace of factorization buffers that is reused
/// across calls with the same problem dimensions, and a warm-started solver additionally reads
/// the active set its previous call left behind. The exclusive borrow also guarantees that no two
/// solves run concurrently against the same instance; use one instance per thread.
pub trait Solver<F: Debug> {
    /// Solve a quadratic programming problem. Returns a [`QuadProgError`] error if the solver
    /// runs into problems. The possible error values depend on the specific solver.
    fn solve(&mut self, problem: &Problem<F>) -> Result<OptimizeResult<F>, QuadProgError<F>>;
}

/// One constraint of the final active set, i.e. a constraint satisfied with equality at the
/// solution. Equality and inequality constraints are reported separately so callers can map each
/// entry back to the row of `CE` or `CI` it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveConstraint {
    /// The index of a row of `CE`. Equality constraints are always active.
    Equality(usize),
    /// The index of a row of `CI` that holds with equality at the solution.
    Inequality(usize),
}

/// Outcome of a successful solve attempt.
pub struct OptimizeResult<F> {
    /// The solution vector
    x: Array1<F>,

    /// The cost function value
    fun: F,

    /// The number of iterations needed to find the solution
    iteration: usize,

    /// The constraints active at the solution, in the order they entered the working set
    active_set: Vec<ActiveConstraint>,

    /// The Lagrange multiplier of each active constraint, aligned with `active_set`
    multipliers: Array1<F>,
}

impl<F> OptimizeResult<F> {
    pub(crate) fn new(
        x: Array1<F>,
        fun: F,
        iteration: usize,
        active_set: Vec<ActiveConstraint>,
        multipliers: Array1<F>,
    ) -> Self {
        Self {
            x,
            fun,
            iteration,
            active_set,
            multipliers,
        }
    }

    /// The number of iterations needed to find the solution
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// The cost function value
    pub fn fun(&self) -> &F {
        &self.fun
    }

    /// The solution vector
    pub fn x(&self) -> &Array1<F> {
        &self.x
    }

    /// The constraints active at the solution
    pub fn active_set(&self) -> &[ActiveConstraint] {
        &self.active_set
    }

    /// The Lagrange multiplier of each active constraint, aligned with [`active_set`](Self::active_set).
    /// Multipliers of active inequality constraints are nonnegative.
    pub fn multipliers(&self) -> &Array1<F> {
        &self.multipliers
    }
}
