//! A pure-Rust dual active-set solver for dense convex quadratic programs with equality and
//! inequality constraints.
//!
//! # Quadratic programs
//!
//! A quadratic program is a mathematical optimization problem defined as:
//!
//! ```text
//!    min_x 0.5 x'Hx + g0'x
//!    st CE x + ce0 == 0
//!       CI x + ci0 >= 0
//! ```
//!
//! with `H` symmetric positive definite. Problems of this shape appear wherever a quadratic
//! cost meets linear limits: model predictive control, contact force distribution, portfolio
//! selection. The solver implements the dual active-set method of Goldfarb and Idnani, which
//! needs no feasible starting point and terminates after finitely many working-set changes,
//! making it a good fit for many small-to-medium problems solved in sequence.
//!
//! # Example
//! ```
//! use approx::assert_abs_diff_eq;
//! use ndarray::array;
//!
//! use qp::Problem;
//! use qp::solvers::{DualActiveSet, Solver};
//!
//! let H = array![[4f64, -2.], [-2., 4.]];
//! let g0 = array![6., 0.];
//! let CE = array![[1., 1.]];
//! let ce0 = array![-3.];
//! let CI = array![[1., 0.], [0., 1.], [1., 1.]];
//! let ci0 = array![0., 0., -2.];
//!
//! let problem = Problem::target(&H, &g0)
//!     // If you define neither equality nor inequality constraints,
//!     // the solver returns the unconstrained minimizer.
//!     .eq(&CE, &ce0)
//!     .ineq(&CI, &ci0)
//!     .build()
//!     .unwrap();
//!
//!     // These are the default values you can overwrite.
//!     // You may omit any option for which the default is good enough for you
//! let mut solver = DualActiveSet::custom()
//!     .max_iter(1000)
//!     .disp(false)
//!     .warm_start(false)
//!     .build()
//!     .unwrap();
//!
//! let res = solver.solve(&problem).unwrap();
//!
//! assert_abs_diff_eq!(*res.x(), array![1., 2.], epsilon = 1e-9);
//! assert_abs_diff_eq!(*res.fun(), 12., epsilon = 1e-9);
//! ```
//!
//! # Feature flags
//!
//! ### `[blas]`
//! This package comes with the option to factorize the Hessian through a BLAS/LAPACK-backed
//! Cholesky decomposition. To enable BLAS, set the `blas` feature.

pub mod error;
pub(crate) mod float;
pub mod prelude;
pub mod quadratic_program;
pub mod solvers;

pub use quadratic_program::{Problem, ProblemBuilder};
pub use solvers::{ActiveConstraint, OptimizeResult};

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use crate::solvers::{DualActiveSet, Solver};
    use crate::Problem;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn make_problem() -> Problem<f64> {
        let H = array![[4f64, -2.], [-2., 4.]];
        let g0 = array![6., 0.];
        let CE = array![[1., 1.]];
        let ce0 = array![-3.];
        let CI = array![[1., 0.], [0., 1.], [1., 1.]];
        let ci0 = array![0., 0., -2.];
        let problem = Problem::target(&H, &g0)
            .eq(&CE, &ce0)
            .ineq(&CI, &ci0)
            .build()
            .unwrap();
        problem
    }

    #[test]
    fn test_problem_interface() {
        let problem = make_problem();
        problem.H();
        problem.g0();
        problem.CE();
        problem.ce0();
        problem.CI();
        problem.ci0();
        assert_eq!(problem.n_vars(), 2);
        assert_eq!(problem.n_eq(), 1);
        assert_eq!(problem.n_ineq(), 3);
    }

    #[test]
    fn test_dual_active_set_interface() {
        let problem = make_problem();
        let mut solver = DualActiveSet::custom().build().unwrap();
        let res = solver.solve(&problem).unwrap();

        assert_abs_diff_eq!(*res.x(), array![1., 2.], epsilon = 1e-9);
        assert_abs_diff_eq!(*res.fun(), 12., epsilon = 1e-9);
        assert!(res.iteration() >= 1);
        assert_eq!(res.active_set().len(), res.multipliers().len());
    }
}
