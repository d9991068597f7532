#![allow(non_snake_case)]
//! Factorization state of the dual active-set method.
//!
//! All buffers live for the lifetime of the solver and are re-provisioned only when the problem
//! dimensions change, so a shape-stable sequence of solves performs no per-call allocation.
use ndarray::linalg::general_mat_vec_mul;
use ndarray::prelude::*;

#[cfg(not(feature = "blas"))]
use linfa_linalg::cholesky::Cholesky;
#[cfg(feature = "blas")]
use ndarray_linalg::{Cholesky, UPLO};

use crate::error::QuadProgError;
use crate::float::Float;
use crate::quadratic_program::Problem;

/// The mutable state of one solver instance.
///
/// `J` satisfies `J J' = H^-1` and `R` holds the triangular factor of the active constraint
/// normals expressed in the `J` basis; both are updated incrementally as constraints enter and
/// leave the working set. The remaining vectors are the scratch space of one iteration:
/// `np` the candidate constraint normal, `d = J' np`, `z` the primal step direction, `r` the
/// dual step direction, `s` the inequality slacks and `u` the multipliers of the working set.
///
/// `A` lists the working set in insertion order: equality constraint `i` is stored as `-i - 1`,
/// inequality constraint `i` as `i`. Only the first `iq` entries are meaningful. `A`, `u` and
/// their checkpoints carry one spare trailing slot because the candidate constraint is staged at
/// position `iq` before it is counted, and `iq` may already equal the total constraint count.
pub(crate) struct Workspace<F> {
    n_vars: usize,
    n_eq: usize,
    n_ineq: usize,

    pub(crate) J: Array2<F>,
    pub(crate) R: Array2<F>,
    pub(crate) d: Array1<F>,
    pub(crate) z: Array1<F>,
    pub(crate) r: Array1<F>,
    pub(crate) s: Array1<F>,
    pub(crate) u: Array1<F>,
    pub(crate) np: Array1<F>,

    pub(crate) A: Array1<i64>,
    /// Per-inequality status: the constraint's own index while it is inactive, `-1` while active.
    pub(crate) iai: Array1<i64>,
    /// Eligibility flags; cleared for a constraint whose insertion turned out degenerate.
    pub(crate) iaexcl: Array1<bool>,

    x_old: Array1<F>,
    u_old: Array1<F>,
    A_old: Array1<i64>,

    /// Current size of the working set.
    pub(crate) iq: usize,
    /// Running norm of `R`, the scale for the linear-dependence test.
    pub(crate) R_norm: F,
    /// Size of the working set the previous solve terminated with; consumed by warm starts.
    pub(crate) q: usize,
}

impl<F: Float> Workspace<F> {
    pub(crate) fn new() -> Self {
        Workspace {
            n_vars: 0,
            n_eq: 0,
            n_ineq: 0,
            J: Array2::zeros((0, 0)),
            R: Array2::zeros((0, 0)),
            d: Array1::zeros(0),
            z: Array1::zeros(0),
            r: Array1::zeros(0),
            s: Array1::zeros(0),
            u: Array1::zeros(0),
            np: Array1::zeros(0),
            A: Array1::zeros(0),
            iai: Array1::zeros(0),
            iaexcl: Array1::from_elem(0, true),
            x_old: Array1::zeros(0),
            u_old: Array1::zeros(0),
            A_old: Array1::zeros(0),
            iq: 0,
            R_norm: F::one(),
            q: 0,
        }
    }

    pub(crate) fn shape_matches(&self, n_vars: usize, n_eq: usize, n_ineq: usize) -> bool {
        self.n_vars == n_vars && self.n_eq == n_eq && self.n_ineq == n_ineq
    }

    pub(crate) fn n_eq(&self) -> usize {
        self.n_eq
    }

    /// Re-provision every buffer for a new dimension triple. Also forgets the recorded active
    /// set, so a warm start never replays indices from a differently-shaped problem.
    pub(crate) fn reset(&mut self, n_vars: usize, n_eq: usize, n_ineq: usize) {
        let m = n_eq + n_ineq;
        self.n_vars = n_vars;
        self.n_eq = n_eq;
        self.n_ineq = n_ineq;
        self.J = Array2::zeros((n_vars, n_vars));
        self.R = Array2::zeros((n_vars, n_vars));
        self.d = Array1::zeros(n_vars);
        self.z = Array1::zeros(n_vars);
        self.np = Array1::zeros(n_vars);
        self.s = Array1::zeros(n_ineq);
        self.r = Array1::zeros(m + 1);
        self.u = Array1::zeros(m + 1);
        self.A = Array1::zeros(m + 1);
        self.iai = Array1::zeros(n_ineq);
        self.iaexcl = Array1::from_elem(n_ineq, true);
        self.x_old = Array1::zeros(n_vars);
        self.u_old = Array1::zeros(m + 1);
        self.A_old = Array1::zeros(m + 1);
        self.iq = 0;
        self.R_norm = F::one();
        self.q = 0;
    }

    /// Prepare `J` and reset the triangular factor for a fresh solve.
    ///
    /// Unless the problem carries a precomputed inverse factor, `H` is decomposed as `L L'` and
    /// `J` is set to `L^-T` by back-substitution against `L'`, one column at a time.
    pub(crate) fn factorize(&mut self, problem: &Problem<F>) -> Result<(), QuadProgError<F>> {
        if let Some(J0) = problem.J0() {
            self.J.assign(J0);
        } else {
            #[cfg(not(feature = "blas"))]
            let L = problem
                .H()
                .cholesky()
                .map_err(|_| QuadProgError::NumericalProblem)?;
            #[cfg(feature = "blas")]
            let L = problem
                .H()
                .cholesky(UPLO::Lower)
                .map_err(|_| QuadProgError::NumericalProblem)?;
            self.invert_transposed_factor(&L);
        }
        self.R.fill(F::zero());
        self.d.fill(F::zero());
        self.R_norm = F::one();
        self.iq = 0;
        Ok(())
    }

    /// `J = (L')^-1` for a lower-triangular `L`. The inverse of an upper-triangular matrix is
    /// upper triangular, so column `k` is found by back-substitution over rows `k..0`.
    fn invert_transposed_factor(&mut self, L: &Array2<F>) {
        let n = self.n_vars;
        self.J.fill(F::zero());
        for k in 0..n {
            self.J[[k, k]] = F::one() / L[[k, k]];
            for i in (0..k).rev() {
                let mut sum = F::zero();
                for j in i + 1..=k {
                    sum = sum + L[[j, i]] * self.J[[j, k]];
                }
                self.J[[i, k]] = -sum / L[[i, i]];
            }
        }
    }

    /// The unconstrained minimizer `x = -H^-1 g0 = -J (J' g0)`, written into `x`.
    pub(crate) fn unconstrained_minimizer(&mut self, g0: &Array1<F>, x: &mut Array1<F>) {
        general_mat_vec_mul(F::one(), &self.J.t(), g0, F::zero(), &mut self.d);
        general_mat_vec_mul(-F::one(), &self.J, &self.d, F::zero(), x);
    }

    /// `d = J' np`: the candidate normal expressed in the `J` basis.
    pub(crate) fn compute_d(&mut self) {
        general_mat_vec_mul(F::one(), &self.J.t(), &self.np, F::zero(), &mut self.d);
    }

    /// `z = J_2 d_2`: the primal step direction, built from the columns of `J` beyond the
    /// working set.
    pub(crate) fn update_z(&mut self) {
        general_mat_vec_mul(
            F::one(),
            &self.J.slice(s![.., self.iq..]),
            &self.d.slice(s![self.iq..]),
            F::zero(),
            &mut self.z,
        );
    }

    /// `r = R^-1 d_1`: the negative of the dual step direction, by back-substitution against the
    /// leading `iq` columns of `R`.
    pub(crate) fn update_r(&mut self) {
        for i in (0..self.iq).rev() {
            let mut sum = self.d[i];
            for j in i + 1..self.iq {
                sum = sum - self.R[[i, j]] * self.r[j];
            }
            self.r[i] = sum / self.R[[i, i]];
        }
    }

    /// Record the multipliers, working set and iterate before a tentative insertion.
    /// The checkpoint buffers never alias the live ones.
    pub(crate) fn save_checkpoint(&mut self, x: &Array1<F>) {
        for i in 0..self.iq {
            self.u_old[i] = self.u[i];
            self.A_old[i] = self.A[i];
        }
        self.x_old.assign(x);
    }

    /// Undo a tentative step: restore multipliers, working set and iterate, then rebuild the
    /// inactive-set bookkeeping from the restored working set. Equality entries of `A` carry
    /// negative codes and have no `iai` slot, so only inequality entries are re-marked.
    pub(crate) fn restore_checkpoint(&mut self, x: &mut Array1<F>) {
        for i in 0..self.n_ineq {
            self.iai[i] = i as i64;
        }
        for i in 0..self.iq {
            self.A[i] = self.A_old[i];
            self.u[i] = self.u_old[i];
            if i >= self.n_eq {
                self.iai[self.A[i] as usize] = -1;
            }
        }
        x.assign(&self.x_old);
    }
}
