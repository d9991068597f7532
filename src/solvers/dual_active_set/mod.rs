#![allow(non_snake_case)]
//! Implementation of the Goldfarb–Idnani dual active-set method \[1\] for strictly convex
//! quadratic programs, in the numerically stable formulation popularized by the QuadProg++
//! solver family.
//!
//! The method starts from the unconstrained minimizer (a dual-feasible point), forces every
//! equality constraint into the working set, and then repeatedly picks the most violated
//! inequality and steps toward its boundary. Each step is taken in primal and dual space
//! together when possible (the candidate constraint becomes active), or in dual space alone when
//! a currently-active constraint blocks the move (that constraint is dropped). The working-set
//! factorization is never rebuilt: constraints enter and leave through rank-one Givens updates.
//!
//! \[1\] D. Goldfarb and A. Idnani. "A numerically stable dual method for solving strictly
//!      convex quadratic programs." Mathematical Programming 27 (1983), 1-33.
mod updates;
mod workspace;

use ndarray::prelude::*;
use std::marker::PhantomData;

use crate::error::QuadProgError;
use crate::float::Float;
use crate::quadratic_program::Problem;
use crate::solvers::{ActiveConstraint, OptimizeResult, Solver};

use self::updates::{add_constraint, delete_constraint};
use self::workspace::Workspace;

/// Builder struct to customize the [`DualActiveSet`] solver.
///
/// After constructing the default solver with [`DualActiveSet::custom`], use the other methods
/// to update specific settings, and finally call [`build`](DualActiveSetBuilder::build) to
/// validate the customized settings and create the solver.
pub struct DualActiveSetBuilder<F> {
    max_iter: usize,
    disp: bool,
    warm_start: bool,
    marker: PhantomData<F>,
}

impl<F: Float> DualActiveSetBuilder<F> {
    pub(crate) fn new() -> DualActiveSetBuilder<F> {
        DualActiveSetBuilder {
            max_iter: 1000,
            disp: false,
            warm_start: false,
            marker: PhantomData,
        }
    }

    /// Maximum number of iterations before we give up on trying to solve the problem.
    ///
    /// One iteration adds one constraint to the working set (possibly dropping others along the
    /// way), so for well-posed problems the solver terminates after a small multiple of the
    /// number of active constraints.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set to true to print the value of convergence indicators to stdout at every iteration.
    pub fn disp(mut self, disp: bool) -> Self {
        self.disp = disp;
        self
    }

    /// Seed each solve with the active set found by the previous solve.
    ///
    /// When a sequence of problems of identical shape differs only slightly in its data (a
    /// receding-horizon controller shifting its constraints by one sample, say), the optimal
    /// active set rarely changes between neighbouring problems, and replaying it skips most of
    /// the violation-hunting iterations. The replay happens against the freshly factorized
    /// problem data, so enabling this never reuses stale numerical state; it only reuses the
    /// combinatorial choice of which constraints to activate first.
    pub fn warm_start(mut self, warm_start: bool) -> Self {
        self.warm_start = warm_start;
        self
    }

    /// Construct a solver from the provided inputs, validating the input values.
    /// Returns an `InvalidParameter` error if one of the input constraints is violated.
    pub fn build(self) -> Result<DualActiveSet<F>, QuadProgError<F>> {
        if self.max_iter == 0 {
            return Err(QuadProgError::InvalidParameter(
                "max_iter must be at least 1",
            ));
        }
        Ok(DualActiveSet {
            max_iter: self.max_iter,
            disp: self.disp,
            warm_start: self.warm_start,
            ws: Workspace::new(),
        })
    }
}

/// Dual active-set solver for dense convex quadratic programs.
///
/// To get started quickly, use the [`default`](DualActiveSet::default) method to initialize the
/// solver with default parameters. See [`custom`](DualActiveSet::custom) for customization
/// options through the builder pattern.
///
/// The solver owns its factorization buffers and reuses them across calls as long as the problem
/// dimensions stay the same, so solving many problems of one shape performs no allocation after
/// the first call.
pub struct DualActiveSet<F> {
    max_iter: usize,
    disp: bool,
    warm_start: bool,
    ws: Workspace<F>,
}

impl<F: Float> Default for DualActiveSet<F> {
    /// The dual active-set solver with default configuration.
    fn default() -> Self {
        DualActiveSetBuilder::new().build().unwrap()
    }
}

impl<F: Float> DualActiveSet<F> {
    /// Construct a new solver, to be customized through the builder pattern.
    ///
    /// ```rust
    /// use approx::assert_abs_diff_eq;
    /// use ndarray::array;
    /// use qp::prelude::*;
    ///
    /// let H = array![[1f64, 0.], [0., 1.]];
    /// let g0 = array![0., 0.];
    /// let CI = array![[1., 1.]];
    /// let ci0 = array![-1.];
    ///
    /// let problem = Problem::target(&H, &g0).ineq(&CI, &ci0).build().unwrap();
    /// let mut solver = DualActiveSet::custom().max_iter(100).build().unwrap();
    /// let res = solver.solve(&problem).unwrap();
    ///
    /// assert_abs_diff_eq!(*res.x(), array![0.5, 0.5], epsilon = 1e-10);
    /// ```
    pub fn custom() -> DualActiveSetBuilder<F> {
        DualActiveSetBuilder::new()
    }
}

/// The driver walks an explicit state machine instead of the classic labeled jumps of the
/// published algorithm: a partial step returns to the direction computation with the same
/// candidate, while a degenerate insertion returns to the violation re-selection.
enum Step {
    /// Start of an iteration: refresh slacks, test optimality, checkpoint the iterate.
    SelectViolation,
    /// Pick the most violated constraint among the still-eligible inactive ones.
    ReselectViolation,
    /// Compute step directions and lengths for the carried candidate, then apply the step.
    ComputeDirection(usize),
}

impl<F: Float> Solver<F> for DualActiveSet<F> {
    fn solve(&mut self, problem: &Problem<F>) -> Result<OptimizeResult<F>, QuadProgError<F>> {
        let nVars = problem.n_vars();
        let nEqCon = problem.n_eq();
        let nIneqCon = problem.n_ineq();

        if !self.ws.shape_matches(nVars, nEqCon, nIneqCon) {
            self.ws.reset(nVars, nEqCon, nIneqCon);
        }
        let replay_to = if self.warm_start { self.ws.q } else { 0 };
        let ws = &mut self.ws;

        // c1 * c2 estimates the condition number of H and scales the termination test below.
        let c1 = problem.H().diag().sum();
        ws.factorize(problem)?;
        let c2 = ws.J.diag().sum();

        let half = F::cast(0.5);
        let mut x = Array1::zeros(nVars);
        ws.unconstrained_minimizer(problem.g0(), &mut x);
        let mut f = half * problem.g0().dot(&x);

        if self.disp {
            println!("iter      \tpsi       \tactive    ");
        }

        // Force every equality constraint into the working set. A degenerate insertion here
        // means the equality system is rank deficient, which no amount of iterating can fix.
        for i in 0..nEqCon {
            ws.np.assign(&problem.CE().row(i));
            ws.A[i] = -(i as i64) - 1;
            if !force_constraint(ws, &mut x, &mut f, problem.ce0()[i]) {
                return Err(QuadProgError::RedundantEqualities);
            }
        }

        for i in 0..nIneqCon {
            ws.iai[i] = i as i64;
        }

        // Replay the active set of the previous solve against the fresh problem data.
        for pos in nEqCon..replay_to {
            let ip = ws.A[pos] as usize;
            ws.np.assign(&problem.CI().row(ip));
            if !force_constraint(ws, &mut x, &mut f, problem.ci0()[ip]) {
                return Err(QuadProgError::NumericalProblem);
            }
            ws.iai[ip] = -1;
        }

        let eps_term = F::cast(nIneqCon) * F::epsilon() * c1 * c2 * F::cast(100);
        let mut iter = 0usize;
        let mut step = Step::SelectViolation;
        loop {
            match step {
                Step::SelectViolation => {
                    iter += 1;
                    if iter > self.max_iter {
                        ws.q = ws.iq;
                        return Err(QuadProgError::IterationLimitExceeded(x));
                    }
                    for i in nEqCon..ws.iq {
                        ws.iai[ws.A[i] as usize] = -1;
                    }
                    let mut psi = F::zero();
                    for i in 0..nIneqCon {
                        ws.iaexcl[i] = true;
                        let si = problem.CI().row(i).dot(&x) + problem.ci0()[i];
                        ws.s[i] = si;
                        psi = psi + si.min(F::zero());
                    }
                    if self.disp {
                        println!("{:10}\t{:3.8}\t{:10}", iter, psi, ws.iq);
                    }
                    if psi.abs() <= eps_term {
                        // numerically there are no infeasibilities anymore
                        ws.q = ws.iq;
                        return Ok(collect_result(ws, x, f, iter));
                    }
                    ws.save_checkpoint(&x);
                    step = Step::ReselectViolation;
                }
                Step::ReselectViolation => {
                    let mut ss = F::zero();
                    let mut chosen = None;
                    for i in 0..nIneqCon {
                        if ws.s[i] < ss && ws.iai[i] != -1 && ws.iaexcl[i] {
                            ss = ws.s[i];
                            chosen = Some(i);
                        }
                    }
                    let ip = match chosen {
                        Some(i) => i,
                        None => {
                            ws.q = ws.iq;
                            return Ok(collect_result(ws, x, f, iter));
                        }
                    };
                    // Stage the candidate one slot past the working set.
                    ws.u[ws.iq] = F::zero();
                    ws.A[ws.iq] = ip as i64;
                    step = Step::ComputeDirection(ip);
                }
                Step::ComputeDirection(ip) => {
                    ws.np.assign(&problem.CI().row(ip));
                    ws.compute_d();
                    if ws.iq >= nVars {
                        // No room for another independent direction in primal space.
                        ws.z.fill(F::zero());
                    } else {
                        ws.update_z();
                    }
                    ws.update_r();

                    // t1: the largest step in dual space that keeps every active inequality
                    // multiplier nonnegative; l is the constraint that hits zero first.
                    let mut t1 = F::infinity();
                    let mut l = 0i64;
                    for k in nEqCon..ws.iq {
                        if ws.r[k] > F::zero() && ws.u[k] / ws.r[k] < t1 {
                            t1 = ws.u[k] / ws.r[k];
                            l = ws.A[k];
                        }
                    }
                    // t2: the step in primal space that brings the candidate to its boundary.
                    let t2 = if ws.z.dot(&ws.z).abs() > F::epsilon() {
                        -ws.s[ip] / ws.z.dot(&ws.np)
                    } else {
                        F::infinity()
                    };
                    let t = t1.min(t2);

                    if t == F::infinity() {
                        // No step in primal or dual space: the dual is unbounded.
                        ws.q = ws.iq;
                        return Err(QuadProgError::Unbounded);
                    }

                    if t2 == F::infinity() {
                        // Step in dual space only: drop the blocking constraint and retry the
                        // candidate without moving x.
                        for k in 0..ws.iq {
                            ws.u[k] = ws.u[k] - t * ws.r[k];
                        }
                        ws.u[ws.iq] = ws.u[ws.iq] + t;
                        ws.iai[l as usize] = l;
                        delete_constraint(ws, l);
                        continue;
                    }

                    // Step in primal and dual space.
                    x.scaled_add(t, &ws.z);
                    f = f + t * ws.z.dot(&ws.np) * (half * t + ws.u[ws.iq]);
                    for k in 0..ws.iq {
                        ws.u[k] = ws.u[k] - t * ws.r[k];
                    }
                    ws.u[ws.iq] = ws.u[ws.iq] + t;

                    if t == t2 {
                        // Full step: the candidate reached its boundary and joins the
                        // working set.
                        if add_constraint(ws) {
                            ws.iai[ip] = -1;
                            step = Step::SelectViolation;
                        } else {
                            // The candidate turned out linearly dependent on the working set.
                            // Undo the attempt, bar the candidate for the rest of this solve
                            // and pick a different violated constraint.
                            ws.iaexcl[ip] = false;
                            delete_constraint(ws, ip as i64);
                            ws.restore_checkpoint(&mut x);
                            step = Step::ReselectViolation;
                        }
                    } else {
                        // Partial step: a blocking constraint left the working set first.
                        // Keep pursuing the same candidate from the new iterate.
                        ws.iai[l as usize] = l;
                        delete_constraint(ws, l);
                        ws.s[ip] = problem.CI().row(ip).dot(&x) + problem.ci0()[ip];
                    }
                }
            }
        }
    }
}

/// Force one constraint into the working set: take the exact primal step to its boundary,
/// update the multipliers and objective, and insert its normal into the factorization.
/// Returns `false` when the normal is linearly dependent on the working set.
fn force_constraint<F: Float>(
    ws: &mut Workspace<F>,
    x: &mut Array1<F>,
    f: &mut F,
    c0: F,
) -> bool {
    ws.compute_d();
    ws.update_z();
    ws.update_r();

    let mut t2 = F::zero();
    if ws.z.dot(&ws.z).abs() > F::epsilon() {
        t2 = (-ws.np.dot(x) - c0) / ws.z.dot(&ws.np);
    }

    x.scaled_add(t2, &ws.z);

    ws.u[ws.iq] = t2;
    for k in 0..ws.iq {
        ws.u[k] = ws.u[k] - t2 * ws.r[k];
    }

    *f = *f + F::cast(0.5) * t2 * t2 * ws.z.dot(&ws.np);

    add_constraint(ws)
}

fn collect_result<F: Float>(
    ws: &Workspace<F>,
    x: Array1<F>,
    f: F,
    iteration: usize,
) -> OptimizeResult<F> {
    let active_set = ws
        .A
        .iter()
        .take(ws.iq)
        .map(|&a| {
            if a < 0 {
                ActiveConstraint::Equality((-a - 1) as usize)
            } else {
                ActiveConstraint::Inequality(a as usize)
            }
        })
        .collect();
    let multipliers = ws.u.slice(s![..ws.iq]).to_owned();
    OptimizeResult::new(x, f, iteration, active_set, multipliers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    /// The stationarity residual `Hx + g0 - CE' u_eq - CI' u_ineq` must vanish at an optimum,
    /// and active inequality multipliers must be nonnegative.
    fn kkt_residual(problem: &Problem<f64>, res: &OptimizeResult<f64>) -> Array1<f64> {
        let mut residual = problem.H().dot(res.x()) + problem.g0();
        for (constraint, &u) in res.active_set().iter().zip(res.multipliers()) {
            match *constraint {
                ActiveConstraint::Equality(i) => {
                    residual = residual - &(&problem.CE().row(i).to_owned() * u);
                }
                ActiveConstraint::Inequality(i) => {
                    assert!(u >= 0.0, "negative multiplier {u} on inequality {i}");
                    residual = residual - &(&problem.CI().row(i).to_owned() * u);
                }
            }
        }
        residual
    }

    #[test]
    fn default_builder_doesnt_panic() {
        let _ = DualActiveSet::<f64>::default();
        let _ = DualActiveSet::<f64>::custom().build().unwrap();
    }

    #[test]
    fn builder_rejects_zero_max_iter() {
        assert!(matches!(
            DualActiveSet::<f64>::custom().max_iter(0).build(),
            Err(QuadProgError::InvalidParameter(_))
        ));
    }

    #[test]
    fn unconstrained_minimum() {
        let H = array![[13.0, 18.0, -6.0], [18.0, 27.0, -9.0], [-6.0, -9.0, 4.0]];
        let g0 = array![4.0, 0.0, 100.0];
        let problem = Problem::target(&H, &g0).build().unwrap();

        let mut solver = DualActiveSet::default();
        let res = solver.solve(&problem).unwrap();

        assert_abs_diff_eq!(
            *res.x(),
            array![-4.0, -30.66666666666666, -100.0],
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(*res.fun(), -5008.0, epsilon = 1e-6);
        assert!(res.active_set().is_empty());
    }

    #[test]
    fn single_active_inequality() {
        let H = array![[1.0, 0.0], [0.0, 1.0]];
        let g0 = array![0.0, 0.0];
        let CI = array![[1.0, 1.0]];
        let ci0 = array![-1.0];
        let problem = Problem::target(&H, &g0).ineq(&CI, &ci0).build().unwrap();

        let mut solver = DualActiveSet::default();
        let res = solver.solve(&problem).unwrap();

        assert_abs_diff_eq!(*res.x(), array![0.5, 0.5], epsilon = 1e-10);
        assert_abs_diff_eq!(*res.fun(), 0.25, epsilon = 1e-10);
        assert_eq!(res.active_set(), &[ActiveConstraint::Inequality(0)][..]);
        assert_abs_diff_eq!(res.multipliers()[0], 0.5, epsilon = 1e-10);
        assert_abs_diff_eq!(kkt_residual(&problem, &res), array![0.0, 0.0], epsilon = 1e-10);
    }

    #[test]
    fn mixed_equality_and_inequalities() {
        // min 0.5 x'Hx + g0'x  st  x0 + x1 = 3,  x >= 0,  x0 + x1 >= 2
        let H = array![[4.0, -2.0], [-2.0, 4.0]];
        let g0 = array![6.0, 0.0];
        let CE = array![[1.0, 1.0]];
        let ce0 = array![-3.0];
        let CI = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let ci0 = array![0.0, 0.0, -2.0];
        let problem = Problem::target(&H, &g0)
            .eq(&CE, &ce0)
            .ineq(&CI, &ci0)
            .build()
            .unwrap();

        let mut solver = DualActiveSet::default();
        let res = solver.solve(&problem).unwrap();

        assert_abs_diff_eq!(*res.x(), array![1.0, 2.0], epsilon = 1e-9);
        assert_abs_diff_eq!(*res.fun(), 12.0, epsilon = 1e-9);
        assert!(res.active_set().contains(&ActiveConstraint::Equality(0)));
        assert_abs_diff_eq!(kkt_residual(&problem, &res), array![0.0, 0.0], epsilon = 1e-9);
    }

    #[test]
    fn inequality_only_with_known_multipliers() {
        let H = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let g0 = array![0.0, -5.0, 0.0];
        let CI = array![[-4.0, -3.0, 0.0], [2.0, 1.0, 0.0], [0.0, -2.0, 1.0]];
        let ci0 = array![8.0, -2.0, 0.0];
        let problem = Problem::target(&H, &g0).ineq(&CI, &ci0).build().unwrap();

        let mut solver = DualActiveSet::default();
        let res = solver.solve(&problem).unwrap();

        assert_abs_diff_eq!(
            *res.x(),
            array![0.476190476190476, 1.04761904761905, 2.0952380952381],
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(*res.fun(), -2.38095238095238, epsilon = 1e-6);

        let mut active: Vec<_> = res.active_set().to_vec();
        active.sort_by_key(|c| match *c {
            ActiveConstraint::Inequality(i) => i,
            ActiveConstraint::Equality(i) => i,
        });
        assert_eq!(
            active,
            vec![
                ActiveConstraint::Inequality(1),
                ActiveConstraint::Inequality(2)
            ]
        );
        for (constraint, &u) in res.active_set().iter().zip(res.multipliers()) {
            match *constraint {
                ActiveConstraint::Inequality(1) => {
                    assert_abs_diff_eq!(u, 0.238095238095238, epsilon = 1e-6)
                }
                ActiveConstraint::Inequality(2) => {
                    assert_abs_diff_eq!(u, 2.0952380952381, epsilon = 1e-6)
                }
                other => panic!("unexpected active constraint {other:?}"),
            }
        }
        assert_abs_diff_eq!(
            kkt_residual(&problem, &res),
            array![0.0, 0.0, 0.0],
            epsilon = 1e-9
        );
    }

    #[test]
    fn contradictory_equalities_are_redundant() {
        // x0 = 1 and x0 = 2 cannot hold at once.
        let H = array![[1.0, 0.0], [0.0, 1.0]];
        let g0 = array![0.0, 0.0];
        let CE = array![[1.0, 0.0], [1.0, 0.0]];
        let ce0 = array![-1.0, -2.0];
        let problem = Problem::target(&H, &g0).eq(&CE, &ce0).build().unwrap();

        let mut solver = DualActiveSet::default();
        assert!(matches!(
            solver.solve(&problem),
            Err(QuadProgError::RedundantEqualities)
        ));
    }

    #[test]
    fn infeasible_inequalities_are_unbounded() {
        // x >= 1 and x <= 0 cannot hold at once, so the dual is unbounded.
        let H = array![[1.0]];
        let g0 = array![0.0];
        let CI = array![[1.0], [-1.0]];
        let ci0 = array![-1.0, 0.0];
        let problem = Problem::target(&H, &g0).ineq(&CI, &ci0).build().unwrap();

        let mut solver = DualActiveSet::default();
        assert!(matches!(
            solver.solve(&problem),
            Err(QuadProgError::Unbounded)
        ));
    }

    #[test]
    fn iteration_limit_reports_best_effort_iterate() {
        let H = array![[1.0, 0.0], [0.0, 1.0]];
        let g0 = array![0.0, 0.0];
        let CI = array![[1.0, 1.0]];
        let ci0 = array![-1.0];
        let problem = Problem::target(&H, &g0).ineq(&CI, &ci0).build().unwrap();

        let mut solver = DualActiveSet::custom().max_iter(1).build().unwrap();
        match solver.solve(&problem) {
            Err(QuadProgError::IterationLimitExceeded(x)) => {
                assert_eq!(x.len(), 2);
            }
            other => panic!("expected iteration limit, got {:?}", other.map(|r| r.x().clone())),
        }
    }

    #[test]
    fn resolving_is_deterministic() {
        let H = array![[4.0, -2.0], [-2.0, 4.0]];
        let g0 = array![6.0, 0.0];
        let CE = array![[1.0, 1.0]];
        let ce0 = array![-3.0];
        let CI = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let ci0 = array![0.0, 0.0, -2.0];
        let problem = Problem::target(&H, &g0)
            .eq(&CE, &ce0)
            .ineq(&CI, &ci0)
            .build()
            .unwrap();

        let mut solver = DualActiveSet::default();
        let first = solver.solve(&problem).unwrap();
        let second = solver.solve(&problem).unwrap();

        // Bit-for-bit identical: same data, same engine, same arithmetic.
        assert_eq!(first.x(), second.x());
        assert_eq!(first.fun(), second.fun());
        assert_eq!(first.iteration(), second.iteration());
        assert_eq!(first.active_set(), second.active_set());
    }

    #[test]
    fn warm_start_converges_in_fewer_iterations() {
        let H = array![[1.0, 0.0], [0.0, 1.0]];
        let g0 = array![0.0, 0.0];
        let CI = array![[1.0, 1.0]];
        let ci0 = array![-1.0];
        let ci0_shifted = array![-1.0001];
        let problem = Problem::target(&H, &g0).ineq(&CI, &ci0).build().unwrap();
        let perturbed = Problem::target(&H, &g0)
            .ineq(&CI, &ci0_shifted)
            .build()
            .unwrap();

        let mut cold = DualActiveSet::default();
        let cold_res = cold.solve(&perturbed).unwrap();

        let mut warm = DualActiveSet::custom().warm_start(true).build().unwrap();
        warm.solve(&problem).unwrap();
        let warm_res = warm.solve(&perturbed).unwrap();

        assert!(warm_res.iteration() < cold_res.iteration());
        assert_abs_diff_eq!(*warm_res.x(), *cold_res.x(), epsilon = 1e-9);
        assert_abs_diff_eq!(*warm_res.fun(), *cold_res.fun(), epsilon = 1e-9);
    }

    #[test]
    fn supplied_inverse_factor_matches_internal_factorization() {
        // H = diag(4, 1), so L = diag(2, 1) and J0 = L^-T = diag(0.5, 1).
        let H = array![[4.0, 0.0], [0.0, 1.0]];
        let g0 = array![-4.0, 1.0];
        let J0 = array![[0.5, 0.0], [0.0, 1.0]];
        let CI = array![[0.0, 1.0]];
        let ci0 = array![0.5];

        let plain = Problem::target(&H, &g0).ineq(&CI, &ci0).build().unwrap();
        let factored = Problem::target(&H, &g0)
            .ineq(&CI, &ci0)
            .inverse_factor(&J0)
            .build()
            .unwrap();

        let mut solver = DualActiveSet::default();
        let res_plain = solver.solve(&plain).unwrap();
        let mut solver = DualActiveSet::default();
        let res_factored = solver.solve(&factored).unwrap();

        assert_abs_diff_eq!(*res_plain.x(), *res_factored.x(), epsilon = 1e-12);
        assert_abs_diff_eq!(*res_plain.fun(), *res_factored.fun(), epsilon = 1e-12);
    }

    #[test]
    fn workspace_is_reprovisioned_when_dimensions_change() {
        let mut solver = DualActiveSet::default();

        let H2 = array![[1.0, 0.0], [0.0, 1.0]];
        let g02 = array![1.0, 1.0];
        let problem2 = Problem::target(&H2, &g02).build().unwrap();
        let res2 = solver.solve(&problem2).unwrap();
        assert_abs_diff_eq!(*res2.x(), array![-1.0, -1.0], epsilon = 1e-12);

        let H3 = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let g03 = array![1.0, 1.0, 1.0];
        let problem3 = Problem::target(&H3, &g03).build().unwrap();
        let res3 = solver.solve(&problem3).unwrap();
        assert_abs_diff_eq!(*res3.x(), array![-1.0, -1.0, -1.0], epsilon = 1e-12);
    }

    #[test]
    fn not_positive_definite_hessian_is_a_numerical_problem() {
        let H = array![[-1.0]];
        let g0 = array![0.0];
        let problem = Problem::target(&H, &g0).build().unwrap();

        let mut solver = DualActiveSet::default();
        assert!(matches!(
            solver.solve(&problem),
            Err(QuadProgError::NumericalProblem)
        ));
    }
}
