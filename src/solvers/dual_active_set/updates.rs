#![allow(non_snake_case)]
//! Incremental updates of the working-set factorization.
//!
//! Both routines maintain the invariant that the leading `iq` columns of `R` stay upper
//! triangular while `J` absorbs the orthogonal part of every transformation. The rotation is the
//! 2x2 matrix `[[cc, ss], [ss, -cc]]`; the sign of `cc` is normalized to keep the diagonal of
//! `R` compatible with the linear-dependence test in [`add_constraint`].
use super::workspace::Workspace;
use crate::float::Float;

/// Bring the candidate normal `d` into the working-set factorization.
///
/// A cascade of Givens rotations zeroes `d` below position `iq`, working upward from the last
/// entry; each rotation is applied to the matching column pair of `J`. The reduced head of `d`
/// becomes the new column of `R`. Returns `false` when the new diagonal entry vanishes relative
/// to `R_norm`, i.e. the candidate is linearly dependent on the working set and the insertion
/// must be undone by the caller.
pub(crate) fn add_constraint<F: Float>(ws: &mut Workspace<F>) -> bool {
    let n = ws.J.nrows();
    // A working set of n constraints already spans the whole space.
    if ws.iq >= n {
        return false;
    }
    for j in (ws.iq + 1..n).rev() {
        let mut cc = ws.d[j - 1];
        let mut ss = ws.d[j];
        let h = cc.hypot(ss);
        if h == F::zero() {
            continue;
        }
        ws.d[j] = F::zero();
        ss = ss / h;
        cc = cc / h;
        if cc < F::zero() {
            cc = -cc;
            ss = -ss;
            ws.d[j - 1] = -h;
        } else {
            ws.d[j - 1] = h;
        }
        let xny = ss / (F::one() + cc);
        for k in 0..n {
            let t1 = ws.J[[k, j - 1]];
            let t2 = ws.J[[k, j]];
            ws.J[[k, j - 1]] = t1 * cc + t2 * ss;
            ws.J[[k, j]] = xny * (t1 + ws.J[[k, j - 1]]) - t2;
        }
    }
    ws.iq += 1;
    for i in 0..ws.iq {
        ws.R[[i, ws.iq - 1]] = ws.d[i];
    }

    if ws.d[ws.iq - 1].abs() <= F::epsilon() * ws.R_norm {
        return false;
    }
    ws.R_norm = ws.R_norm.max(ws.d[ws.iq - 1].abs());
    true
}

/// Remove constraint `l` (in the working-set encoding of `A`) from the factorization.
///
/// The entry is located among the non-equality positions, then the working set, the multipliers
/// and the columns of `R` shift down one slot, the vacated column is zeroed and `iq` shrinks.
/// The shift leaves one subdiagonal entry per column from the removal point onward; a forward
/// sweep of Givens rotations restores triangularity, with each rotation mirrored onto `J`.
pub(crate) fn delete_constraint<F: Float>(ws: &mut Workspace<F>, l: i64) {
    let n = ws.J.nrows();
    let n_eq = ws.n_eq();

    let mut qq = n_eq;
    for i in n_eq..ws.iq {
        if ws.A[i] == l {
            qq = i;
            break;
        }
    }

    for i in qq..ws.iq - 1 {
        ws.A[i] = ws.A[i + 1];
        ws.u[i] = ws.u[i + 1];
        for j in 0..n {
            ws.R[[j, i]] = ws.R[[j, i + 1]];
        }
    }
    // The slot just past the working set stages the constraint currently being brought in;
    // it moves down together with the rest.
    ws.A[ws.iq - 1] = ws.A[ws.iq];
    ws.u[ws.iq - 1] = ws.u[ws.iq];
    ws.A[ws.iq] = 0;
    ws.u[ws.iq] = F::zero();
    for j in 0..ws.iq {
        ws.R[[j, ws.iq - 1]] = F::zero();
    }
    ws.iq -= 1;

    if ws.iq == 0 {
        return;
    }

    for j in qq..ws.iq {
        let mut cc = ws.R[[j, j]];
        let mut ss = ws.R[[j + 1, j]];
        let h = cc.hypot(ss);
        if h == F::zero() {
            continue;
        }
        cc = cc / h;
        ss = ss / h;
        ws.R[[j + 1, j]] = F::zero();
        if cc < F::zero() {
            ws.R[[j, j]] = -h;
            cc = -cc;
            ss = -ss;
        } else {
            ws.R[[j, j]] = h;
        }
        let xny = ss / (F::one() + cc);
        for k in j + 1..ws.iq {
            let t1 = ws.R[[j, k]];
            let t2 = ws.R[[j + 1, k]];
            ws.R[[j, k]] = t1 * cc + t2 * ss;
            ws.R[[j + 1, k]] = xny * (t1 + ws.R[[j, k]]) - t2;
        }
        for k in 0..n {
            let t1 = ws.J[[k, j]];
            let t2 = ws.J[[k, j + 1]];
            ws.J[[k, j]] = t1 * cc + t2 * ss;
            ws.J[[k, j + 1]] = xny * (ws.J[[k, j]] + t1) - t2;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    fn workspace_with_identity(n: usize, n_ineq: usize) -> Workspace<f64> {
        let mut ws = Workspace::new();
        ws.reset(n, 0, n_ineq);
        ws.J.assign(&Array2::eye(n));
        ws
    }

    #[test]
    fn dependent_normal_is_rejected() {
        let mut ws = workspace_with_identity(2, 2);
        ws.np.assign(&array![1.0, 0.0]);
        ws.compute_d();
        assert!(add_constraint(&mut ws));
        assert_eq!(ws.iq, 1);

        // A multiple of the first normal cannot enter the working set.
        ws.np.assign(&array![2.0, 0.0]);
        ws.compute_d();
        assert!(!add_constraint(&mut ws));
    }

    #[test]
    fn delete_restores_triangularity() {
        let mut ws = workspace_with_identity(2, 2);
        ws.np.assign(&array![1.0, 0.0]);
        ws.compute_d();
        assert!(add_constraint(&mut ws));
        ws.np.assign(&array![1.0, 1.0]);
        ws.compute_d();
        assert!(add_constraint(&mut ws));
        ws.A[0] = 0;
        ws.A[1] = 1;
        ws.u[0] = 0.25;
        ws.u[1] = 0.5;

        delete_constraint(&mut ws, 0);

        assert_eq!(ws.iq, 1);
        assert_eq!(ws.A[0], 1);
        assert_abs_diff_eq!(ws.u[0], 0.5);
        assert_abs_diff_eq!(ws.R[[1, 0]], 0.0);
        assert_abs_diff_eq!(ws.R[[0, 0]].abs(), 2f64.sqrt(), epsilon = 1e-12);
        // J stays orthogonal throughout (here H = I, so J J' = I).
        assert_abs_diff_eq!(ws.J.dot(&ws.J.t()), Array2::eye(2), epsilon = 1e-12);
    }

    #[test]
    fn cannot_exceed_variable_count() {
        let mut ws = workspace_with_identity(1, 2);
        ws.np.assign(&array![1.0]);
        ws.compute_d();
        assert!(add_constraint(&mut ws));
        ws.np.assign(&array![-1.0]);
        ws.compute_d();
        assert!(!add_constraint(&mut ws));
        assert_eq!(ws.iq, 1);
    }
}
