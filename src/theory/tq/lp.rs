/*!
An in-house two-phase simplex, used as the LP oracle behind the TQ theory.

`spec.md` §9 treats the choice of LP algorithm as immaterial: the contract is simply
`(A, b, c) -> {optimal-with-value, unbounded, infeasible}`. No LP crate appears anywhere in the
example pack, so this is written by hand rather than imported, using Bland's rule to avoid
cycling on degenerate tableaus.
*/

/// The result of solving `maximize c.y subject to A y <= b, y >= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LpStatus {
    Optimal(f64),
    Unbounded,
    Infeasible,
}

const EPSILON: f64 = 1e-9;

/// Solves `maximize c . y` subject to `A y <= b`, `y >= 0`. Rows of `A`/`b` may have any sign of
/// `b`; negative-RHS rows are normalised internally and solved via a phase-1 artificial
/// objective before phase 2 optimises `c`.
pub fn solve(a: &[Vec<f64>], b: &[f64], c: &[f64]) -> LpStatus {
    let m = a.len();
    let n = if m == 0 { c.len() } else { a[0].len() };
    if m == 0 {
        // No constraints: unbounded unless c is entirely non-positive (optimum at origin).
        return if c.iter().all(|&ci| ci <= EPSILON) {
            LpStatus::Optimal(0.0)
        } else {
            LpStatus::Unbounded
        };
    }

    // Column layout: n decision vars, then one slack-or-surplus per row, then one artificial per
    // row whose normalised RHS required a `>=` flip.
    let mut needs_artificial = vec![false; m];
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(m);
    let mut rhs: Vec<f64> = Vec::with_capacity(m);
    for i in 0..m {
        let mut row = a[i].clone();
        let mut bi = b[i];
        if bi < 0.0 {
            for v in row.iter_mut() {
                *v = -*v;
            }
            bi = -bi;
            needs_artificial[i] = true;
        }
        rows.push(row);
        rhs.push(bi);
    }

    let slack_count = m;
    let artificial_cols: Vec<usize> = (0..m).filter(|&i| needs_artificial[i]).collect();
    let total_cols = n + slack_count + artificial_cols.len();

    let mut tableau = vec![vec![0.0f64; total_cols + 1]; m];
    let mut basis = vec![0usize; m];
    let mut art_col_of_row = vec![None; m];
    let mut next_artificial = n + slack_count;
    for i in 0..m {
        for j in 0..n {
            tableau[i][j] = rows[i][j];
        }
        let slack_col = n + i;
        tableau[i][slack_col] = if needs_artificial[i] { -1.0 } else { 1.0 };
        tableau[i][total_cols] = rhs[i];
        if needs_artificial[i] {
            tableau[i][next_artificial] = 1.0;
            basis[i] = next_artificial;
            art_col_of_row[i] = Some(next_artificial);
            next_artificial += 1;
        } else {
            basis[i] = slack_col;
        }
    }

    if !artificial_cols.is_empty() {
        let mut phase1_obj = vec![0.0f64; total_cols];
        for &col in art_col_of_row.iter().flatten() {
            phase1_obj[col] = -1.0;
        }
        let status = run_simplex(&mut tableau, &mut basis, &phase1_obj, total_cols);
        if status == LpStatus::Unbounded {
            // Phase 1 is bounded above by 0 by construction; treat as an internal error guard.
            return LpStatus::Infeasible;
        }
        let phase1_value = phase1_row_value(&tableau, &basis, &phase1_obj, m);
        if phase1_value.abs() > 1e-6 {
            return LpStatus::Infeasible;
        }
        // Drive any artificial variable still in the basis at zero level out, if possible.
        for i in 0..m {
            if let Some(col) = art_col_of_row[i] {
                if basis[i] == col {
                    if let Some(j) = (0..n + slack_count).find(|&j| tableau[i][j].abs() > EPSILON) {
                        pivot(&mut tableau, &mut basis, i, j);
                    }
                }
            }
        }
    }

    let mut c_ext = vec![0.0f64; total_cols];
    c_ext[..n].copy_from_slice(c);

    match run_simplex(&mut tableau, &mut basis, &c_ext, total_cols) {
        LpStatus::Unbounded => LpStatus::Unbounded,
        _ => {
            let value: f64 = (0..m).map(|i| c_ext[basis[i]] * tableau[i][total_cols]).sum();
            LpStatus::Optimal(value)
        }
    }
}

fn phase1_row_value(tableau: &[Vec<f64>], basis: &[usize], obj: &[f64], m: usize) -> f64 {
    let total_cols = tableau[0].len() - 1;
    (0..m).map(|i| obj[basis[i]] * tableau[i][total_cols]).sum()
}

/// Runs the simplex method (maximizing `obj`) to optimality using Bland's rule, mutating
/// `tableau`/`basis` in place. Returns `Unbounded` if an entering column has no limiting row;
/// otherwise `Optimal` (the caller reads the value off `tableau`/`basis`).
fn run_simplex(tableau: &mut [Vec<f64>], basis: &mut [usize], obj: &[f64], total_cols: usize) -> LpStatus {
    let m = tableau.len();
    loop {
        // Reduced costs: obj[j] - sum_i(obj[basis[i]] * tableau[i][j]).
        let reduced: Vec<f64> = (0..total_cols)
            .map(|j| obj[j] - (0..m).map(|i| obj[basis[i]] * tableau[i][j]).sum::<f64>())
            .collect();
        let Some(pivot_col) = (0..total_cols).find(|&j| reduced[j] > EPSILON) else {
            return LpStatus::Optimal(0.0);
        };
        let mut best_row: Option<usize> = None;
        let mut best_ratio = f64::INFINITY;
        for i in 0..m {
            if tableau[i][pivot_col] > EPSILON {
                let ratio = tableau[i][total_cols] / tableau[i][pivot_col];
                if ratio < best_ratio - EPSILON || (ratio < best_ratio + EPSILON && best_row.map(|r| basis[r] > basis[i]).unwrap_or(true)) {
                    best_ratio = ratio;
                    best_row = Some(i);
                }
            }
        }
        let Some(pivot_row) = best_row else {
            return LpStatus::Unbounded;
        };
        pivot(tableau, basis, pivot_row, pivot_col);
    }
}

#[allow(clippy::needless_range_loop)]
fn pivot(tableau: &mut [Vec<f64>], basis: &mut [usize], row: usize, col: usize) {
    let total_cols = tableau[0].len();
    let pivot_val = tableau[row][col];
    for v in tableau[row].iter_mut() {
        *v /= pivot_val;
    }
    for i in 0..tableau.len() {
        if i == row {
            continue;
        }
        let factor = tableau[i][col];
        if factor.abs() > EPSILON {
            for j in 0..total_cols {
                tableau[i][j] -= factor * tableau[row][j];
            }
        }
    }
    basis[row] = col;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feasible_region_reports_optimal() {
        // x <= 1, maximize x.
        let status = solve(&[vec![1.0]], &[1.0], &[1.0]);
        assert_eq!(status, LpStatus::Optimal(1.0));
    }

    #[test]
    fn infeasible_when_rows_contradict() {
        // x <= -1 with x >= 0 is infeasible.
        let status = solve(&[vec![1.0]], &[-1.0], &[1.0]);
        assert_eq!(status, LpStatus::Infeasible);
    }

    #[test]
    fn unbounded_objective() {
        // x >= 0 unconstrained above, maximize x.
        let status = solve(&[vec![0.0]], &[1.0], &[1.0]);
        assert_eq!(status, LpStatus::Unbounded);
    }
}
