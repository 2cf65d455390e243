/*!
Linear arithmetic over the rationals, decided by reduction to LP feasibility.

Rational coefficients are represented as `f64` for the LP bridge (`spec.md` §9 leaves the LP
algorithm, and implicitly its numeric representation, unspecified); the surface grammar only
produces integer vectors and bounds, so this loses no precision for the formulas this solver is
asked to decide.
*/

pub mod lp;

use log::{debug, trace};

use self::lp::LpStatus;
use super::{Theory, TheoryCheck};
use crate::misc::log::targets;
use crate::structures::literal::IntLit;
use crate::types::atom::Atom;
use crate::types::atom_map::AtomMap;
use crate::types::err::{ErrorKind, PreprocessingError};

struct Row {
    coeffs: Vec<f64>,
    rhs: f64,
    strict: bool,
}

pub struct TqTheory {
    support_negative_vars: bool,
    num_vars: usize,
    rows: Vec<Row>,
    assigned: Vec<IntLit>,
}

impl TqTheory {
    pub fn new(support_negative_vars: bool) -> Self {
        TqTheory {
            support_negative_vars,
            num_vars: 0,
            rows: Vec::new(),
            assigned: Vec::new(),
        }
    }

    fn row_for(&self, lit: IntLit, map: &AtomMap) -> Row {
        let atom = map.atom(lit.var()).expect("literal has no atom");
        let Atom::Geq(vector, bound) = atom else {
            panic!("TQ theory received a non-arithmetic atom: {atom}");
        };
        if lit.polarity() {
            // `vector . x >= bound` becomes `-vector . x <= -bound`.
            Row {
                coeffs: vector.iter().map(|&v| -(v as f64)).collect(),
                rhs: -(*bound as f64),
                strict: false,
            }
        } else {
            // `vector . x < bound` becomes `vector . x <= bound`, flagged strict.
            Row {
                coeffs: vector.iter().map(|&v| v as f64).collect(),
                rhs: *bound as f64,
                strict: true,
            }
        }
    }

    /// Expands each coefficient `a_i` into the interleaved pair `(a_i, -a_i)` when negative
    /// variables are supported, realising `x_i = x_i+ - x_i-` with both halves non-negative
    /// (`spec.md` §3).
    fn expand(&self, coeffs: &[f64]) -> Vec<f64> {
        if !self.support_negative_vars {
            let mut v = coeffs.to_vec();
            v.resize(self.num_vars, 0.0);
            return v;
        }
        let mut out = Vec::with_capacity(self.num_vars * 2);
        for i in 0..self.num_vars {
            let a = coeffs.get(i).copied().unwrap_or(0.0);
            out.push(a);
            out.push(-a);
        }
        out
    }
}

impl Theory for TqTheory {
    /// Rejects any atom that isn't a propositional gate variable or a `Geq`/`Less` constraint
    /// (`spec.md` §4.6). Vector equality/disequality (`a.x = b` / `a.x != b`) never reaches this
    /// theory directly: the parser desugars it to the `(Geq & Geq)` / `(Less | Less)` pair
    /// `spec.md` §4.6 specifies before CNF pre-processing ever runs (see
    /// `parser::build_arithmetic_equality`), so by the time a theory sees an `AtomMap` the
    /// rewrite has already happened and only ordinary arithmetic atoms remain.
    fn preprocess(&mut self, map: &AtomMap) -> Result<(), ErrorKind> {
        for var in map.vars() {
            match map.atom(var) {
                Some(Atom::Var(_)) | Some(Atom::Geq(..)) | Some(Atom::Less(..)) => {}
                Some(_) => return Err(ErrorKind::Preprocessing(PreprocessingError::ArithmeticArgumentKind)),
                None => {}
            }
        }
        Ok(())
    }

    fn process_assignment(&mut self, lit: IntLit, map: &AtomMap) {
        if !matches!(map.atom(lit.var()), Some(Atom::Geq(..))) {
            // A propositional (Tseitin gate) literal: not an arithmetic constraint.
            self.assigned.push(lit);
            return;
        }
        let row = self.row_for(lit, map);
        self.num_vars = self.num_vars.max(row.coeffs.len());
        self.rows.push(row);
        self.assigned.push(lit);
    }

    fn check(&mut self, _map: &AtomMap) -> TheoryCheck {
        if self.rows.is_empty() {
            return TheoryCheck::Sat;
        }
        let any_strict = self.rows.iter().any(|r| r.strict);
        let b: Vec<f64> = self.rows.iter().map(|r| r.rhs).collect();

        let var_cols = if self.support_negative_vars { self.num_vars * 2 } else { self.num_vars };
        let slack_col = var_cols;
        let total_cols = if any_strict { var_cols + 1 } else { var_cols };

        let mut a: Vec<Vec<f64>> = self.rows.iter().map(|r| self.expand(&r.coeffs)).collect();
        for (row, r) in a.iter_mut().zip(self.rows.iter()) {
            row.resize(total_cols, 0.0);
            if any_strict {
                row[slack_col] = if r.strict { 1.0 } else { 0.0 };
            }
        }

        let mut c = vec![0.0; total_cols];
        if any_strict {
            c[slack_col] = 1.0;
        }

        let status = lp::solve(&a, &b, &c);
        trace!(target: targets::TQ, "lp oracle returned {status:?} over {} rows", self.rows.len());
        let sat = match status {
            LpStatus::Infeasible => false,
            LpStatus::Unbounded => true,
            LpStatus::Optimal(value) => !any_strict || value > 1e-7,
        };

        if sat {
            TheoryCheck::Sat
        } else {
            debug!(target: targets::TQ, "infeasible region detected");
            TheoryCheck::Unsat(self.assigned.iter().map(|&l| -l).collect())
        }
    }

    fn next_propagation(&mut self) -> Option<(IntLit, Vec<IntLit>)> {
        None
    }

    fn conflict_recovery(&mut self, assignment: &[IntLit], map: &AtomMap) {
        self.rows.clear();
        self.assigned.clear();
        for &lit in assignment {
            self.process_assignment(lit, map);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Interns a `Geq`/`Less` atom and returns the `IntLit` that asserts it (the sign relative
    /// to the shared canonical key is resolved automatically).
    fn lit_for(map: &mut AtomMap, atom: &Atom) -> IntLit {
        let (var, sign) = map.intern(atom);
        if sign {
            IntLit(var as i32)
        } else {
            IntLit(-(var as i32))
        }
    }

    #[test]
    fn strict_contradiction_is_unsat() {
        // [1,1] >= 1 & [1,1] < -1
        let mut map = AtomMap::new();
        let l1 = lit_for(&mut map, &Atom::geq(vec![1, 1], 1));
        let l2 = lit_for(&mut map, &Atom::less(vec![1, 1], -1));

        let mut theory = TqTheory::new(false);
        theory.process_assignment(l1, &map);
        theory.process_assignment(l2, &map);
        assert!(matches!(theory.check(&map), TheoryCheck::Unsat(_)));
    }

    #[test]
    fn negative_vars_mode_changes_satisfiability() {
        // [-1,-1] >= -3 & [-2,1] >= 5
        let mut map = AtomMap::new();
        let l1 = lit_for(&mut map, &Atom::geq(vec![-1, -1], -3));
        let l2 = lit_for(&mut map, &Atom::geq(vec![-2, 1], 5));

        let mut without_negatives = TqTheory::new(false);
        without_negatives.process_assignment(l1, &map);
        without_negatives.process_assignment(l2, &map);
        assert!(matches!(without_negatives.check(&map), TheoryCheck::Unsat(_)));

        let mut with_negatives = TqTheory::new(true);
        with_negatives.process_assignment(l1, &map);
        with_negatives.process_assignment(l2, &map);
        assert!(matches!(with_negatives.check(&map), TheoryCheck::Sat));
    }
}
