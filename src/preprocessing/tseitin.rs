//! Tseitin encoding: introduce a fresh gate variable for every non-literal sub-formula.

use crate::types::Atom;

/// Source of fresh dummy variables: `#G…` for Tseitin gates, `#N…` for negation-lifting
/// (`spec.md` §3's dummy-atom convention). Names starting with `#` are recognised as dummies by
/// [`crate::preprocessing::cnf::to_cnf_clauses`] and dropped from the final assignment.
#[derive(Default)]
pub struct DummyVarsTracker {
    gates: usize,
    negations: usize,
}

impl DummyVarsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh_gate(&mut self) -> Atom {
        self.gates += 1;
        Atom::var(format!("#G{}", self.gates))
    }

    pub fn fresh_negation(&mut self) -> Atom {
        self.negations += 1;
        Atom::var(format!("#N{}", self.negations))
    }
}

/// Rewrites an NNF formula into a literal standing for it, appending the CNF clauses of
/// `gate <-> sub_formula` for every gate introduced (`spec.md` §4.1 step 3). The caller is
/// responsible for asserting the returned literal as a unit clause.
pub fn tseitin_transform(nnf_root: &Atom, tracker: &mut DummyVarsTracker, clauses: &mut Vec<Vec<Atom>>) -> Atom {
    match nnf_root {
        Atom::And(l, r) => {
            let gl = tseitin_transform(l, tracker, clauses);
            let gr = tseitin_transform(r, tracker, clauses);
            let g = tracker.fresh_gate();
            clauses.push(vec![g.negate(), gl.clone()]);
            clauses.push(vec![g.negate(), gr.clone()]);
            clauses.push(vec![g.clone(), gl.negate(), gr.negate()]);
            g
        }
        Atom::Or(l, r) => {
            let gl = tseitin_transform(l, tracker, clauses);
            let gr = tseitin_transform(r, tracker, clauses);
            let g = tracker.fresh_gate();
            clauses.push(vec![g.negate(), gl.clone(), gr.clone()]);
            clauses.push(vec![g.clone(), gl.negate()]);
            clauses.push(vec![g.clone(), gr.negate()]);
            g
        }
        // Imply/Equiv should already be gone after `to_basic`; tolerate them by rewriting first.
        Atom::Imply(..) | Atom::Equiv(..) => tseitin_transform(&nnf_root.to_basic(), tracker, clauses),
        literal => literal.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_needs_no_gate() {
        let mut tracker = DummyVarsTracker::new();
        let mut clauses = Vec::new();
        let lit = tseitin_transform(&Atom::var("p"), &mut tracker, &mut clauses);
        assert_eq!(lit, Atom::var("p"));
        assert!(clauses.is_empty());
    }

    #[test]
    fn conjunction_gets_three_clauses() {
        let mut tracker = DummyVarsTracker::new();
        let mut clauses = Vec::new();
        let formula = Atom::and(Atom::var("p"), Atom::var("q"));
        let gate = tseitin_transform(&formula, &mut tracker, &mut clauses);
        assert_eq!(gate, Atom::var("#G1"));
        assert_eq!(clauses.len(), 3);
    }
}
