/*!
Clauses and their evaluation against a partial assignment.

Mirrors `spec.md` §4.2: a clause is a set of literals together with a stable index and up to two
watched literals. Evaluation distinguishes satisfied, conflicting, and undecided clauses; watch
suggestion returns up to two currently-unassigned literals for use by BCP.
*/

use std::collections::HashSet;

use crate::structures::literal::IntLit;

/// The result of evaluating a clause against an assignment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseStatus {
    /// At least one literal of the clause is in the assignment.
    Sat,

    /// The negation of every literal of the clause is in the assignment.
    Conflict,

    /// Neither of the above: some literal is unassigned and none is satisfied.
    Undecided,
}

/// A clause: a set of literals, a stable index into the clause database, and up to two watched
/// literals.
#[derive(Clone, Debug)]
pub struct Clause {
    literals: Vec<IntLit>,
    index: usize,
    watch: [Option<IntLit>; 2],
}

impl Clause {
    /// Builds a clause from a set of literals, discarding the clause if it is trivially true
    /// (contains both `l` and `-l`).
    ///
    /// Returns `None` for a trivial clause, per the invariant in `spec.md` §3 that no stored
    /// clause contains both a literal and its negation.
    pub fn new(literals: impl IntoIterator<Item = IntLit>, index: usize) -> Option<Clause> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for l in literals {
            if seen.contains(&-l) {
                return None;
            }
            if seen.insert(l) {
                out.push(l);
            }
        }
        Some(Clause {
            literals: out,
            index,
            watch: [None, None],
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn literals(&self) -> &[IntLit] {
        &self.literals
    }

    pub fn watches(&self) -> [Option<IntLit>; 2] {
        self.watch
    }

    pub fn set_watches(&mut self, watch: [Option<IntLit>; 2]) {
        self.watch = watch;
    }

    /// SAT if any literal is assigned; CONFLICT if every literal's negation is assigned;
    /// otherwise UNDECIDED.
    pub fn evaluate(&self, assignment: &HashSet<IntLit>) -> ClauseStatus {
        let mut undecided = false;
        for &lit in &self.literals {
            if assignment.contains(&lit) {
                return ClauseStatus::Sat;
            } else if !assignment.contains(&-lit) {
                undecided = true;
            }
        }
        if undecided {
            ClauseStatus::Undecided
        } else {
            ClauseStatus::Conflict
        }
    }

    /// Up to two currently-unassigned literals, for use as new watches.
    pub fn suggest_watch_literals(&self, assignment: &HashSet<IntLit>) -> Vec<IntLit> {
        let mut suggested = Vec::with_capacity(2);
        for &lit in &self.literals {
            if !assignment.contains(&lit) && !assignment.contains(&-lit) {
                suggested.push(lit);
                if suggested.len() == 2 {
                    break;
                }
            }
        }
        suggested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lits(v: &[i32]) -> Vec<IntLit> {
        v.iter().map(|&x| IntLit(x)).collect()
    }

    #[test]
    fn trivial_clause_is_discarded() {
        assert!(Clause::new(lits(&[1, -1, 2]), 0).is_none());
    }

    #[test]
    fn evaluate_sat_when_a_literal_is_assigned() {
        let clause = Clause::new(lits(&[1, 2, -3]), 0).unwrap();
        let assignment: HashSet<IntLit> = [IntLit(2)].into_iter().collect();
        assert_eq!(clause.evaluate(&assignment), ClauseStatus::Sat);
    }

    #[test]
    fn evaluate_conflict_when_all_negated() {
        let clause = Clause::new(lits(&[1, 2]), 0).unwrap();
        let assignment: HashSet<IntLit> = [IntLit(-1), IntLit(-2)].into_iter().collect();
        assert_eq!(clause.evaluate(&assignment), ClauseStatus::Conflict);
    }

    #[test]
    fn evaluate_undecided_otherwise() {
        let clause = Clause::new(lits(&[1, 2]), 0).unwrap();
        let assignment: HashSet<IntLit> = [IntLit(-1)].into_iter().collect();
        assert_eq!(clause.evaluate(&assignment), ClauseStatus::Undecided);
    }

    #[test]
    fn suggest_watch_literals_caps_at_two() {
        let clause = Clause::new(lits(&[1, 2, 3, 4]), 0).unwrap();
        let assignment = HashSet::new();
        assert_eq!(clause.suggest_watch_literals(&assignment).len(), 2);
    }
}
