/*!
Pluggable theory solvers consulted by the DPLL(T) coordinator.

A `Theory` only ever sees propositional literals through the `AtomMap` boundary: it interprets
each assigned `IntLit` as the atom it abstracts, maintains whatever incremental state it needs,
and reports either satisfiability, a propagated literal, or a learned conflict clause.
*/

pub mod prop;
pub mod tq;
pub mod uf;

use crate::structures::literal::IntLit;
use crate::types::atom_map::AtomMap;
use crate::types::err::ErrorKind;

/// The outcome of a theory consistency check.
pub enum TheoryCheck {
    Sat,
    /// The theory is inconsistent; the clause is the negation of the (ideally minimal) suspect
    /// set of assigned literals responsible.
    Unsat(Vec<IntLit>),
}

pub trait Theory {
    /// Validates that every atom the theory will be asked about fits its term grammar,
    /// classifying violations per `spec.md` §4.5/§4.6.
    fn preprocess(&mut self, map: &AtomMap) -> Result<(), ErrorKind>;

    /// Records that `lit` has just been assigned.
    fn process_assignment(&mut self, lit: IntLit, map: &AtomMap);

    /// Checks consistency of everything asserted so far.
    fn check(&mut self, map: &AtomMap) -> TheoryCheck;

    /// Returns one not-yet-assigned literal the theory can deduce, if any, together with a sound
    /// explanation clause for it: `(¬l1 ∨ … ∨ ¬ln ∨ lit)` built from whatever already-assigned
    /// literals justify the deduction. The coordinator installs the clause in the SAT core so the
    /// propagated literal gets a real `Antecedent::Clause`, not `Antecedent::Decision` — a
    /// propagation that looks like a decision to conflict analysis can make `resolve_conflict`
    /// pick it as a first-UIP pivot and panic (its loop only ever expects decisions to terminate
    /// the search for one, never to stand in for a missing antecedent).
    fn next_propagation(&mut self) -> Option<(IntLit, Vec<IntLit>)>;

    /// Restores the theory to the state it had after asserting exactly `assignment` (in order),
    /// per a backjump.
    fn conflict_recovery(&mut self, assignment: &[IntLit], map: &AtomMap);
}
