/*!
The theory of equality with uninterpreted functions, decided by congruence closure.

Snapshots are taken by cloning the whole theory state rather than journaling union-find
operations; `spec.md` §9 notes both are observably equivalent, and a clone is simpler to get
right for a term universe of this size.
*/

mod congruence_graph;

use std::collections::{HashSet, VecDeque};

use log::{debug, trace};

use self::congruence_graph::CongruenceGraph;
use super::{Theory, TheoryCheck};
use crate::misc::log::targets;
use crate::structures::literal::IntLit;
use crate::types::atom::Atom;
use crate::types::atom_map::AtomMap;
use crate::types::err::{ErrorKind, PreprocessingError};

/// The sentinel standing in for "true" when a bare propositional literal is asserted through the
/// UF theory (`spec.md` §4.5): `p` becomes `p = $True`, `!p` becomes `p != $True`.
fn true_sentinel() -> Atom {
    Atom::var("$True")
}

#[derive(Clone)]
struct Snapshot {
    graph: CongruenceGraph,
    active_neqs: Vec<(Atom, Atom)>,
    propagation_queue: VecDeque<IntLit>,
    propagated: HashSet<IntLit>,
}

#[derive(Default)]
pub struct UfTheory {
    graph: CongruenceGraph,
    /// The graph as left by `preprocess`, before any assignment: every term in the formula is
    /// registered, with none of them unioned yet. Recovery back to level 0 restores this rather
    /// than an empty graph, so the term universe stays fully registered across backjumps.
    base_graph: CongruenceGraph,
    active_neqs: Vec<(Atom, Atom)>,
    assigned: Vec<IntLit>,
    propagation_queue: VecDeque<IntLit>,
    propagated: HashSet<IntLit>,
    snapshots: Vec<Snapshot>,
}

impl UfTheory {
    pub fn new() -> Self {
        Self::default()
    }

    fn term_for(&self, lit: IntLit, map: &AtomMap) -> (Atom, Atom, bool) {
        let atom = map.atom(lit.var()).expect("literal has no atom");
        let sign = lit.polarity();
        match atom {
            Atom::Equal(l, r) => ((**l).clone(), (**r).clone(), sign),
            Atom::NEqual(l, r) => ((**l).clone(), (**r).clone(), !sign),
            other => (other.clone(), true_sentinel(), sign),
        }
    }

    fn assert_literal(&mut self, lit: IntLit, map: &AtomMap) {
        let (t, s, equal) = self.term_for(lit, map);
        self.graph.ensure(&t);
        self.graph.ensure(&s);
        if equal {
            self.apply_equality(&t, &s);
        } else {
            self.active_neqs.push((t, s));
        }
        self.assigned.push(lit);
    }

    /// The classic upward-congruence step: union the classes of `t` and `s`, then for every pair
    /// of syntactic super-terms they had before the merge, recurse if they are `Func` nodes with
    /// matching name/arity whose arguments now fall into the same classes.
    fn apply_equality(&mut self, t: &Atom, s: &Atom) {
        let a = self.graph.find(t);
        let b = self.graph.find(s);
        if a == b {
            return;
        }
        let (parents_a, parents_b) = self.graph.union(&a, &b);

        let mut to_merge = Vec::new();
        for p in &parents_a {
            for q in &parents_b {
                if p == q {
                    continue;
                }
                if let (Atom::Func(pn, pargs), Atom::Func(qn, qargs)) = (p, q) {
                    if pn == qn && pargs.len() == qargs.len() {
                        to_merge.push((p.clone(), q.clone()));
                    }
                }
            }
        }
        for (p, q) in to_merge {
            let same_class = match (&p, &q) {
                (Atom::Func(_, pargs), Atom::Func(_, qargs)) => pargs
                    .iter()
                    .zip(qargs.iter())
                    .all(|(x, y)| self.graph.find(x) == self.graph.find(y)),
                _ => false,
            };
            if same_class {
                self.apply_equality(&p, &q);
            }
        }
    }

    fn has_conflict(&mut self) -> bool {
        let neqs = self.active_neqs.clone();
        neqs.iter().any(|(t, s)| self.graph.find(t) == self.graph.find(s))
    }

    /// Iterated removal from the trail: walk backwards, re-asserting the accumulated suspect set
    /// plus one more literal at a time, keeping a literal only if it is still needed to
    /// reproduce the conflict (`spec.md` §4.5's conflict-core extraction).
    fn extract_conflict_core(&self, map: &AtomMap) -> Vec<IntLit> {
        let trail = self.assigned.clone();
        let mut suspects: Vec<IntLit> = Vec::new();
        for lit in trail.into_iter().rev() {
            let mut candidate = suspects.clone();
            candidate.push(lit);
            if Self::replay_conflicts(&candidate, map) {
                suspects = candidate;
            }
        }
        suspects.into_iter().map(|l| -l).collect()
    }

    fn replay_conflicts(lits: &[IntLit], map: &AtomMap) -> bool {
        let mut scratch = UfTheory::new();
        for &lit in lits {
            scratch.assert_literal(lit, map);
        }
        scratch.has_conflict()
    }

    fn refresh_propagation_queue(&mut self, map: &AtomMap) {
        let neqs = self.active_neqs.clone();
        for var in map.vars() {
            let lit = IntLit(var as i32);
            if self.propagated.contains(&lit) || self.propagated.contains(&-lit) {
                continue;
            }
            if self.assigned.iter().any(|l| l.var() == var) {
                continue;
            }
            let Some(Atom::Equal(l, r)) = map.atom(var) else { continue };
            let (l, r) = (l.clone(), r.clone());
            if !self.graph.contains(&l) || !self.graph.contains(&r) {
                continue;
            }
            let a = self.graph.find(&l);
            let b = self.graph.find(&r);
            if a == b {
                self.enqueue(lit);
            } else {
                let connected = neqs.iter().any(|(x, y)| {
                    if !self.graph.contains(x) || !self.graph.contains(y) {
                        return false;
                    }
                    let fx = self.graph.find(x);
                    let fy = self.graph.find(y);
                    (fx == a && fy == b) || (fx == b && fy == a)
                });
                if connected {
                    self.enqueue(-lit);
                }
            }
        }
    }

    fn enqueue(&mut self, lit: IntLit) {
        if self.propagated.insert(lit) {
            self.propagation_queue.push_back(lit);
        }
    }

    fn snapshot(&mut self) {
        self.snapshots.push(Snapshot {
            graph: self.graph.clone(),
            active_neqs: self.active_neqs.clone(),
            propagation_queue: self.propagation_queue.clone(),
            propagated: self.propagated.clone(),
        });
    }
}

impl Theory for UfTheory {
    /// Rejects equality/disequality arguments that are themselves formulas, and function
    /// arguments that are `Equal`/`NEqual` (`spec.md` §4.5's `preprocess` contract).
    ///
    /// Also registers every term appearing in the formula with the congruence graph up front.
    /// Upward congruence only fires for parent terms already known to the graph at merge time
    /// (`spec.md` §4.5's `apply_equality`), so a term that first enters the graph lazily, when its
    /// own literal happens to be asserted, can miss a merge opportunity that occurred earlier on
    /// the trail. Registering the whole term universe before any assignment makes the result
    /// independent of assignment order.
    fn preprocess(&mut self, map: &AtomMap) -> Result<(), ErrorKind> {
        fn validate_term(atom: &Atom) -> Result<(), ErrorKind> {
            match atom {
                Atom::Var(_) => Ok(()),
                Atom::Func(_, args) => args.iter().try_for_each(validate_term),
                _ => Err(ErrorKind::Preprocessing(PreprocessingError::FunctionArgumentNotLiteral)),
            }
        }
        for var in map.vars() {
            if let Some(atom) = map.atom(var) {
                match atom {
                    Atom::Equal(l, r) | Atom::NEqual(l, r) => {
                        validate_term(l).map_err(|_| {
                            ErrorKind::Preprocessing(PreprocessingError::EqualityArgumentNotLiteral)
                        })?;
                        validate_term(r).map_err(|_| {
                            ErrorKind::Preprocessing(PreprocessingError::EqualityArgumentNotLiteral)
                        })?;
                        self.graph.ensure(l);
                        self.graph.ensure(r);
                    }
                    Atom::Func(_, args) => args.iter().try_for_each(validate_term)?,
                    _ => {}
                }
            }
        }
        self.base_graph = self.graph.clone();
        Ok(())
    }

    fn process_assignment(&mut self, lit: IntLit, map: &AtomMap) {
        trace!(target: targets::UF, "asserting {lit}");
        self.assert_literal(lit, map);
        self.refresh_propagation_queue(map);
        self.snapshot();
    }

    fn check(&mut self, map: &AtomMap) -> TheoryCheck {
        if self.has_conflict() {
            debug!(target: targets::UF, "congruence conflict detected");
            TheoryCheck::Unsat(self.extract_conflict_core(map))
        } else {
            TheoryCheck::Sat
        }
    }

    /// The explanation is every literal asserted so far, negated: weaker than the minimal
    /// congruence justification `extract_conflict_core` computes for a genuine conflict, but
    /// sound, since the queued literal was only enqueued because it held given the whole of
    /// `self.assigned` (`refresh_propagation_queue`).
    fn next_propagation(&mut self) -> Option<(IntLit, Vec<IntLit>)> {
        let lit = self.propagation_queue.pop_front()?;
        let mut explanation: Vec<IntLit> = self.assigned.iter().map(|&l| -l).collect();
        explanation.push(lit);
        Some((lit, explanation))
    }

    fn conflict_recovery(&mut self, assignment: &[IntLit], _map: &AtomMap) {
        let depth = assignment.len();
        self.snapshots.truncate(depth);
        if let Some(snap) = self.snapshots.last() {
            self.graph = snap.graph.clone();
            self.active_neqs = snap.active_neqs.clone();
            self.propagation_queue = snap.propagation_queue.clone();
            self.propagated = snap.propagated.clone();
        } else {
            self.graph = self.base_graph.clone();
            self.active_neqs.clear();
            self.propagation_queue.clear();
            self.propagated.clear();
        }
        self.assigned = assignment.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::to_cnf_clauses;

    #[test]
    fn simple_congruence_conflict() {
        // (g(a) = c) & (((f(g(a)) != f(c)) | (g(a) = d)) & (c != d))
        let ga = Atom::func("g", vec![Atom::var("a")]);
        let fga = Atom::func("f", vec![ga.clone()]);
        let fc = Atom::func("f", vec![Atom::var("c")]);
        let formula = Atom::and(
            Atom::equal(ga.clone(), Atom::var("c")),
            Atom::and(
                Atom::or(Atom::nequal(fga, fc), Atom::equal(ga, Atom::var("d"))),
                Atom::nequal(Atom::var("c"), Atom::var("d")),
            ),
        );
        let (clauses, map) = to_cnf_clauses(&formula).unwrap();

        let mut theory = UfTheory::new();
        theory.preprocess(&map).unwrap();
        // Assign every non-dummy literal positively/negatively per the clause structure isn't
        // exercised here directly; this test only checks direct congruence-closure conflicts.
        let _ = clauses;

        let a = Atom::var("a");
        let c = Atom::var("c");
        let d = Atom::var("d");
        let ga_term = Atom::func("g", vec![a]);
        theory.graph.ensure(&ga_term);
        theory.graph.ensure(&c);
        theory.graph.ensure(&d);
        theory.apply_equality(&ga_term, &c);
        theory.active_neqs.push((c, d.clone()));
        theory.apply_equality(&ga_term, &d);
        assert!(theory.has_conflict());
    }
}
