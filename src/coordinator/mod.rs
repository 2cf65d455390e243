/*!
The DPLL(T) coordinator: the lazy-combination loop tying [`crate::sat::SatCore`] to a
[`crate::theory::Theory`] and translating the result back to atom form.

Implements the main loop of `spec.md` §4.4. `Solver::solve` only accepts the `abstract = true`
path (a surface atom tree run through CNF pre-processing) — the spec's alternate "pre-abstracted
clause list" entry point has no exercised use in this crate's scenarios and is left for a future
embedding that needs incremental clause injection.
*/

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, info, warn};

use crate::misc::log::targets;

use crate::config::{Config, TheoryKind};
use crate::db::implication_graph::Antecedent;
use crate::preprocessing::to_cnf_clauses;
use crate::reports::Report;
use crate::sat::{self, SatCore, StepResult};
use crate::structures::literal::IntLit;
use crate::theory::prop::Prop;
use crate::theory::tq::TqTheory;
use crate::theory::uf::UfTheory;
use crate::theory::{Theory, TheoryCheck};
use crate::types::atom::Atom;
use crate::types::atom_map::AtomMap;
use crate::types::err::ErrorKind;

pub struct Solver {
    config: Config,
}

enum ConflictOutcome {
    Unsat,
    Continue,
}

impl Solver {
    pub fn new(config: Config) -> Self {
        Solver { config }
    }

    pub fn with_theory(theory: TheoryKind) -> Self {
        Solver::new(Config::new(theory))
    }

    /// Decides satisfiability of `formula`, returning an atom-level model on `Satisfiable`.
    pub fn solve(&mut self, formula: &Atom) -> Result<Report, ErrorKind> {
        let deadline = self.config.time_limit.map(|limit| Instant::now() + limit);

        let (clauses, map) = to_cnf_clauses(formula)?;
        info!(target: targets::COORDINATOR, "abstracted formula into {} clauses", clauses.len());

        let mut theory = self.build_theory();
        theory.preprocess(&map)?;

        let mut core = SatCore::new();
        let mut trail: Vec<(u32, IntLit)> = Vec::new();

        for literals in clauses {
            let Some(idx) = core.add_clause(literals) else { continue };
            if let Some(outcome) = self.deduce_and_assign(&mut core, theory.as_mut(), &map, &mut trail, idx) {
                if outcome {
                    return Ok(Report::Unsatisfiable);
                }
            }
        }

        if let TheoryCheck::Unsat(_) = theory.check(&map) {
            debug!(target: targets::COORDINATOR, "initial theory check failed");
            return Ok(Report::Unsatisfiable);
        }

        loop {
            if core.clause_db().unsat_clauses().is_empty() {
                break;
            }

            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    warn!(target: targets::COORDINATOR, "time limit exceeded, reporting unknown");
                    return Ok(Report::Unknown);
                }
            }

            let mut conflicted = false;
            while let Some((status, suggestion, clause_idx)) = sat::bcp_step(&mut core) {
                match status {
                    StepResult::Conflict => {
                        conflicted = true;
                        break;
                    }
                    StepResult::Undecided => {
                        if let Some(lit) = suggestion {
                            self.assign(&mut core, theory.as_mut(), &map, &mut trail, lit, Antecedent::Clause(clause_idx));
                        }
                    }
                    StepResult::Sat => {}
                }
            }

            if conflicted {
                match self.handle_conflict(&mut core, theory.as_mut(), &map, &mut trail, None) {
                    ConflictOutcome::Unsat => return Ok(Report::Unsatisfiable),
                    ConflictOutcome::Continue => continue,
                }
            }

            if let TheoryCheck::Unsat(theory_clause) = theory.check(&map) {
                match self.handle_conflict(&mut core, theory.as_mut(), &map, &mut trail, Some(theory_clause)) {
                    ConflictOutcome::Unsat => return Ok(Report::Unsatisfiable),
                    ConflictOutcome::Continue => continue,
                }
            }

            if let Some((lit, explanation)) = theory.next_propagation() {
                if !core.is_assigned(lit) {
                    // A theory deduction, not a guess: give it a real antecedent clause so
                    // conflict analysis never has to treat it as a first-UIP pivot.
                    let antecedent = match core.add_clause(explanation) {
                        Some(idx) => Antecedent::Clause(idx),
                        None => Antecedent::Decision,
                    };
                    self.assign(&mut core, theory.as_mut(), &map, &mut trail, lit, antecedent);
                }
                continue;
            }

            if core.clause_db().unsat_clauses().is_empty() {
                break;
            }
            let lit = sat::decide(&core);
            core.decide_literal(lit);
            trail.push((core.level(), lit));
            theory.process_assignment(lit, &map);
        }

        Ok(Report::Satisfiable(reconstruct(&core, &map)))
    }

    fn build_theory(&self) -> Box<dyn Theory> {
        match self.config.theory {
            TheoryKind::Prop => Box::new(Prop::new()),
            TheoryKind::Uf => Box::new(UfTheory::new()),
            TheoryKind::Tq => Box::new(TqTheory::new(self.config.support_negative_vars)),
        }
    }

    /// Asserts `lit` against both the SAT core and the theory, recording it on the trail.
    fn assign(
        &self,
        core: &mut SatCore,
        theory: &mut dyn Theory,
        map: &AtomMap,
        trail: &mut Vec<(u32, IntLit)>,
        lit: IntLit,
        antecedent: Antecedent,
    ) {
        if core.is_assigned(lit) {
            return;
        }
        core.assign_literal(lit, antecedent);
        trail.push((core.level(), lit));
        theory.process_assignment(lit, map);
    }

    /// Immediately deduces from a just-registered clause (`spec.md` §4.4 step 2). Returns
    /// `Some(true)` if this deduction is itself a level-0 conflict (overall UNSAT).
    fn deduce_and_assign(
        &self,
        core: &mut SatCore,
        theory: &mut dyn Theory,
        map: &AtomMap,
        trail: &mut Vec<(u32, IntLit)>,
        clause_idx: usize,
    ) -> Option<bool> {
        let (status, suggestion) = core.deduce(clause_idx);
        match status {
            StepResult::Conflict => Some(true),
            StepResult::Undecided => {
                if let Some(lit) = suggestion {
                    self.assign(core, theory, map, trail, lit, Antecedent::Clause(clause_idx));
                }
                None
            }
            StepResult::Sat => None,
        }
    }

    fn handle_conflict(
        &self,
        core: &mut SatCore,
        theory: &mut dyn Theory,
        map: &AtomMap,
        trail: &mut Vec<(u32, IntLit)>,
        theory_clause: Option<Vec<IntLit>>,
    ) -> ConflictOutcome {
        if core.level() == 0 {
            return ConflictOutcome::Unsat;
        }

        let start_clause = theory_clause.and_then(|literals| core.add_clause(literals));
        let (learned, backjump_level) = sat::resolve_conflict(core, start_clause);
        warn!(target: targets::COORDINATOR, "learned clause of size {} at level {}", learned.len(), core.level());

        core.backjump(backjump_level);
        trail.retain(|&(level, _)| level <= backjump_level);
        let surviving: Vec<IntLit> = trail.iter().map(|&(_, lit)| lit).collect();
        theory.conflict_recovery(&surviving, map);

        if let Some(idx) = core.add_clause(learned) {
            if let Some(true) = self.deduce_and_assign(core, theory, map, trail, idx) {
                return ConflictOutcome::Unsat;
            }
        }

        ConflictOutcome::Continue
    }
}

/// Converts the final integer assignment back to an atom-level model, implementing `spec.md`
/// §4.7's five reconstruction steps:
///
/// 1. Sign of the assigned `IntLit` becomes the atom's boolean value (below).
/// 2. TQ's `(Geq & Geq)`/`(Less | Less)` pair is never a theory-internal rewrite in this crate —
///    `parser::build_arithmetic_equality` desugars vector equality to that pair before CNF
///    pre-processing ever runs, so the pair are ordinary atoms the model reports directly, the
///    same way it reports the literals of any other `And`/`Or` the user wrote; there is nothing
///    theory-side left to fold back (see `DESIGN.md`).
/// 3. The negation-parity fold of step 4.1's step 5 happens at NNF time (`Atom::negate` dualises
///    `Equal`/`NEqual` and `Geq`/`Less` directly): `AtomMap` keys are always already in the
///    canonical, negation-free form, so folding back is exactly the sign check below.
/// 4. `#N…` dummies are substituted back to the negated function arguments they replaced via
///    `AtomMap::substitute_negation_dummies`.
/// 5. Dummy variables, and the helper equality clauses introduced solely to relate a function
///    argument to its negation dummy, are dropped (`AtomMap::is_dummy`).
fn reconstruct(core: &SatCore, map: &AtomMap) -> HashMap<Atom, bool> {
    let mut model = HashMap::new();
    for var in map.vars() {
        if map.is_dummy(var) {
            continue;
        }
        let Some(atom) = map.atom(var) else { continue };
        if let Atom::Var(name) = atom {
            if name.starts_with('#') {
                continue;
            }
        }
        let atom = map.substitute_negation_dummies(atom);
        let positive = IntLit(var as i32);
        if core.assignment().contains(&positive) {
            model.insert(atom, true);
        } else if core.assignment().contains(&-positive) {
            model.insert(atom, false);
        }
    }
    model
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propositional_sat_scenario() {
        // (p & q) | !(q | r)
        let p = Atom::var("p");
        let q = Atom::var("q");
        let r = Atom::var("r");
        let formula = Atom::or(
            Atom::and(p.clone(), q.clone()),
            Atom::not(Atom::or(q.clone(), r)),
        );
        let mut solver = Solver::with_theory(TheoryKind::Prop);
        match solver.solve(&formula).unwrap() {
            Report::Satisfiable(model) => {
                assert_eq!(model.get(&p), Some(&true));
                assert_eq!(model.get(&q), Some(&true));
            }
            other => panic!("expected SAT, got {other}"),
        }
    }

    #[test]
    fn uf_unsat_scenario() {
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
        let mut solver = Solver::with_theory(TheoryKind::Uf);
        match solver.solve(&formula).unwrap() {
            Report::Unsatisfiable => {}
            other => panic!("expected UNSAT, got {other}"),
        }
    }

    #[test]
    fn reconstruct_substitutes_negation_dummy_back_into_model() {
        // f(!p) = a, with p forced true by a second clause: the model should report the equality
        // in terms of `!p`, not the `#N…` dummy negation-lifting introduced internally.
        let p = Atom::var("p");
        let formula = Atom::and(
            Atom::equal(Atom::func("f", vec![Atom::not(p.clone())]), Atom::var("a")),
            p.clone(),
        );
        let mut solver = Solver::with_theory(TheoryKind::Uf);
        match solver.solve(&formula).unwrap() {
            Report::Satisfiable(model) => {
                assert_eq!(model.get(&p), Some(&true));
                let key = Atom::equal(Atom::func("f", vec![Atom::not(p)]), Atom::var("a"));
                assert!(model.contains_key(&key), "model should report the equality via !p, not a dummy");
            }
            other => panic!("expected SAT, got {other}"),
        }
    }

    #[test]
    fn tq_strict_contradiction_is_unsat() {
        // [1,1] >= 1 & [1,1] < -1
        let formula = Atom::and(Atom::geq(vec![1, 1], 1), Atom::less(vec![1, 1], -1));
        let mut solver = Solver::with_theory(TheoryKind::Tq);
        match solver.solve(&formula).unwrap() {
            Report::Unsatisfiable => {}
            other => panic!("expected UNSAT, got {other}"),
        }
    }

    #[test]
    fn elapsed_time_limit_reports_unknown() {
        // Neither clause is forced by unit propagation, so the main loop runs at least once and
        // observes the already-elapsed deadline before making a decision.
        let formula = Atom::or(Atom::var("p"), Atom::var("q"));
        let mut config = Config::new(TheoryKind::Prop);
        config.time_limit = Some(std::time::Duration::ZERO);
        let mut solver = Solver::new(config);
        assert!(matches!(solver.solve(&formula).unwrap(), Report::Unknown));
    }
}
