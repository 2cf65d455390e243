//! First-UIP conflict analysis.

use std::collections::HashSet;

use log::{info, trace};

use super::SatCore;
use crate::db::implication_graph::Antecedent;
use crate::misc::log::targets;
use crate::structures::literal::IntLit;

/// Implements `resolve_conflict` from `spec.md` §4.3: resolves the conflicting clause (or
/// `start_clause`, if a theory supplied one) against antecedents of its current-level literals,
/// most-recently-assigned first, until only one current-level literal remains (the first UIP).
///
/// Returns the learned clause and the second-highest decision level occurring in it (0 if the
/// clause has no other level, i.e. it is a unit clause implied at level 0).
///
/// Panics if called at decision level 0 (the caller must detect top-level UNSAT first) or if no
/// conflicting clause is available.
pub fn resolve_conflict(core: &mut SatCore, start_clause: Option<usize>) -> (Vec<IntLit>, u32) {
    assert!(core.level > 0, "resolve_conflict called at decision level 0");

    let clause_idx = start_clause
        .or_else(|| core.conflicting_clause())
        .expect("resolve_conflict requires a conflicting clause");
    info!(target: targets::ANALYSIS, "analyzing conflict at level {} from clause {clause_idx}", core.level);
    let mut current: Vec<IntLit> = core.clauses.clause(clause_idx).literals().to_vec();

    loop {
        let current_level_lits: Vec<IntLit> = current
            .iter()
            .copied()
            .filter(|&lit| core.graph.level_of(lit.var()) == core.level)
            .collect();
        if current_level_lits.len() <= 1 {
            break;
        }

        let order = core.graph.vars_at_level(core.level);
        let pivot_var = *order
            .iter()
            .rev()
            .find(|&&v| current_level_lits.iter().any(|lit| lit.var() == v))
            .expect("a current-level literal must have a node at the current level");
        let pivot_node = *core.graph.node(pivot_var).expect("pivot has a node");
        let antecedent_idx = match pivot_node.antecedent {
            Antecedent::Clause(idx) => idx,
            Antecedent::Decision => panic!("first-UIP pivot was a decision literal"),
        };
        let antecedent_lits = core.clauses.clause(antecedent_idx).literals().to_vec();
        current = resolve(&current, &antecedent_lits, pivot_node.literal);
    }

    let second_highest = current
        .iter()
        .map(|&lit| core.graph.level_of(lit.var()))
        .filter(|&lvl| lvl != core.level)
        .max()
        .unwrap_or(0);

    trace!(target: targets::ANALYSIS, "learned {current:?}, backjump to {second_highest}");
    (current, second_highest)
}

/// The resolvent of `a` and `b` around `pivot`: their union, minus `pivot` and `-pivot`.
fn resolve(a: &[IntLit], b: &[IntLit], pivot: IntLit) -> Vec<IntLit> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for &lit in a.iter().chain(b.iter()) {
        if lit == pivot || lit == -pivot {
            continue;
        }
        if seen.insert(lit) {
            out.push(lit);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::implication_graph::Antecedent;

    #[test]
    fn resolves_to_a_single_uip() {
        let mut core = SatCore::new();
        // (¬a ∨ b), (¬a ∨ c), (¬b ∨ ¬c ∨ d)
        core.add_clause([IntLit(-1), IntLit(2)]);
        core.add_clause([IntLit(-1), IntLit(3)]);
        let conflict_clause = core.add_clause([IntLit(-2), IntLit(-3)]).unwrap();

        core.decide_literal(IntLit(1));
        core.assign_literal(IntLit(2), Antecedent::Clause(0));
        core.assign_literal(IntLit(3), Antecedent::Clause(1));
        core.graph.add_conflict(core.level, conflict_clause);

        let (learned, second_highest) = resolve_conflict(&mut core, None);
        assert_eq!(second_highest, 0);
        assert_eq!(learned, vec![IntLit(-1)]);
    }
}
