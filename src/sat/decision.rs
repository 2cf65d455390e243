//! DLIS decision heuristic.

use std::cmp::Reverse;
use std::collections::HashMap;

use log::debug;

use super::SatCore;
use crate::misc::log::targets;
use crate::structures::literal::IntLit;

/// Picks the next decision literal: the unassigned literal appearing in the most currently
/// unsatisfied clauses (`spec.md` §4.3's `decide`). Ties break on the smallest literal value, so
/// the choice is deterministic.
///
/// Panics if every variable is already assigned; the caller is responsible for checking this
/// first.
pub fn decide(core: &SatCore) -> IntLit {
    let mut counts: HashMap<IntLit, usize> = HashMap::new();
    for &idx in core.clauses.unsat_clauses() {
        for &lit in core.clauses.clause(idx).literals() {
            if !core.is_assigned(lit) {
                *counts.entry(lit).or_insert(0) += 1;
            }
        }
    }
    let chosen = counts
        .into_iter()
        .max_by_key(|&(lit, count)| (count, Reverse(lit.0)))
        .map(|(lit, _)| lit)
        .unwrap_or_else(|| panic!("decide called with no unassigned literals remaining"));
    debug!(target: targets::DECISION, "deciding {chosen} at level {}", core.level());
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_most_frequent_unassigned_literal() {
        let mut core = SatCore::new();
        core.add_clause([IntLit(1), IntLit(2)]);
        core.add_clause([IntLit(1), IntLit(3)]);
        core.add_clause([IntLit(-4)]);
        assert_eq!(decide(&core), IntLit(1));
    }
}
