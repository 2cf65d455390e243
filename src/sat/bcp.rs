//! A single step of boolean constraint propagation.

use log::trace;

use super::{SatCore, StepResult};
use crate::misc::log::targets;
use crate::structures::literal::IntLit;

/// Advances BCP by one clause. Implements `spec.md` §4.3's `bcp_step`: if a clause is already
/// queued, deduce from it; otherwise pull the next pending literal, queue the clauses watching
/// its negation, and deduce from the first of those. Returns `None` once both queues are
/// exhausted.
pub fn bcp_step(core: &mut SatCore) -> Option<(StepResult, Option<IntLit>, usize)> {
    if core.pending_clauses.is_empty() {
        let lit = core.pending_literals.pop_front()?;
        trace!(target: targets::PROPAGATION, "queuing watchers of {lit}");
        for &idx in core.clauses.watchers(-lit) {
            core.pending_clauses.push_back(idx);
        }
    }
    let clause_idx = core.pending_clauses.pop_front()?;
    let (status, suggested) = core.deduce(clause_idx);
    trace!(target: targets::PROPAGATION, "deduced {status:?} from clause {clause_idx}, suggestion {suggested:?}");
    Some((status, suggested, clause_idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::implication_graph::Antecedent;

    #[test]
    fn unit_propagation_via_bcp() {
        let mut core = SatCore::new();
        core.add_clause([IntLit(1), IntLit(2)]);
        core.decide_literal(IntLit(-1));
        let (status, suggestion, _) = bcp_step(&mut core).expect("a pending clause");
        assert_eq!(status, StepResult::Undecided);
        assert_eq!(suggestion, Some(IntLit(2)));
        core.assign_literal(IntLit(2), Antecedent::Clause(0));
        assert!(core.assignment().contains(&IntLit(2)));
    }

    #[test]
    fn bcp_reports_conflict() {
        let mut core = SatCore::new();
        core.add_clause([IntLit(1)]);
        core.decide_literal(IntLit(-1));
        let (status, _, _) = bcp_step(&mut core).expect("a pending clause");
        assert_eq!(status, StepResult::Conflict);
    }

    #[test]
    fn empty_queues_yield_none() {
        let mut core = SatCore::new();
        assert!(bcp_step(&mut core).is_none());
    }
}
