/*!
The propositional core: a CDCL engine operating over `IntLit`s, oblivious to the theory atoms
those literals abstract.

State and operations follow `spec.md` §4.3 (`SATCore`): a clause database, an implication graph,
the live assignment, the current decision level, and two BCP work queues (`pending_literals`,
pending clauses re-derived from them on demand rather than stored redundantly — see
[`bcp_step`](SatCore::bcp_step)).
*/

mod analysis;
mod bcp;
mod decision;

use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::db::implication_graph::{Antecedent, CONFLICT_VAR};
use crate::db::{ClauseDb, ImplicationGraph};
use crate::misc::log::targets;
use crate::structures::clause::ClauseStatus;
use crate::structures::literal::IntLit;

/// The result of a single `deduce` or `bcp_step` call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepResult {
    Sat,
    Undecided,
    Conflict,
}

pub struct SatCore {
    clauses: ClauseDb,
    graph: ImplicationGraph,
    assignment: HashSet<IntLit>,
    level: u32,
    pending_literals: VecDeque<IntLit>,
    pending_clauses: VecDeque<usize>,
}

impl SatCore {
    pub fn new() -> Self {
        SatCore {
            clauses: ClauseDb::new(),
            graph: ImplicationGraph::new(),
            assignment: HashSet::new(),
            level: 0,
            pending_literals: VecDeque::new(),
            pending_clauses: VecDeque::new(),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn assignment(&self) -> &HashSet<IntLit> {
        &self.assignment
    }

    pub fn clause_db(&self) -> &ClauseDb {
        &self.clauses
    }

    pub fn is_assigned(&self, lit: IntLit) -> bool {
        self.assignment.contains(&lit) || self.assignment.contains(&-lit)
    }

    /// Appends a clause built from `literals`, evaluated against the live assignment. Returns
    /// the new clause's stable index, or `None` if the clause was discarded as trivially true.
    pub fn add_clause(&mut self, literals: impl IntoIterator<Item = IntLit>) -> Option<usize> {
        self.clauses.add_clause(literals, &self.assignment)
    }

    /// Starts a new decision level by assigning `lit` as a decision.
    pub fn decide_literal(&mut self, lit: IntLit) {
        self.level += 1;
        self.assign_literal(lit, Antecedent::Decision);
    }

    /// Inserts `ℓ` into the assignment at the current level, records it in the implication
    /// graph, clears every clause it satisfies from `unsat_clauses`, and queues it for BCP.
    pub fn assign_literal(&mut self, lit: IntLit, antecedent: Antecedent) {
        self.assignment.insert(lit);
        self.graph.add_node(lit, self.level, antecedent);
        for &idx in self.clauses.containing(lit).to_vec().iter() {
            self.clauses.mark_sat(idx);
        }
        self.pending_literals.push_back(lit);
    }

    /// Removes `ℓ` from the assignment. `unsat_clauses` is left stale until the caller restores
    /// it (`backjump` does this once, in bulk, via `ClauseDb::refresh_unsat`, rather than
    /// re-evaluating clause-by-clause after every single literal).
    pub fn unassign_literal(&mut self, lit: IntLit) {
        self.assignment.remove(&lit);
    }

    /// Implements `deduce` from `spec.md` §4.3: if the clause is already satisfied, `Sat` with
    /// no suggestion. Otherwise asks the clause for up to two unassigned literals: zero means a
    /// conflict (the `CONFLICT_ID` node is attached with this clause as antecedent), one means a
    /// forced unit literal, two means the clause stays undecided with those installed as
    /// watches.
    pub fn deduce(&mut self, clause_idx: usize) -> (StepResult, Option<IntLit>) {
        if self.clauses.clause(clause_idx).evaluate(&self.assignment) == ClauseStatus::Sat {
            return (StepResult::Sat, None);
        }
        let suggested = self.clauses.clause(clause_idx).suggest_watch_literals(&self.assignment);
        match suggested.as_slice() {
            [] => {
                self.graph.add_conflict(self.level, clause_idx);
                (StepResult::Conflict, None)
            }
            [single] => (StepResult::Undecided, Some(*single)),
            [a, b, ..] => {
                let old = self.clauses.clause(clause_idx).watches();
                if let Some(o) = old[0] {
                    self.clauses.rewatch(clause_idx, o, *a);
                }
                if let Some(o) = old[1] {
                    self.clauses.rewatch(clause_idx, o, *b);
                }
                (StepResult::Undecided, None)
            }
        }
    }

    pub fn conflicting_clause(&self) -> Option<usize> {
        match self.graph.node(CONFLICT_VAR)?.antecedent {
            Antecedent::Clause(idx) => Some(idx),
            Antecedent::Decision => None,
        }
    }

    /// Unassigns every literal above `target_level`, lowers `d_level` to match, and prunes the
    /// implication graph accordingly. Also clears any queued-but-unprocessed BCP work, since it
    /// referred to an assignment that no longer holds.
    pub fn backjump(&mut self, target_level: u32) {
        debug!(target: targets::BACKJUMP, "backjumping from level {} to {target_level}", self.level);
        while self.level > target_level {
            let vars: Vec<u32> = self.graph.vars_at_level(self.level).to_vec();
            for var in vars {
                if let Some(node) = self.graph.node(var) {
                    let lit = node.literal;
                    self.unassign_literal(lit);
                }
            }
            self.level -= 1;
        }
        self.graph.backjump(target_level);
        self.clauses.refresh_unsat(&self.assignment);
        self.pending_literals.clear();
        self.pending_clauses.clear();
    }
}

impl Default for SatCore {
    fn default() -> Self {
        Self::new()
    }
}

pub use analysis::resolve_conflict;
pub use bcp::bcp_step;
pub use decision::decide;
