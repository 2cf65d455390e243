/*!
The implication graph: for each assigned variable, the decision level at which it was assigned
and the antecedent clause that forced it (or none, for a decision).

Mirrors `spec.md` §3's `ImplicationNode`/`ImplicationGraph`. Lookup is by variable; the sign of
the literal actually assigned is recovered from the node.
*/

use std::collections::HashMap;

use crate::structures::literal::IntLit;

/// A clause index, or a decision (no antecedent).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Antecedent {
    /// The literal was chosen by `decide`.
    Decision,

    /// The literal was forced by unit propagation from the named clause.
    Clause(usize),
}

/// A single node of the implication graph.
#[derive(Clone, Copy, Debug)]
pub struct ImplicationNode {
    pub literal: IntLit,
    pub level: u32,
    pub antecedent: Antecedent,
}

/// The placeholder antecedent used while a conflicting clause has not yet been attributed to a
/// variable (`spec.md` §3's reserved `CONFLICT_ID`). Kept as a distinct sentinel variable id
/// rather than folded into `Antecedent` so the resolution starting point can be looked up the
/// same way as any other node.
pub const CONFLICT_VAR: u32 = 0;

#[derive(Default)]
pub struct ImplicationGraph {
    by_var: HashMap<u32, ImplicationNode>,
    by_level: HashMap<u32, Vec<u32>>,
}

impl ImplicationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node for `literal`, assigned at `level` because of `antecedent`.
    pub fn add_node(&mut self, literal: IntLit, level: u32, antecedent: Antecedent) {
        let var = literal.var();
        self.by_var.insert(var, ImplicationNode { literal, level, antecedent });
        self.by_level.entry(level).or_default().push(var);
    }

    /// Marks that the clause at `clause_idx` is the (not yet resolved) conflicting clause found
    /// at `level`.
    pub fn add_conflict(&mut self, level: u32, clause_idx: usize) {
        self.by_var.insert(
            CONFLICT_VAR,
            ImplicationNode {
                literal: IntLit(0),
                level,
                antecedent: Antecedent::Clause(clause_idx),
            },
        );
    }

    pub fn node(&self, var: u32) -> Option<&ImplicationNode> {
        self.by_var.get(&var)
    }

    pub fn level_of(&self, var: u32) -> u32 {
        self.by_var
            .get(&var)
            .map(|n| n.level)
            .unwrap_or_else(|| panic!("variable {var} has no implication-graph node"))
    }

    /// Variables assigned at `level`, in the order they were assigned.
    pub fn vars_at_level(&self, level: u32) -> &[u32] {
        self.by_level.get(&level).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Drops every node (and level bookkeeping) above `target_level`.
    pub fn backjump(&mut self, target_level: u32) {
        self.by_var.retain(|_, node| node.level <= target_level);
        self.by_level.retain(|&level, _| level <= target_level);
    }
}
