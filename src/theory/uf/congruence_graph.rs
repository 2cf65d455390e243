//! Union-find over terms with syntactic parent back-references, for upward congruence.

use std::collections::{HashMap, HashSet};

use crate::types::atom::Atom;

/// Nodes are unique sub-terms (variables and `Func` applications). `parent` is the union-find
/// structure; `parents_of` lists every term whose arguments syntactically include this one,
/// consulted for upward congruence after a merge (`spec.md` §3's `CongruenceGraph`).
#[derive(Clone, Default)]
pub struct CongruenceGraph {
    parent: HashMap<Atom, Atom>,
    parents_of: HashMap<Atom, HashSet<Atom>>,
}

impl CongruenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `term` (and, recursively, its arguments) as nodes if not already present.
    pub fn ensure(&mut self, term: &Atom) {
        if self.parent.contains_key(term) {
            return;
        }
        self.parent.insert(term.clone(), term.clone());
        self.parents_of.entry(term.clone()).or_default();
        if let Atom::Func(_, args) = term {
            for arg in args {
                self.ensure(arg);
                self.parents_of.entry(arg.clone()).or_default().insert(term.clone());
            }
        }
    }

    pub fn parents_of(&self, term: &Atom) -> HashSet<Atom> {
        self.parents_of.get(term).cloned().unwrap_or_default()
    }

    pub fn contains(&self, term: &Atom) -> bool {
        self.parent.contains_key(term)
    }

    /// Follows `parent` pointers to a fixed point, compressing the path as it goes.
    pub fn find(&mut self, term: &Atom) -> Atom {
        let next = match self.parent.get(term) {
            Some(p) => p.clone(),
            None => return term.clone(),
        };
        if &next == term {
            return term.clone();
        }
        let root = self.find(&next);
        self.parent.insert(term.clone(), root.clone());
        root
    }

    /// Unions the classes of `a` and `b` (already representatives), merging `b`'s class onto
    /// `a`'s parent set and pointing `b -> a`. Returns the parent sets each side had *before* the
    /// merge, for the caller to drive upward congruence.
    pub fn union(&mut self, a: &Atom, b: &Atom) -> (HashSet<Atom>, HashSet<Atom>) {
        let parents_a = self.parents_of(a);
        let parents_b = self.parents_of(b);
        self.parent.insert(b.clone(), a.clone());
        let merged: HashSet<Atom> = parents_a.union(&parents_b).cloned().collect();
        self.parents_of.insert(a.clone(), merged);
        self.parents_of.remove(b);
        (parents_a, parents_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_reflexive_before_union() {
        let mut g = CongruenceGraph::new();
        let a = Atom::var("a");
        g.ensure(&a);
        assert_eq!(g.find(&a), a);
    }

    #[test]
    fn union_merges_classes() {
        let mut g = CongruenceGraph::new();
        let a = Atom::var("a");
        let b = Atom::var("b");
        g.ensure(&a);
        g.ensure(&b);
        g.union(&a, &b);
        assert_eq!(g.find(&a), g.find(&b));
    }
}
