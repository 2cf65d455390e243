/*!
The bijection between positive `IntLit`s and atoms, built by CNF pre-processing and consulted
by the coordinator and the theories.

Mirrors `spec.md` §3's `AtomMap`: every literal atom gets exactly one variable, shared between an
atom and its negated dual (`Equal`/`NEqual`, `Geq`/`Less`, `Var`/`Not(Var)`). Dummy variables
introduced by Tseitin (`#G…`) or negation-lifting (`#N…`) are flagged so the final assignment can
drop them.
*/

use std::collections::HashMap;

use crate::types::Atom;

#[derive(Default)]
pub struct AtomMap {
    by_key: HashMap<Atom, u32>,
    by_var: HashMap<u32, Atom>,
    dummy: Vec<u32>,
    next_var: u32,
    /// `#N…` dummy atom -> the negated function argument it stands for (`spec.md` §4.1 step 4
    /// and §4.7 step 4), so a final model can be reported in terms of the original negated
    /// argument rather than the dummy that replaced it during CNF pre-processing.
    neg_origin: HashMap<Atom, Atom>,
}

impl AtomMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `literal`'s canonical key, returning the `IntLit`-encoded variable together with
    /// its sign relative to the stored key (matching `spec.md` §4.1 step 6).
    pub fn intern(&mut self, literal: &Atom) -> (u32, bool) {
        let (key, sign) = literal.canonical_key();
        if let Some(&var) = self.by_key.get(&key) {
            return (var, sign);
        }
        self.next_var += 1;
        let var = self.next_var;
        self.by_var.insert(var, key.clone());
        self.by_key.insert(key, var);
        (var, sign)
    }

    pub fn mark_dummy(&mut self, var: u32) {
        self.dummy.push(var);
    }

    pub fn is_dummy(&self, var: u32) -> bool {
        self.dummy.contains(&var)
    }

    pub fn atom(&self, var: u32) -> Option<&Atom> {
        self.by_var.get(&var)
    }

    pub fn vars(&self) -> impl Iterator<Item = u32> + '_ {
        self.by_var.keys().copied()
    }

    /// Records that `dummy` (a fresh `#N…` atom) stands for `Not(original)` wherever it appears
    /// as a function argument, so [`Self::substitute_negation_dummies`] can fold it back.
    pub fn record_negation_dummy(&mut self, dummy: Atom, original: Atom) {
        self.neg_origin.insert(dummy, Atom::not(original));
    }

    /// Rewrites `atom`, replacing any `#N…` dummy it contains with the negated function argument
    /// it stood for (`spec.md` §4.7 step 4). Leaves everything else unchanged.
    pub fn substitute_negation_dummies(&self, atom: &Atom) -> Atom {
        if let Some(original) = self.neg_origin.get(atom) {
            return original.clone();
        }
        match atom {
            Atom::Func(name, args) => {
                Atom::func(name.clone(), args.iter().map(|a| self.substitute_negation_dummies(a)).collect())
            }
            Atom::Equal(l, r) => {
                Atom::equal(self.substitute_negation_dummies(l), self.substitute_negation_dummies(r))
            }
            Atom::NEqual(l, r) => {
                Atom::nequal(self.substitute_negation_dummies(l), self.substitute_negation_dummies(r))
            }
            Atom::Not(inner) => Atom::not(self.substitute_negation_dummies(inner)),
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_and_nequal_share_a_variable() {
        let mut map = AtomMap::new();
        let a = Atom::var("a");
        let b = Atom::var("b");
        let (v1, s1) = map.intern(&Atom::equal(a.clone(), b.clone()));
        let (v2, s2) = map.intern(&Atom::nequal(a, b));
        assert_eq!(v1, v2);
        assert!(s1 && !s2);
    }

    #[test]
    fn var_and_negated_var_share_a_variable() {
        let mut map = AtomMap::new();
        let (v1, s1) = map.intern(&Atom::var("p"));
        let (v2, s2) = map.intern(&Atom::not(Atom::var("p")));
        assert_eq!(v1, v2);
        assert!(s1 && !s2);
    }
}
