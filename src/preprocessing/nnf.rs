//! Negation normal form: push `Not` inward until it only ever wraps a `Var` or `Func`.

use crate::types::Atom;

/// Rewrites `atom` so that every `Not` is immediately beneath a `Var` or `Func`, folding double
/// negation and dualising `Equal`/`NEqual` and `Geq`/`Less` along the way (`spec.md` §4.1 step
/// 2). Assumes `Imply`/`Equiv` have already been rewritten away (see [`Atom::to_basic`]), though
/// it tolerates them by rewriting on demand.
pub fn to_nnf(atom: &Atom) -> Atom {
    match atom {
        Atom::Not(inner) => match inner.as_ref() {
            // Already a literal: `Not` belongs here, not a redundant re-negation.
            Atom::Var(_) | Atom::Func(..) => atom.clone(),
            _ => to_nnf(&inner.negate()),
        },
        Atom::And(l, r) => Atom::and(to_nnf(l), to_nnf(r)),
        Atom::Or(l, r) => Atom::or(to_nnf(l), to_nnf(r)),
        Atom::Imply(..) | Atom::Equiv(..) => to_nnf(&atom.to_basic()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_negation_collapses() {
        let atom = Atom::not(Atom::not(Atom::var("p")));
        assert_eq!(to_nnf(&atom), Atom::var("p"));
    }

    #[test]
    fn de_morgan_pushes_through_and() {
        let atom = Atom::not(Atom::and(Atom::var("p"), Atom::var("q")));
        let nnf = to_nnf(&atom);
        assert_eq!(nnf, Atom::or(Atom::not(Atom::var("p")), Atom::not(Atom::var("q"))));
    }

    #[test]
    fn equality_negation_becomes_nequal() {
        let atom = Atom::not(Atom::equal(Atom::var("a"), Atom::var("b")));
        assert_eq!(to_nnf(&atom), Atom::nequal(Atom::var("a"), Atom::var("b")));
    }
}
