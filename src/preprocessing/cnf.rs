/*!
The CNF pre-processor: `atom tree -> (clauses, AtomMap)`, implementing the seven-step contract of
`spec.md` §4.1.
*/

use std::collections::HashSet;

use log::trace;

use crate::misc::log::targets;
use crate::preprocessing::nnf::to_nnf;
use crate::preprocessing::tseitin::{tseitin_transform, DummyVarsTracker};
use crate::structures::literal::IntLit;
use crate::types::atom::Atom;
use crate::types::atom_map::AtomMap;
use crate::types::err::{ErrorKind, PreprocessingError};

/// Runs the full pipeline: basic-connective rewrite, NNF, Tseitin encoding, function-argument
/// negation-lifting, atom interning, and tautology removal.
pub fn to_cnf_clauses(formula: &Atom) -> Result<(Vec<Vec<IntLit>>, AtomMap), ErrorKind> {
    let basic = formula.to_basic();
    let nnf = to_nnf(&basic);

    let mut tracker = DummyVarsTracker::new();
    let mut clauses: Vec<Vec<Atom>> = Vec::new();
    let root = tseitin_transform(&nnf, &mut tracker, &mut clauses);
    clauses.push(vec![root]);

    let mut neg_origins: Vec<(Atom, Atom)> = Vec::new();
    let mut lifted: Vec<Vec<Atom>> = Vec::with_capacity(clauses.len());
    for clause in &clauses {
        let mut extra = Vec::new();
        let mut new_clause = Vec::with_capacity(clause.len());
        for lit in clause {
            new_clause.push(lift_literal(lit, &mut tracker, &mut extra, &mut neg_origins)?);
        }
        lifted.push(new_clause);
        lifted.append(&mut extra);
    }

    let mut map = AtomMap::new();
    for (dummy, original) in neg_origins {
        map.record_negation_dummy(dummy, original);
    }
    let mut int_clauses = Vec::with_capacity(lifted.len());
    for clause in &lifted {
        let mut int_clause = Vec::with_capacity(clause.len());
        for lit in clause {
            let (var, sign) = map.intern(lit);
            if is_dummy(lit) {
                map.mark_dummy(var);
            }
            int_clause.push(if sign { IntLit(var as i32) } else { IntLit(-(var as i32)) });
        }
        int_clauses.push(int_clause);
    }

    // Step 7: drop tautological clauses (containing both `l` and `-l`).
    let before = int_clauses.len();
    let int_clauses: Vec<Vec<IntLit>> = int_clauses
        .into_iter()
        .filter(|clause| {
            let set: HashSet<IntLit> = clause.iter().copied().collect();
            !clause.iter().any(|&l| set.contains(&-l))
        })
        .collect();
    trace!(target: targets::PREPROCESSING, "{} clauses after tautology removal (from {before})", int_clauses.len());

    Ok((int_clauses, map))
}

/// Whether a literal atom is purely internal bookkeeping that a final model should never mention:
/// a Tseitin/negation-lifting dummy itself, or an equality/disequality pulled in solely to relate
/// a function argument to the dummy standing in for its negation (`spec.md` §4.7 step 5, extended
/// to cover the helper clauses step 4's substitution makes redundant).
fn is_dummy(atom: &Atom) -> bool {
    match atom {
        Atom::Var(name) => name.starts_with('#'),
        Atom::Not(inner) => is_dummy(inner),
        Atom::Equal(l, r) | Atom::NEqual(l, r) => is_dummy(l) || is_dummy(r),
        _ => false,
    }
}

/// Lifts negations out of function arguments (`spec.md` §4.1 step 4) and validates that
/// equality/disequality sides and function arguments are themselves terms, not formulas.
fn lift_literal(
    atom: &Atom,
    tracker: &mut DummyVarsTracker,
    extra: &mut Vec<Vec<Atom>>,
    neg_origins: &mut Vec<(Atom, Atom)>,
) -> Result<Atom, ErrorKind> {
    match atom {
        Atom::Var(_) => Ok(atom.clone()),
        Atom::Not(inner) => Ok(Atom::not(lift_literal(inner, tracker, extra, neg_origins)?)),
        Atom::Func(name, args) => {
            let mut new_args = Vec::with_capacity(args.len());
            for arg in args {
                new_args.push(lift_arg(arg, tracker, extra, neg_origins)?);
            }
            Ok(Atom::func(name.clone(), new_args))
        }
        Atom::Equal(l, r) => {
            validate_term(l)?;
            validate_term(r)?;
            Ok(Atom::equal(lift_arg(l, tracker, extra, neg_origins)?, lift_arg(r, tracker, extra, neg_origins)?))
        }
        Atom::NEqual(l, r) => {
            validate_term(l)?;
            validate_term(r)?;
            Ok(Atom::nequal(lift_arg(l, tracker, extra, neg_origins)?, lift_arg(r, tracker, extra, neg_origins)?))
        }
        Atom::Geq(..) | Atom::Less(..) => Ok(atom.clone()),
        Atom::And(..) | Atom::Or(..) | Atom::Imply(..) | Atom::Equiv(..) => {
            unreachable!("tseitin encoding leaves only literal atoms in clauses")
        }
    }
}

fn lift_arg(
    arg: &Atom,
    tracker: &mut DummyVarsTracker,
    extra: &mut Vec<Vec<Atom>>,
    neg_origins: &mut Vec<(Atom, Atom)>,
) -> Result<Atom, ErrorKind> {
    match arg {
        Atom::Not(inner) => {
            validate_term(inner)?;
            let dummy = tracker.fresh_negation();
            extra.push(vec![Atom::nequal((**inner).clone(), dummy.clone())]);
            neg_origins.push((dummy.clone(), (**inner).clone()));
            Ok(dummy)
        }
        Atom::Func(name, args) => {
            let mut new_args = Vec::with_capacity(args.len());
            for a in args {
                new_args.push(lift_arg(a, tracker, extra, neg_origins)?);
            }
            Ok(Atom::func(name.clone(), new_args))
        }
        Atom::Var(_) => Ok(arg.clone()),
        _ => Err(ErrorKind::Preprocessing(PreprocessingError::FunctionArgumentNotLiteral)),
    }
}

/// A term suitable as an equality side or function argument: a variable or function
/// application, never a formula or another equality.
fn validate_term(atom: &Atom) -> Result<(), ErrorKind> {
    match atom {
        Atom::Var(_) => Ok(()),
        Atom::Func(_, args) => args.iter().try_for_each(validate_term),
        Atom::Not(inner) => validate_term(inner),
        _ => Err(ErrorKind::Preprocessing(PreprocessingError::EqualityArgumentNotLiteral)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propositional_and_becomes_unit_clauses() {
        let formula = Atom::and(Atom::var("p"), Atom::var("q"));
        let (clauses, _map) = to_cnf_clauses(&formula).unwrap();
        // p & q needs no gate: tseitin only gates compound sub-formulas, and the whole formula
        // here is the single top-level And, so it gets one gate plus the 3 defining clauses plus
        // the unit assertion.
        assert_eq!(clauses.len(), 4);
    }

    #[test]
    fn equal_and_nequal_intern_to_the_same_variable() {
        let formula = Atom::equal(Atom::var("a"), Atom::var("b"));
        let (clauses, map) = to_cnf_clauses(&formula).unwrap();
        assert_eq!(clauses.len(), 1);
        let lit = clauses[0][0];
        assert!(map.atom(lit.var()).is_some());
    }

    #[test]
    fn malformed_equality_side_is_rejected() {
        let formula = Atom::equal(
            Atom::equal(Atom::var("a"), Atom::var("b")),
            Atom::var("c"),
        );
        assert!(to_cnf_clauses(&formula).is_err());
    }
}
