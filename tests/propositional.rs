//! Propositional (Tseitin-only) solving through the public `Solver` API.

use corvid_smt::config::{Config, TheoryKind};
use corvid_smt::{parser, Atom, Report, Solver};

fn solve(text: &str) -> Report {
    let formula = parser::parse(text).unwrap();
    Solver::new(Config::new(TheoryKind::Prop)).solve(&formula).unwrap()
}

#[test]
fn unsatisfiable_contradiction() {
    assert!(matches!(solve("p & !p"), Report::Unsatisfiable));
}

#[test]
fn satisfying_model_evaluates_the_original_formula_true() {
    // Round trip per spec.md §4.7/§8: substituting the model back into the original atom tree
    // should evaluate to true.
    let text = "(p | q) & (!p | r)";
    let Report::Satisfiable(model) = solve(text) else {
        panic!("expected SAT")
    };
    let p = *model.get(&Atom::var("p")).unwrap_or(&false);
    let q = *model.get(&Atom::var("q")).unwrap_or(&false);
    let r = *model.get(&Atom::var("r")).unwrap_or(&false);
    assert!((p || q) && (!p || r));
}

#[test]
fn deeply_nested_equivalences_are_solved() {
    let text = "(p <-> q) & (q <-> r) & p";
    let Report::Satisfiable(model) = solve(text) else {
        panic!("expected SAT")
    };
    for name in ["p", "q", "r"] {
        assert_eq!(model.get(&Atom::var(name)), Some(&true));
    }
}
