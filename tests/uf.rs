//! Equality-with-uninterpreted-functions solving through the public `Solver` API.

use corvid_smt::config::{Config, TheoryKind};
use corvid_smt::{parser, Report, Solver};

fn solve(text: &str) -> Report {
    let formula = parser::parse(text).unwrap();
    Solver::new(Config::new(TheoryKind::Uf)).solve(&formula).unwrap()
}

#[test]
fn direct_congruence_is_satisfiable() {
    assert!(matches!(solve("(a = b) & (f(a) = f(b))"), Report::Satisfiable(_)));
}

#[test]
fn congruence_across_disequality_is_unsat() {
    assert!(matches!(solve("(a = b) & (f(a) != f(b))"), Report::Unsatisfiable));
}

#[test]
fn transitive_chain_forces_equality() {
    // a = b, b = c, a != c is unsatisfiable by transitivity alone, no functions required.
    assert!(matches!(solve("(a = b) & (b = c) & (a != c)"), Report::Unsatisfiable));
}
