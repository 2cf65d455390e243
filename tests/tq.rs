//! Linear arithmetic over the rationals through the public `Solver` API.

use corvid_smt::config::{Config, TheoryKind};
use corvid_smt::{parser, Report, Solver};

fn solve(text: &str, negative_vars: bool) -> Report {
    let formula = parser::parse(text).unwrap();
    let mut config = Config::new(TheoryKind::Tq);
    config.support_negative_vars = negative_vars;
    Solver::new(config).solve(&formula).unwrap()
}

#[test]
fn single_feasible_bound_is_sat() {
    assert!(matches!(solve("[1] >= 0", false), Report::Satisfiable(_)));
}

#[test]
fn non_negative_region_rejects_unreachable_bound() {
    // x >= 5 with x < 0 is infeasible once x is assumed non-negative (no, x < 0 itself makes it
    // infeasible regardless of sign mode): x >= 5 and x < 5 is a direct contradiction.
    assert!(matches!(solve("([1] >= 5) & ([1] < 5)", false), Report::Unsatisfiable));
}

#[test]
fn disjunction_of_arithmetic_atoms_is_sat() {
    let text = "([1] >= 10) | ([1] >= 0)";
    assert!(matches!(solve(text, false), Report::Satisfiable(_)));
}

#[test]
fn vector_equality_is_sat_with_negative_vars() {
    // x1 - x2 = 3 and 2.x1 + x2 < 1: unsatisfiable while x1, x2 are assumed non-negative (then
    // x1 - x2 = 3 forces x1 >= 3, so 2.x1 + x2 >= 6), satisfiable once negative values are
    // allowed (e.g. x1 = -7, x2 = -10).
    let text = "([1, -1, 0] = 3) & ([2, 1, 0] < 1)";
    assert!(matches!(solve(text, false), Report::Unsatisfiable));
    assert!(matches!(solve(text, true), Report::Satisfiable(_)));
}

#[test]
fn vector_disequality_excludes_exact_boundary() {
    // x = 5 is the only value making [1] = 5 true, so its disequality must rule it out while
    // leaving the rest of the non-negative line free.
    assert!(matches!(solve("[1] != 5", false), Report::Satisfiable(_)));
}
