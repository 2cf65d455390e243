//! The seven concrete end-to-end scenarios, run through the surface parser and the public
//! `Solver` API.

use corvid_smt::config::{Config, TheoryKind};
use corvid_smt::{parser, Report, Solver};

fn solve(theory: TheoryKind, negative_vars: bool, text: &str) -> Report {
    let formula = parser::parse(text).expect("formula should parse");
    let mut config = Config::new(theory);
    config.support_negative_vars = negative_vars;
    Solver::new(config).solve(&formula).expect("should not error")
}

#[test]
fn scenario_1_purely_propositional_sat() {
    match solve(TheoryKind::Prop, false, "(p & q) | !(q | r)") {
        Report::Satisfiable(model) => {
            assert_eq!(model.get(&corvid_smt::Atom::var("p")), Some(&true));
            assert_eq!(model.get(&corvid_smt::Atom::var("q")), Some(&true));
        }
        other => panic!("expected SAT, got {other}"),
    }
}

#[test]
fn scenario_2_tseitin_dependent_sat() {
    // !((!(p & q)) -> !r) reduces to !(p & q) & r: r must be true, and p, q cannot both be true.
    match solve(TheoryKind::Prop, false, "!((!(p & q)) -> !r)") {
        Report::Satisfiable(model) => {
            let p = model.get(&corvid_smt::Atom::var("p")).copied().unwrap_or(false);
            let q = model.get(&corvid_smt::Atom::var("q")).copied().unwrap_or(false);
            assert_eq!(model.get(&corvid_smt::Atom::var("r")), Some(&true), "r should be true");
            assert!(!(p && q), "p and q should not both be true");
        }
        other => panic!("expected SAT, got {other}"),
    }
}

#[test]
fn scenario_3_uf_unsat() {
    let text = "(g(a) = c) & (((f(g(a)) != f(c)) | (g(a) = d)) & (c != d))";
    assert!(matches!(solve(TheoryKind::Uf, false, text), Report::Unsatisfiable));
}

#[test]
fn scenario_4_uf_sat_with_propagation() {
    let text = "(a=b) & ((a!=b) | (s!=t) | (b=c)) & ((s=t) | (t!=r) | (f(s)=f(a))) & \
                ((b!=c) | (t!=r) | (f(s)=f(a))) & ((f(s)!=f(a)) | (f(a)!=f(c)))";
    assert!(matches!(solve(TheoryKind::Uf, false, text), Report::Satisfiable(_)));
}

#[test]
fn scenario_5_uf_iterated_function_unsat() {
    let text = "(f(f(f(a))) = a) & (f(f(f(f(f(a))))) = a) & (f(a) != a)";
    assert!(matches!(solve(TheoryKind::Uf, false, text), Report::Unsatisfiable));
}

#[test]
fn scenario_6_tq_strict_unsat_both_modes() {
    let text = "([1, 1] >= 1) & ([1, 1] < -1)";
    assert!(matches!(solve(TheoryKind::Tq, false, text), Report::Unsatisfiable));
    assert!(matches!(solve(TheoryKind::Tq, true, text), Report::Unsatisfiable));
}

#[test]
fn scenario_7_tq_mode_dependent() {
    let text = "([-1, -1] >= -3) & ([-2, 1] >= 5)";
    assert!(matches!(solve(TheoryKind::Tq, false, text), Report::Unsatisfiable));
    assert!(matches!(solve(TheoryKind::Tq, true, text), Report::Satisfiable(_)));
}
