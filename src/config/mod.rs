/*!
Solver configuration.

Considerably smaller than the teacher's `Config`, which carries a `ConfigOption<T>` wrapper per
knob for VSIDS weighting, restart scheduling, LBD-based clause deletion, phase saving and
polarity bias. Those are all search-performance optimisations explicitly out of scope here (see
`spec.md` §1's non-goals and §9's design notes); the only knobs this solver actually needs are
which theory to run and how that theory should treat variables with no sign constraint.
*/

use std::time::Duration;

/// Which theory the coordinator should consult alongside the SAT core.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TheoryKind {
    /// No theory constraints beyond propositional logic.
    Prop,

    /// Equality with uninterpreted functions, decided by congruence closure.
    Uf,

    /// Linear arithmetic over the rationals, decided by reduction to LP feasibility.
    Tq,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub theory: TheoryKind,

    /// Whether TQ should realise each variable as `x+ - x-` to support negative values, rather
    /// than assuming every variable is non-negative (`spec.md` §3).
    pub support_negative_vars: bool,

    /// An optional cooperative deadline checked between main-loop iterations. Not part of the
    /// core contract (`spec.md` §5 treats cancellation as out of scope); present because a CLI
    /// or embedding caller may still want one.
    pub time_limit: Option<Duration>,
}

impl Config {
    pub fn new(theory: TheoryKind) -> Self {
        Config {
            theory,
            support_negative_vars: false,
            ..Default::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            theory: TheoryKind::Prop,
            support_negative_vars: false,
            time_limit: None,
        }
    }
}
