/*!
The public result of a solve.

Named and shaped after the teacher crate's own `reports` module: a small, user-facing enum
distinct from the internal step-by-step `StepResult`/`TheoryCheck` types used inside the engine.
*/

use std::collections::HashMap;
use std::fmt;

use crate::types::Atom;

/// The outcome of [`crate::coordinator::Solver::solve`].
pub enum Report {
    /// The formula is satisfiable; the model assigns a boolean to every non-dummy atom that
    /// appeared in it.
    Satisfiable(HashMap<Atom, bool>),

    /// The formula is unsatisfiable.
    Unsatisfiable,

    /// `Config::time_limit` elapsed before the main loop reached a verdict.
    Unknown,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Satisfiable(model) => {
                writeln!(f, "SAT")?;
                let mut entries: Vec<_> = model.iter().collect();
                entries.sort_by_key(|(atom, _)| atom.to_string());
                for (atom, value) in entries {
                    writeln!(f, "{atom} = {value}")?;
                }
                Ok(())
            }
            Report::Unsatisfiable => write!(f, "UNSAT"),
            Report::Unknown => write!(f, "UNKNOWN (time limit exceeded)"),
        }
    }
}
