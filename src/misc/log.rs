/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made throughout the library. These are intended to provide
useful information for extending the library and/or diagnosing issues. No log implementation
is provided; see [log] and, e.g., `env_logger` (wired up behind the crate's `log` feature).
*/

/// Targets to be used within a [log] macro.
pub mod targets {
    /// Logs related to [BCP](crate::sat::bcp)
    pub const PROPAGATION: &str = "corvid_smt::bcp";

    /// Logs related to [conflict analysis](crate::sat::analysis)
    pub const ANALYSIS: &str = "corvid_smt::analysis";

    /// Logs related to [decision](crate::sat::decision)
    pub const DECISION: &str = "corvid_smt::decision";

    /// Logs related to backjumping
    pub const BACKJUMP: &str = "corvid_smt::backjump";

    /// Logs related to the [coordinator](crate::coordinator) main loop
    pub const COORDINATOR: &str = "corvid_smt::coordinator";

    /// Logs related to the UF theory
    pub const UF: &str = "corvid_smt::theory::uf";

    /// Logs related to the TQ theory
    pub const TQ: &str = "corvid_smt::theory::tq";

    /// Logs related to preprocessing
    pub const PREPROCESSING: &str = "corvid_smt::preprocessing";
}
