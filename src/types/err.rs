/*!
Error types used in the library.

Following the teacher crate's convention, these are plain enums with `From` impls rather than a
derive-macro error crate: most variants are unlikely to occur in practice, and the ones that do
occur routinely (a malformed formula, an unsatisfiable input) are not exceptional enough to
warrant richer machinery.
*/

/// A union of varied error kinds, returned to a caller before any solving begins. Internal
/// invariant violations (`spec.md` §7 category 4: an invalid `resolve_conflict` call, an unknown
/// congruence-graph term) are not represented here — they are programmer errors, not something a
/// caller can react to, so they abort loudly via `panic!`/`expect` instead.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error while tokenizing or parsing surface syntax.
    Parse(ParseError),

    /// An error while pre-processing an atom tree into CNF (a theory-incompatible atom).
    Preprocessing(PreprocessingError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Parse(e) => write!(f, "parse error: {e:?}"),
            ErrorKind::Preprocessing(e) => write!(f, "pre-processing error: {e:?}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Errors during tokenizing/parsing of surface syntax.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An opening parenthesis (grouping or a function call) was never closed.
    UnbalancedParentheses,

    /// The input was empty, or a sub-term was empty.
    Empty,

    /// A vector literal contained a non-integer entry.
    BadVectorEntry(String),

    /// An operator was found with an operand of the wrong kind (e.g. `>=` without a vector on
    /// the left).
    InvalidOperandKind {
        operator: String,
        found: String,
    },

    /// A token was not recognised.
    UnexpectedToken(String),

    /// The input ended while a term was still expected.
    UnexpectedEof,
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors raised by a theory's `preprocess` step: an atom using a construct the theory cannot
/// interpret.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PreprocessingError {
    /// `Equal`/`NEqual` arguments must themselves be literals, not nested equalities.
    EqualityArgumentNotLiteral,

    /// Function arguments must be literals, not `Equal`/`NEqual`.
    FunctionArgumentNotLiteral,

    /// A `Geq`/`Less` left-hand side was not a coefficient vector, or the right-hand side was
    /// not an integer (structurally guaranteed by `Atom`, but asserted for atoms reachable only
    /// via direct construction).
    ArithmeticArgumentKind,
}

impl From<PreprocessingError> for ErrorKind {
    fn from(e: PreprocessingError) -> Self {
        ErrorKind::Preprocessing(e)
    }
}
