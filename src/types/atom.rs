//! The atom tree produced by the parser and consumed by the CNF pre-processor and theories.
//!
//! Atoms form a tagged sum rather than the class hierarchy of the original implementation:
//! `Var`/`Func`/`Equal`/`Geq`/`Less` are literals (may appear as a CNF clause literal without
//! further rewriting), while `And`/`Or`/`Not`/`Imply`/`Equiv` are the connectives removed by
//! Tseitin encoding before any clause is built.

use std::fmt;

/// A vector literal, as in `[v1, v2, ..., vk]` with `k >= 1`.
pub type Vector = Vec<i64>;

/// A node of the atom tree.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Atom {
    /// A propositional variable, identified by name.
    Var(String),

    /// Application of an uninterpreted function symbol to literal arguments.
    Func(String, Vec<Atom>),

    /// `left = right`, for literal `left`/`right`.
    Equal(Box<Atom>, Box<Atom>),

    /// `left != right`, for literal `left`/`right`.
    NEqual(Box<Atom>, Box<Atom>),

    /// `a . x >= b`, for a fixed coefficient vector `a` and integer `b`.
    Geq(Vector, i64),

    /// `a . x < b`, for a fixed coefficient vector `a` and integer `b`.
    Less(Vector, i64),

    /// Conjunction.
    And(Box<Atom>, Box<Atom>),

    /// Disjunction.
    Or(Box<Atom>, Box<Atom>),

    /// Implication, `left -> right`.
    Imply(Box<Atom>, Box<Atom>),

    /// Bi-implication, `left <-> right`.
    Equiv(Box<Atom>, Box<Atom>),

    /// Negation.
    Not(Box<Atom>),
}

impl Atom {
    /// Smart constructors, mostly to avoid `Box::new` noise at every call site.
    pub fn var(name: impl Into<String>) -> Atom {
        Atom::Var(name.into())
    }

    pub fn func(name: impl Into<String>, args: Vec<Atom>) -> Atom {
        Atom::Func(name.into(), args)
    }

    pub fn equal(left: Atom, right: Atom) -> Atom {
        Atom::Equal(Box::new(left), Box::new(right))
    }

    pub fn nequal(left: Atom, right: Atom) -> Atom {
        Atom::NEqual(Box::new(left), Box::new(right))
    }

    pub fn geq(a: Vector, b: i64) -> Atom {
        Atom::Geq(a, b)
    }

    pub fn less(a: Vector, b: i64) -> Atom {
        Atom::Less(a, b)
    }

    pub fn and(left: Atom, right: Atom) -> Atom {
        Atom::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Atom, right: Atom) -> Atom {
        Atom::Or(Box::new(left), Box::new(right))
    }

    pub fn imply(left: Atom, right: Atom) -> Atom {
        Atom::Imply(Box::new(left), Box::new(right))
    }

    pub fn equiv(left: Atom, right: Atom) -> Atom {
        Atom::Equiv(Box::new(left), Box::new(right))
    }

    pub fn not(item: Atom) -> Atom {
        Atom::Not(Box::new(item))
    }

    /// Whether this node is a CNF-clause literal: a variable, function application, equality
    /// atom, or inequality atom. `Not` of one of these is also a literal (the sign is resolved
    /// during NNF conversion), but a bare `And`/`Or`/`Imply`/`Equiv` never is.
    pub fn is_literal(&self) -> bool {
        match self {
            Atom::Var(_) | Atom::Func(..) | Atom::Equal(..) | Atom::NEqual(..) | Atom::Geq(..) | Atom::Less(..) => true,
            Atom::Not(inner) => inner.is_literal() && !matches!(inner.as_ref(), Atom::Not(_)),
            Atom::And(..) | Atom::Or(..) | Atom::Imply(..) | Atom::Equiv(..) => false,
        }
    }

    /// The dual atom under negation. Connectives rewrite structurally (De Morgan); literal
    /// atoms flip to their direct dual (`Equal`/`NEqual`, `Geq`/`Less`) rather than wrapping in
    /// `Not`, matching the original implementation's `negate` methods.
    pub fn negate(&self) -> Atom {
        match self {
            Atom::Var(_) | Atom::Func(..) => Atom::not(self.clone()),
            Atom::Equal(l, r) => Atom::NEqual(l.clone(), r.clone()),
            Atom::NEqual(l, r) => Atom::Equal(l.clone(), r.clone()),
            Atom::Geq(a, b) => Atom::Less(a.clone(), *b),
            Atom::Less(a, b) => Atom::Geq(a.clone(), *b),
            Atom::And(l, r) => Atom::or(l.negate(), r.negate()),
            Atom::Or(l, r) => Atom::and(l.negate(), r.negate()),
            Atom::Imply(l, r) => Atom::and((**l).clone(), r.negate()),
            Atom::Equiv(l, r) => {
                Atom::or(Atom::and((**l).clone(), r.negate()), Atom::and(l.negate(), (**r).clone()))
            }
            Atom::Not(inner) => (**inner).clone(),
        }
    }

    /// The key under which this literal atom is interned, plus whether it is the positive
    /// (`true`) or negative (`false`) occurrence of that key. `Equal`/`NEqual` with the same
    /// sides share a key, as do `Geq`/`Less` with the same vector and bound, and `Var`/`Func`
    /// share a key with their `Not`-wrapped form. Panics on a non-literal atom.
    pub fn canonical_key(&self) -> (Atom, bool) {
        match self {
            Atom::Var(_) | Atom::Func(..) => (self.clone(), true),
            Atom::Equal(l, r) => (Atom::equal((**l).clone(), (**r).clone()), true),
            Atom::NEqual(l, r) => (Atom::equal((**l).clone(), (**r).clone()), false),
            Atom::Geq(a, b) => (Atom::geq(a.clone(), *b), true),
            Atom::Less(a, b) => (Atom::geq(a.clone(), *b), false),
            Atom::Not(inner) => {
                let (key, sign) = inner.canonical_key();
                (key, !sign)
            }
            Atom::And(..) | Atom::Or(..) | Atom::Imply(..) | Atom::Equiv(..) => {
                panic!("canonical_key called on a non-literal atom: {self}")
            }
        }
    }

    /// `Imply`/`Equiv` rewritten to `And`/`Or`/`Not`, recursively.
    pub fn to_basic(&self) -> Atom {
        match self {
            Atom::Imply(l, r) => Atom::or(Atom::not(l.to_basic()), r.to_basic()),
            Atom::Equiv(l, r) => {
                let (l, r) = (l.to_basic(), r.to_basic());
                Atom::and(
                    Atom::or(Atom::not(l.clone()), r.clone()),
                    Atom::or(Atom::not(r), l),
                )
            }
            Atom::And(l, r) => Atom::and(l.to_basic(), r.to_basic()),
            Atom::Or(l, r) => Atom::or(l.to_basic(), r.to_basic()),
            Atom::Not(inner) => Atom::not(inner.to_basic()),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Var(name) => write!(f, "{name}"),
            Atom::Func(name, args) => {
                write!(f, "{name}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
            Atom::Equal(l, r) => write!(f, "{l} = {r}"),
            Atom::NEqual(l, r) => write!(f, "{l} != {r}"),
            Atom::Geq(a, b) => write!(f, "{a:?} >= {b}"),
            Atom::Less(a, b) => write!(f, "{a:?} < {b}"),
            Atom::And(l, r) => write!(f, "({l} & {r})"),
            Atom::Or(l, r) => write!(f, "({l} | {r})"),
            Atom::Imply(l, r) => write!(f, "({l} -> {r})"),
            Atom::Equiv(l, r) => write!(f, "({l} <-> {r})"),
            Atom::Not(inner) => write!(f, "!{inner}"),
        }
    }
}
