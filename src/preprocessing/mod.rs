//! The CNF pre-processing pipeline: atom tree in, abstract clauses and an atom map out.

pub mod cnf;
pub mod nnf;
pub mod tseitin;

pub use cnf::to_cnf_clauses;
