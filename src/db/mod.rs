//! Persistent solver state: the clause database and the implication graph.

pub mod clause_db;
pub mod implication_graph;

pub use clause_db::ClauseDb;
pub use implication_graph::{Antecedent, ImplicationGraph, ImplicationNode};
