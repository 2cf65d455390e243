//! Shared data types used throughout the library.

pub mod atom;
pub mod atom_map;
pub mod err;

pub use atom::Atom;
pub use atom_map::AtomMap;
