//! The trivial theory: no constraints beyond propositional logic.

use super::{Theory, TheoryCheck};
use crate::structures::literal::IntLit;
use crate::types::atom_map::AtomMap;
use crate::types::err::ErrorKind;

#[derive(Default)]
pub struct Prop;

impl Prop {
    pub fn new() -> Self {
        Prop
    }
}

impl Theory for Prop {
    fn preprocess(&mut self, _map: &AtomMap) -> Result<(), ErrorKind> {
        Ok(())
    }

    fn process_assignment(&mut self, _lit: IntLit, _map: &AtomMap) {}

    fn check(&mut self, _map: &AtomMap) -> TheoryCheck {
        TheoryCheck::Sat
    }

    fn next_propagation(&mut self) -> Option<(IntLit, Vec<IntLit>)> {
        None
    }

    fn conflict_recovery(&mut self, _assignment: &[IntLit], _map: &AtomMap) {}
}
