#[cfg(test)]
extern crate quickcheck;

mod assignment;
pub mod formula;
mod solver;

#[cfg(test)]
mod brute_force;

use std::collections::BTreeMap;

/// A satisfying total assignment over the formula's variables.
pub type Model = BTreeMap<formula::Variable, bool>;

#[derive(PartialEq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Model),
    Unsatisfiable,
}

pub use formula::{Clause, Formula, Literal, Variable};
pub use solver::Solver;
