use crate::formula::{ClauseIndex, Formula, Literal, Variable};
use crate::Model;
use log::trace;
use std::collections::HashMap;

/// Number of decisions on the trail at the time of an assignment. Level 0
/// holds only top-level propagations.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct DecisionLevel(pub usize);

impl DecisionLevel {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Why a variable holds its value: chosen freely, or forced by a clause.
/// Implied assignments name the forcing clause by its index in the formula,
/// which stays addressable even for learned clauses.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Antecedent {
    Decision,
    Implied(ClauseIndex),
}

impl Antecedent {
    pub fn is_implied(&self) -> bool {
        match self {
            Antecedent::Implied(_) => true,
            Antecedent::Decision => false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Assignment {
    pub value: bool,
    pub level: DecisionLevel,
    pub antecedent: Antecedent,
}

/// The solver's variable bindings plus the chronological trail of how they
/// were made. The trail lists exactly the assigned variables, in assignment
/// order, with non-decreasing decision levels; the first entry of each level
/// above 0 is its decision.
pub struct Assignments {
    records: HashMap<Variable, Assignment>,
    trail: Vec<Variable>,
    decision_level: DecisionLevel,
}

impl Assignments {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            trail: vec![],
            decision_level: DecisionLevel(0),
        }
    }

    /// Truth of a literal under the current bindings, `None` if its variable
    /// is unassigned.
    pub fn value(&self, literal: &Literal) -> Option<bool> {
        self.records
            .get(&literal.variable())
            .map(|record| record.value == literal.is_positive())
    }

    pub fn get(&self, variable: &Variable) -> Option<&Assignment> {
        self.records.get(variable)
    }

    pub fn assign(&mut self, variable: Variable, value: bool, antecedent: Antecedent) {
        assert!(
            !self.records.contains_key(&variable),
            "cannot assign {:?} twice",
            variable
        );
        assert!(
            antecedent.is_implied() || self.decision_level > DecisionLevel(0),
            "decisions only happen above the root level"
        );

        trace!(
            "{} {:?} = {} at level {:?}",
            if antecedent.is_implied() { "implied" } else { "decision" },
            variable,
            value,
            self.decision_level
        );

        self.records.insert(
            variable,
            Assignment {
                value,
                level: self.decision_level,
                antecedent,
            },
        );
        self.trail.push(variable);
    }

    pub fn unassign(&mut self, variable: Variable) {
        assert_eq!(
            self.trail.last(),
            Some(&variable),
            "can only unassign the newest trail entry"
        );
        self.trail.pop();
        self.records.remove(&variable);
    }

    pub fn decision_level(&self) -> DecisionLevel {
        self.decision_level
    }

    pub fn bump_level(&mut self) {
        self.decision_level = self.decision_level.next();
    }

    pub fn trail(&self) -> &[Variable] {
        &self.trail
    }

    /// Undo assignments newer than `level`, then make it the current level.
    /// Assignments at or below `level` survive.
    pub fn backjump(&mut self, level: DecisionLevel) {
        while let Some(&variable) = self.trail.last() {
            if self.records[&variable].level <= level {
                break;
            }
            self.unassign(variable);
        }
        self.decision_level = level;
    }

    /// Every clause has at least one true literal under the current bindings.
    pub fn satisfies(&self, formula: &Formula) -> bool {
        formula
            .clauses()
            .all(|clause| clause.literals().any(|literal| self.value(literal) == Some(true)))
    }

    /// Owned snapshot of the current bindings.
    pub fn model(&self) -> Model {
        self.records
            .iter()
            .map(|(&variable, record)| (variable, record.value))
            .collect()
    }
}
