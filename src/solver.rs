use crate::assignment::{Antecedent, Assignments, DecisionLevel};
use crate::formula::{Clause, ClauseIndex, Formula, Literal, Variable};
use crate::SatResult;
use log::trace;
use std::collections::BTreeSet;

/// Status of one clause under a partial assignment.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ClauseStatus {
    /// Some literal is true.
    Satisfied,
    /// Every literal is false (vacuously so for the empty clause).
    Unsatisfied,
    /// Exactly one literal is unassigned and no literal is true; the clause
    /// forces that literal.
    Unit(Literal),
    Unresolved,
}

#[derive(PartialEq, Clone, Debug)]
enum BcpResult {
    Conflict(ClauseIndex),
    NoConflict,
}

/// Outcome of conflict analysis: the level to jump back to, and the clause
/// to learn. The learned clause becomes unit at that level.
#[derive(Debug)]
struct Backjump {
    level: DecisionLevel,
    learned: Clause,
}

pub struct Solver {
    formula: Formula,
    assignments: Assignments,
    // clauses past this index were learned during search
    num_original: usize,
}

fn clause_status(clause: &Clause, assignments: &Assignments) -> ClauseStatus {
    let mut unit = None;
    let mut unassigned = 0;
    for literal in clause.literals() {
        match assignments.value(literal) {
            Some(true) => return ClauseStatus::Satisfied,
            Some(false) => {}
            None => {
                unit = Some(*literal);
                unassigned += 1;
            }
        }
    }
    match (unit, unassigned) {
        (None, _) => ClauseStatus::Unsatisfied,
        (Some(literal), 1) => ClauseStatus::Unit(literal),
        _ => ClauseStatus::Unresolved,
    }
}

/// Resolution of two clauses over a pivot variable: the union of their
/// literals minus the two literals over the pivot, deduplicated.
fn resolve(a: &Clause, b: &Clause, pivot: Variable) -> Clause {
    let in_a = a.literals().find(|literal| literal.variable() == pivot);
    let in_b = b.literals().find(|literal| literal.variable() == pivot);
    match (in_a, in_b) {
        (Some(x), Some(y)) if *x == y.negated() => {}
        _ => panic!(
            "resolution pivot {:?} must occur with opposite polarities in {:?} and {:?}",
            pivot, a, b
        ),
    }

    let literals: BTreeSet<Literal> = a
        .literals()
        .chain(b.literals())
        .filter(|literal| literal.variable() != pivot)
        .copied()
        .collect();
    Clause::new(literals)
}

impl Solver {
    pub fn new(formula: Formula) -> Self {
        let num_original = formula.len();
        Self {
            formula,
            assignments: Assignments::new(),
            num_original,
        }
    }

    pub fn solve(&mut self) -> SatResult {
        if let BcpResult::Conflict(_) = self.bcp() {
            return SatResult::Unsatisfiable;
        }
        while let Some(variable) = self.decide() {
            self.assignments.bump_level();
            self.assignments.assign(variable, true, Antecedent::Decision);
            while let BcpResult::Conflict(conflicting) = self.bcp() {
                if self.assignments.decision_level() == DecisionLevel(0) {
                    return SatResult::Unsatisfiable;
                }
                let backjump = self.analyze_conflict(conflicting);
                self.assignments.backjump(backjump.level);
                self.learn(backjump.learned);
            }
        }
        debug_assert!(self.assignments.satisfies(&self.formula));
        SatResult::Satisfiable(self.assignments.model())
    }

    /// Boolean constraint propagation: rescan the formula until no clause is
    /// unit, or some clause has every literal false.
    fn bcp(&mut self) -> BcpResult {
        let mut did_work = true;
        while did_work {
            did_work = false;
            for index in 0..self.formula.len() {
                match clause_status(&self.formula[index], &self.assignments) {
                    ClauseStatus::Unit(literal) => {
                        self.assignments.assign(
                            literal.variable(),
                            literal.is_positive(),
                            Antecedent::Implied(index),
                        );
                        did_work = true;
                    }
                    ClauseStatus::Unsatisfied => return BcpResult::Conflict(index),
                    ClauseStatus::Satisfied | ClauseStatus::Unresolved => {}
                }
            }
        }
        BcpResult::NoConflict
    }

    // TODO a less stupid heuristic. for now, take the lowest-numbered unassigned variable.
    // why is it complete to only try positive assignments? because [`analyze_conflict`]
    // will learn a clause that reverses this decision if it's involved in a conflict.
    fn decide(&self) -> Option<Variable> {
        self.formula
            .variables()
            .find(|variable| self.assignments.get(variable).is_none())
            .copied()
    }

    /// Derive a learned clause from a conflict by resolving backwards along
    /// the trail until exactly one literal of the current decision level
    /// remains: the first unique implication point.
    fn analyze_conflict(&self, conflicting: ClauseIndex) -> Backjump {
        let current = self.assignments.decision_level();
        assert!(
            current > DecisionLevel(0),
            "conflicts at the root level are terminal, not analyzable"
        );

        let mut working = self.formula[conflicting].clone();
        while self.literals_at_level(&working, current) > 1 {
            let (pivot, reason) = self.last_implied_in(&working);
            working = resolve(&working, &self.formula[reason], pivot);
        }

        // jump to the second-highest level in the learned clause (or the root
        // if the asserting literal is alone); the asserting literal becomes
        // unit there
        let level = working
            .literals()
            .filter_map(|literal| self.assignments.get(&literal.variable()).map(|record| record.level))
            .filter(|&level| level < current)
            .max()
            .unwrap_or(DecisionLevel(0));

        trace!("learned {:?}, backjumping to {:?}", working, level);
        Backjump {
            level,
            learned: working,
        }
    }

    fn literals_at_level(&self, clause: &Clause, level: DecisionLevel) -> usize {
        clause
            .literals()
            .filter(|literal| {
                self.assignments
                    .get(&literal.variable())
                    .map(|record| record.level)
                    == Some(level)
            })
            .count()
    }

    /// The most recently assigned variable in `clause` that was implied
    /// rather than decided, along with the index of the clause that implied
    /// it. Walks the trail newest-first.
    fn last_implied_in(&self, clause: &Clause) -> (Variable, ClauseIndex) {
        self.assignments
            .trail()
            .iter()
            .rev()
            .find_map(|variable| {
                if !clause.contains_variable(*variable) {
                    return None;
                }
                match self.assignments.get(variable)?.antecedent {
                    Antecedent::Implied(reason) => Some((*variable, reason)),
                    Antecedent::Decision => None,
                }
            })
            .expect("a conflict above the root level always involves an implied assignment")
    }

    /// Append a learned clause and immediately assert its unit literal, with
    /// the learned clause itself as antecedent.
    fn learn(&mut self, learned: Clause) {
        let index = self.formula.add_clause(learned);
        match clause_status(&self.formula[index], &self.assignments) {
            ClauseStatus::Unit(literal) => {
                self.assignments.assign(
                    literal.variable(),
                    literal.is_positive(),
                    Antecedent::Implied(index),
                );
            }
            status => panic!(
                "learned clause {:?} must be unit after backjump, but is {:?}",
                self.formula[index], status
            ),
        }
    }

    /// Clauses added by conflict analysis, in the order they were learned.
    pub fn learned_clauses(&self) -> impl Iterator<Item = &Clause> {
        self.formula.clauses().skip(self.num_original)
    }
}
