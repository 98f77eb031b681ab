use crate::formula::{Formula, Variable};
use crate::{Model, SatResult};
use std::collections::HashMap;

/// Simple brute-force solver implementation for use as ground truth in tests
pub(crate) fn solve_brute_force(f: &Formula) -> SatResult {
    let variables: Vec<Variable> = f.variables().copied().collect();
    assert!(variables.len() <= 20); // just for safety; this is a very bad solver!

    let bit_for: HashMap<Variable, usize> = variables
        .iter()
        .enumerate()
        .map(|(bit, &variable)| (variable, bit))
        .collect();

    fn value_for(assignment: u32, bit: usize) -> bool {
        assignment & (1 << bit) == 0
    }

    'search: for assignment in 0..2u32.pow(variables.len() as u32) {
        'clauses: for clause in f.clauses() {
            for literal in clause.literals() {
                if value_for(assignment, bit_for[&literal.variable()]) == literal.is_positive() {
                    // this clause is satisfied, let's go to the next one
                    continue 'clauses;
                }
            }
            // if we got here, this clause was not satisfied, so this assignment is bogus
            continue 'search;
        }
        // if we got here, every clause was satisfied, so we're done and satisfiable
        let model: Model = variables
            .iter()
            .map(|&variable| (variable, value_for(assignment, bit_for[&variable])))
            .collect();
        return SatResult::Satisfiable(model);
    }
    // no assignment is valid
    SatResult::Unsatisfiable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p, Clause};

    #[test]
    fn solve_bcp_sat() {
        let c1 = Clause::new(vec![p(1), p(2)]);
        let c2 = Clause::new(vec![n(1)]);
        let f = Formula::new(vec![c1, c2]);

        match solve_brute_force(&f) {
            SatResult::Satisfiable(model) => {
                assert_eq!(model[&Variable(1)], false);
                assert_eq!(model[&Variable(2)], true);
            }
            SatResult::Unsatisfiable => panic!("formula is satisfiable"),
        }
    }

    #[test]
    fn solve_bcp_unsat() {
        let c1 = Clause::new(vec![p(1), p(2)]);
        let c2 = Clause::new(vec![n(1)]);
        let c3 = Clause::new(vec![n(2)]);
        let f = Formula::new(vec![c1, c2, c3]);

        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
    }

    #[test]
    fn solve_empty_formula_sat() {
        let f = Formula::new(vec![]);
        assert_eq!(solve_brute_force(&f), SatResult::Satisfiable(Model::new()));
    }

    #[test]
    fn solve_conflict_sat() {
        let c1 = Clause::new(vec![p(1), p(2), p(3)]);
        let c2 = Clause::new(vec![n(1), n(2), p(3)]);
        let c3 = Clause::new(vec![n(2), n(3)]);
        let f = Formula::new(vec![c1, c2, c3]);

        assert!(matches!(solve_brute_force(&f), SatResult::Satisfiable(_)));
    }

    #[test]
    fn solve_conflict_unsat() {
        let c1 = Clause::new(vec![p(1), p(2)]);
        let c2 = Clause::new(vec![n(1)]);
        let c3 = Clause::new(vec![n(2)]);
        let f = Formula::new(vec![c1, c2, c3]);

        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
    }
}
