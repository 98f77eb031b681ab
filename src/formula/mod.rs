pub mod dimacs;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::fmt::{self, Formatter};
use std::ops::Index;

/// Position of a clause within its formula. Stable for the formula's
/// lifetime, since clauses are only ever appended.
pub type ClauseIndex = usize;

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Variable(pub usize);

impl Debug for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn variable(&self) -> Variable {
        match self {
            Literal::Positive(v) | Literal::Negative(v) => *v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }
}

impl Debug for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Positive(v) => write!(f, "{:?}", v),
            Literal::Negative(v) => write!(f, "!{:?}", v),
        }
    }
}

/// A disjunction of distinct literals. The parser and the learned-clause
/// construction both guarantee that no variable appears twice; the empty
/// clause only occurs as the unsatisfiable input case.
#[derive(Clone)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn contains_variable(&self, variable: Variable) -> bool {
        self.literals.iter().any(|literal| literal.variable() == variable)
    }
}

impl Debug for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first_literal = true;
        write!(f, "(")?;
        for l in &self.literals {
            if !first_literal {
                write!(f, " | ")?;
            }
            first_literal = false;
            write!(f, "{:?}", l)?;
        }
        write!(f, ")")
    }
}

#[derive(Clone)]
pub struct Formula {
    clauses: Vec<Clause>,
    variables: BTreeSet<Variable>,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        let clauses: Vec<Clause> = conjuncts.into_iter().collect();
        let variables = clauses
            .iter()
            .flat_map(|clause| clause.literals().map(Literal::variable))
            .collect();
        Self { clauses, variables }
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The variables of the original clauses, in ascending order. The
    /// ordering makes decision order (and so the whole search) deterministic.
    /// Learned clauses never introduce variables, so the set is fixed.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Append a learned clause, returning the index it is addressable under.
    pub fn add_clause(&mut self, clause: Clause) -> ClauseIndex {
        let index = self.clauses.len();
        self.clauses.push(clause);
        index
    }
}

impl Index<ClauseIndex> for Formula {
    type Output = Clause;

    fn index(&self, index: ClauseIndex) -> &Clause {
        &self.clauses[index]
    }
}

impl Debug for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first_clause = true;
        for clause in &self.clauses {
            if !first_clause {
                write!(f, " & ")?;
            }
            first_clause = false;
            write!(f, "{:?}", clause)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

#[cfg(test)]
impl Arbitrary for Formula {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        const MAX_VARS: u32 = 10;
        const MAX_CLAUSE_FACTOR: u32 = 5;

        let num_vars = g.next_u32() % MAX_VARS + 1;
        let clause_factor = g.next_u32() % MAX_CLAUSE_FACTOR + 1;
        let num_clauses = num_vars * clause_factor;

        Formula::new((0..num_clauses).map(|_| {
            // random 3-CNF, each clause over distinct variables
            let clause_size = num_vars.min(3) as usize;
            let mut variables = BTreeSet::new();
            while variables.len() < clause_size {
                variables.insert(Variable((g.next_u32() % num_vars + 1) as usize));
            }
            Clause::new(variables.into_iter().map(|variable| {
                if g.next_u32() % 2 == 0 {
                    Literal::Positive(variable)
                } else {
                    Literal::Negative(variable)
                }
            }))
        }))
    }
}
