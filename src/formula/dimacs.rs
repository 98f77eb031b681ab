use crate::formula::{Clause, Formula, Literal, Variable};
use std::io::{BufRead, BufReader, Read};

pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut clause_lines = 0;
    let mut num_clauses = None;

    for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | None => continue,
            Some(&"p") => {
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf'".into()));
                }

                let _num_variables = line
                    .next()
                    .and_then(|c| usize::from_str_radix(c, 10).ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_variables".into()))?;

                num_clauses = Some(
                    line.next()
                        .and_then(|c| usize::from_str_radix(c, 10).ok())
                        .ok_or_else(|| DimacsParseError::Format("invalid num_clauses".into()))?,
                );
            }
            Some(_) => {
                if num_clauses.is_none() {
                    return Err(DimacsParseError::Format("missing 'p' line before clauses".into()));
                }

                let mut clause: Vec<Literal> = vec![];
                for x in line {
                    match parse_literal(x)? {
                        Some(literal) => {
                            if !clause.contains(&literal) {
                                clause.push(literal);
                            }
                        }
                        None => break,
                    }
                }

                // a clause mentioning some x and !x together is vacuously
                // true and contributes nothing; an empty clause stays (the
                // formula is then unsatisfiable)
                let tautological = clause.iter().any(|literal| clause.contains(&literal.negated()));
                if !tautological {
                    clauses.push(Clause::new(clause));
                }

                // the header declares how many clause lines belong to this
                // formula; dropped clauses still count against it
                clause_lines += 1;
                if clause_lines >= num_clauses.unwrap() {
                    break;
                }
            }
        }
    }

    if num_clauses.is_none() {
        return Err(DimacsParseError::Format("missing 'p' line before clauses".into()));
    }

    let formula = Formula::new(clauses);
    Ok(formula)
}

fn parse_literal(s: &str) -> Result<Option<Literal>, DimacsParseError> {
    let l = isize::from_str_radix(s, 10).map_err(|_| DimacsParseError::Format("invalid literal".into()))?;
    if l > 0 {
        Ok(Some(Literal::Positive(Variable(l as usize))))
    } else if l < 0 {
        Ok(Some(Literal::Negative(Variable(-l as usize))))
    } else {
        Ok(None)
    }
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Format(String),
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
