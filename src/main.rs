use clap::{App, Arg};
use std::fs::File;
use trailsat::formula::dimacs::{parse, DimacsParseError};
use trailsat::formula::Formula;
use trailsat::*;

fn main() {
    env_logger::init();

    let matches = App::new("trailsat")
        .arg(Arg::with_name("INPUT").help("input file (in CNF)").index(1))
        .get_matches();

    let f = if let Some(path) = matches.value_of("INPUT") {
        parse_from_file(path)
    } else {
        parse(std::io::stdin())
    };

    match f {
        Ok(f) => {
            let mut solver = Solver::new(f);

            let exit_code = match solver.solve() {
                SatResult::Satisfiable(model) => {
                    println!("s SATISFIABLE");
                    println!("{}", model_line(&model));
                    0
                }
                SatResult::Unsatisfiable => {
                    println!("s UNSATISFIABLE");
                    1
                }
            };
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("parse error: {:?}", e);
            std::process::exit(-1);
        }
    }
}

fn parse_from_file(path: &str) -> Result<Formula, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}

fn model_line(model: &Model) -> String {
    let mut line = String::from("v");
    for (variable, &value) in model {
        line.push(' ');
        if !value {
            line.push('-');
        }
        line.push_str(&format!("{:?}", variable));
    }
    line.push_str(" 0");
    line
}
