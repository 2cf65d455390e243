/*!
A thin CLI wrapper around [`corvid_smt::Solver`]: reads a formula from a file path (or `-` for
stdin), parses it, solves it, and prints the model.

Exit codes follow `spec.md` §6: `0` on SAT, `1` on UNSAT, `2` on a parse or pre-processing error,
`3` on UNKNOWN (a `--time-limit-ms` deadline elapsed before a verdict was reached).
*/

mod parse_args;

use std::io::Read;
use std::process::ExitCode;
use std::{env, fs};

use corvid_smt::config::Config;
use corvid_smt::parser;
use corvid_smt::{Report, Solver};
use log::error;

use parse_args::parse_args;

fn main() -> ExitCode {
    #[cfg(feature = "log")]
    env_logger::init();

    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let text = match read_input(&args.input) {
        Ok(text) => text,
        Err(message) => {
            error!(target: "corvid_smt::cli", "failed to read input: {message}");
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let formula = match parser::parse(&text) {
        Ok(formula) => formula,
        Err(e) => {
            error!(target: "corvid_smt::cli", "parse error: {e:?}");
            eprintln!("parse error: {e:?}");
            return ExitCode::from(2);
        }
    };

    let mut config = Config::new(args.theory);
    config.support_negative_vars = args.support_negative_vars;
    config.time_limit = args.time_limit;
    let mut solver = Solver::new(config);

    match solver.solve(&formula) {
        Ok(Report::Satisfiable(model)) => {
            print!("{}", Report::Satisfiable(model));
            ExitCode::from(0)
        }
        Ok(Report::Unsatisfiable) => {
            println!("{}", Report::Unsatisfiable);
            ExitCode::from(1)
        }
        Ok(Report::Unknown) => {
            println!("{}", Report::Unknown);
            ExitCode::from(3)
        }
        Err(e) => {
            error!(target: "corvid_smt::cli", "pre-processing error: {e}");
            eprintln!("pre-processing error: {e}");
            ExitCode::from(2)
        }
    }
}

fn read_input(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {e}"))?;
        Ok(buf)
    } else {
        fs::read_to_string(path).map_err(|e| format!("failed to read '{path}': {e}"))
    }
}
