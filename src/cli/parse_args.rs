//! Hand-rolled argv parsing, following the teacher's own `src/cli/` convention of reading `argv`
//! directly rather than depending on an argument-parsing crate.

use std::time::Duration;

use corvid_smt::config::TheoryKind;

pub struct Args {
    /// Path to the formula file, or `-` for stdin.
    pub input: String,
    pub theory: TheoryKind,
    pub support_negative_vars: bool,
    pub time_limit: Option<Duration>,
}

pub fn parse_args(argv: &[String]) -> Result<Args, String> {
    let mut input = None;
    let mut theory = TheoryKind::Prop;
    let mut support_negative_vars = false;
    let mut time_limit = None;

    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "--theory" => {
                i += 1;
                let value = argv.get(i).ok_or("--theory requires a value")?;
                theory = match value.as_str() {
                    "prop" => TheoryKind::Prop,
                    "uf" => TheoryKind::Uf,
                    "tq" => TheoryKind::Tq,
                    other => return Err(format!("unknown theory '{other}' (expected prop|uf|tq)")),
                };
            }
            "--negative-vars" => support_negative_vars = true,
            "--time-limit-ms" => {
                i += 1;
                let value = argv.get(i).ok_or("--time-limit-ms requires a value")?;
                let ms: u64 = value.parse().map_err(|_| format!("invalid --time-limit-ms value '{value}'"))?;
                time_limit = Some(Duration::from_millis(ms));
            }
            other if input.is_none() => input = Some(other.to_string()),
            other => return Err(format!("unexpected argument '{other}'")),
        }
        i += 1;
    }

    Ok(Args {
        input: input.ok_or(
            "usage: corvid_cli [--theory prop|uf|tq] [--negative-vars] [--time-limit-ms N] <file|->",
        )?,
        theory,
        support_negative_vars,
        time_limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_theory_flag() {
        let args = parse_args(&["--theory".to_string(), "uf".to_string(), "input.txt".to_string()]).unwrap();
        assert_eq!(args.theory, TheoryKind::Uf);
        assert_eq!(args.input, "input.txt");
    }

    #[test]
    fn requires_an_input_argument() {
        assert!(parse_args(&["--theory".to_string(), "uf".to_string()]).is_err());
    }

    #[test]
    fn parses_time_limit_flag() {
        let args = parse_args(&[
            "--time-limit-ms".to_string(),
            "500".to_string(),
            "input.txt".to_string(),
        ])
        .unwrap();
        assert_eq!(args.time_limit, Some(std::time::Duration::from_millis(500)));
    }
}
