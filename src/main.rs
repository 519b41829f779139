use anyhow::Result;
use clap::Parser;
use natded::{eval_line, Command};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Parse formulas of propositional and first-order logic
#[derive(Parser, Debug)]
#[command(name = "natded")]
#[command(about = "Parse and inspect logical formulas", long_about = None)]
struct Args {
    /// Formula to parse; read commands from stdin when omitted
    #[arg(value_name = "FORMULA")]
    formula: Vec<String>,

    /// Do not print a prompt when reading from stdin
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if !args.formula.is_empty() {
        let text = args.formula.join(" ");
        debug!(%text, "parsing formula from arguments");
        return Ok(match eval_line(&format!("parse {}", text)) {
            Ok(out) => {
                println!("{}", out);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            }
        });
    }

    let stdin = io::stdin();
    let failures = run_loop(stdin.lock(), io::stdout(), args.quiet)?;
    Ok(if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// One command per line until EOF or `quit`. A bad line is reported on
/// stderr and the loop moves on. Returns how many lines failed.
fn run_loop<R: BufRead, W: Write>(mut input: R, mut out: W, quiet: bool) -> Result<usize> {
    let mut failures = 0;

    loop {
        if !quiet {
            write!(out, "> ")?;
            out.flush()?;
        }
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Ok(Command::Quit) = Command::from_line(line) {
            break;
        }
        match eval_line(line) {
            Ok(text) => writeln!(out, "{}", text)?,
            Err(err) => {
                failures += 1;
                eprintln!("{}", err);
            }
        }
    }

    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, quiet: bool) -> (String, usize) {
        let mut out = Vec::new();
        let failures = run_loop(input.as_bytes(), &mut out, quiet).unwrap();
        (String::from_utf8(out).unwrap(), failures)
    }

    #[test]
    fn errors_do_not_stop_the_loop() {
        let (out, failures) = run("p # q\np & q\nquit\nq\n", true);
        assert_eq!(failures, 1);
        assert!(out.contains("Formula:   p ∧ q"));
        assert!(!out.contains("Formula:   q\n"));
        assert!(!out.ends_with("Formula:   q"));
    }

    #[test]
    fn clean_input_has_no_failures() {
        let (out, failures) = run("free forall x. P(x, y)\n\nexit\n", true);
        assert_eq!(failures, 0);
        assert_eq!(out, "y\n");
    }

    #[test]
    fn prompts_unless_quiet() {
        let (out, failures) = run("p\n", false);
        assert_eq!(failures, 0);
        assert!(out.starts_with("> Formula:   p\n"));
        assert!(out.ends_with("> "));
    }
}
