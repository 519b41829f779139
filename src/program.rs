use crate::errors::CommandError;
use crate::free::FreeVars;
use crate::lexer::{Lexer, Token};
use crate::parser::{parse, parse_term};
use crate::subst::substitute;
use crate::syntax::Formula;
use tracing::trace;

pub const HELP: &str = "\
Commands:
  parse <formula>                    show a formula (also: a bare formula)
  free <formula>                     list its free variables
  subst <var> := <term> in <formula> capture-avoiding substitution
  examples                           parse the built-in examples
  help                               show this message
  quit                               exit

Propositional:
  atoms p, q, r   negation ~p ¬p !p   conjunction p & q, p ∧ q
  disjunction p | q, p ∨ q   implication p -> q, p → q   bottom ⊥ _
First-order:
  predicates P(x), Q(x, y)   functions f(x), g(x, y)   constants C, D
  forall x. P(x) or ∀x. P(x)   exists x. P(x) or ∃x. P(x)";

const PROPOSITIONAL_EXAMPLES: &[(&str, &str)] = &[
    ("Simple atom", "p"),
    ("Negation", "~p"),
    ("Conjunction", "p & q"),
    ("Disjunction", "p | q"),
    ("Implication", "p -> q"),
    ("Modus ponens", "(p & (p -> q)) -> q"),
    ("De Morgan", "~(p & q) -> (~p | ~q)"),
    ("Contraposition", "(p -> q) -> (~q -> ~p)"),
    ("Bottom elimination", "⊥ -> p"),
    ("Double negation", "p -> ~~p"),
];

const FIRST_ORDER_EXAMPLES: &[(&str, &str)] = &[
    ("Predicate", "P(x)"),
    ("Binary relation", "R(x, y)"),
    ("Universal", "forall x. P(x)"),
    ("Existential", "exists x. P(x)"),
    ("Universal conditional", "forall x. (P(x) -> Q(x))"),
    ("Existential conjunction", "exists x. (P(x) & Q(x))"),
    ("Nested quantifiers", "forall x. exists y. R(x, y)"),
    ("Function application", "P(f(x))"),
    ("Complex", "forall x. (P(x) -> exists y. R(x, y))"),
    ("Unicode quantifiers", "∀x. ∃y. R(x, y)"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Parse(String),
    Free(String),
    Subst {
        var: String,
        term: String,
        formula: String,
    },
    Examples,
    Help,
    Quit,
}

impl Command {
    /// Recognize a command line. Anything that is not a command, including
    /// a formula that merely starts with a command word (`quit & p`), is
    /// parsed as a formula.
    pub fn from_line(line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        let (head, rest) = match line.find(char::is_whitespace) {
            Some(i) => (&line[..i], line[i..].trim()),
            None => (line, ""),
        };
        if line.is_empty() {
            return Err(CommandError::Usage("empty input".into()));
        }
        if continues_formula(rest) {
            return Ok(Command::Parse(line.to_string()));
        }
        match (head, rest.is_empty()) {
            ("help", true) | ("?", true) => Ok(Command::Help),
            ("quit", true) | ("exit", true) => Ok(Command::Quit),
            ("examples", true) => Ok(Command::Examples),
            ("parse", false) => Ok(Command::Parse(rest.to_string())),
            ("free", false) => Ok(Command::Free(rest.to_string())),
            ("subst", false) => parse_subst(rest),
            _ => Ok(Command::Parse(line.to_string())),
        }
    }
}

/// Whether `rest` opens with a binary connective, making the head word an
/// atom rather than a command.
fn continues_formula(rest: &str) -> bool {
    match Lexer::new(rest).next_token() {
        Ok((_, Token::And, _)) | Ok((_, Token::Or, _)) | Ok((_, Token::Implies, _)) => true,
        _ => false,
    }
}

fn parse_subst(rest: &str) -> Result<Command, CommandError> {
    let usage = || CommandError::Usage("subst <var> := <term> in <formula>".into());
    let (var, rest) = rest.split_once(":=").ok_or_else(usage)?;
    let (term, formula) = rest.split_once(" in ").ok_or_else(usage)?;
    let (var, term, formula) = (var.trim(), term.trim(), formula.trim());
    if var.is_empty() || term.is_empty() || formula.is_empty() {
        return Err(usage());
    }
    Ok(Command::Subst {
        var: var.to_string(),
        term: term.to_string(),
        formula: formula.to_string(),
    })
}

/// Evaluate one line of input. `Quit` evaluates to an empty string; stopping
/// is up to the caller.
pub fn eval_line(line: &str) -> Result<String, CommandError> {
    eval_cmd(Command::from_line(line)?)
}

pub fn eval_cmd(cmd: Command) -> Result<String, CommandError> {
    trace!(?cmd, "evaluating command");
    match cmd {
        Command::Parse(ref text) => Ok(describe(&parse(text)?)),
        Command::Free(ref text) => {
            let vars = parse(text)?.free_vars();
            if vars.is_empty() {
                Ok("none".to_string())
            } else {
                Ok(vars.into_iter().collect::<Vec<String>>().join(", "))
            }
        }
        Command::Subst {
            ref var,
            ref term,
            ref formula,
        } => {
            let variable = parse_term(var)?;
            let varname = match variable {
                crate::syntax::Term::Var(name) => name,
                other => {
                    return Err(CommandError::Usage(format!(
                        "{} is not a variable",
                        other
                    )))
                }
            };
            let term = parse_term(term)?;
            let formula = parse(formula)?;
            Ok(substitute(&formula, &varname, &term)?.to_string())
        }
        Command::Examples => Ok(run_examples()),
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => Ok(String::new()),
    }
}

fn describe(formula: &Formula) -> String {
    let mut lines = vec![
        format!("Formula:   {}", formula),
        format!("Kind:      {}", formula.kind()),
    ];
    let free = formula.free_vars();
    if !free.is_empty() {
        lines.push(format!(
            "Free vars: {}",
            free.into_iter().collect::<Vec<String>>().join(", ")
        ));
    }
    match formula.children().as_slice() {
        [left, right] => {
            lines.push(format!("Left:      {}", left));
            lines.push(format!("Right:     {}", right));
        }
        [sub] => lines.push(format!("Subformula: {}", sub)),
        _ => (),
    }
    lines.join("\n")
}

fn run_examples() -> String {
    let mut out = Vec::new();
    for &(title, examples) in &[
        ("Propositional Logic:", PROPOSITIONAL_EXAMPLES),
        ("First-Order Logic:", FIRST_ORDER_EXAMPLES),
    ] {
        out.push(title.to_string());
        for &(name, text) in examples {
            let status = match parse(text) {
                Ok(f) => format!("ok    {}", f),
                Err(e) => format!("error {}", e),
            };
            out.push(format!("  {:<24} {:<40} {}", name, text, status));
        }
    }
    out.join("\n")
}
