//! Front end for propositional and first-order logic: parse formulas into
//! immutable trees, compute free variables and substitute terms for
//! variables without capture.

pub mod errors;
pub mod free;
pub mod lexer;
pub mod parser;
pub mod program;
pub mod subst;
pub mod syntax;
pub mod wasm;


use std::collections::BTreeSet;
use std::fmt;

pub use errors::{
    error_position, is_trailing_input, CommandError, LexError, ParseError,
    SubstitutionError, SyntaxError,
};
pub use free::FreeVars;
pub use lexer::{tokenize, Lexer, Token};
pub use parser::{parse, parse_term, MAX_DEPTH};
pub use program::{eval_line, Command};
pub use subst::{alpha_eq, fresh_name, is_free_for, substitute, Substitutable};
pub use syntax::{Formula, Term};

/// Names of the variables of `node` not bound by an enclosing quantifier.
pub fn free_variables<N: FreeVars + ?Sized>(node: &N) -> BTreeSet<String> {
    node.free_vars()
}

/// Canonical, re-parseable rendering of a term or formula.
pub fn format<N: fmt::Display + ?Sized>(node: &N) -> String {
    node.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str) -> Formula {
        Formula::atom(name, vec![])
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn check_precedence() {
        assert_eq!(
            parse("p -> q -> r").unwrap(),
            Formula::implies(p("p"), Formula::implies(p("q"), p("r")))
        );
        assert_eq!(
            parse("p & q & r").unwrap(),
            Formula::and(Formula::and(p("p"), p("q")), p("r"))
        );
        assert_eq!(parse("p & q -> r").unwrap(), parse("(p & q) -> r").unwrap());
        assert_eq!(parse("~p").unwrap(), parse("¬p").unwrap());
        assert_eq!(parse("¬p").unwrap(), parse("!p").unwrap());
    }

    #[test]
    fn check_free_variables() {
        assert_eq!(
            free_variables(&parse("forall x. P(x, y)").unwrap()),
            set(&["y"])
        );
        assert_eq!(free_variables(&parse("P(x)").unwrap()), set(&["x"]));
        assert_eq!(
            free_variables(&parse("forall x. exists y. R(x,y)").unwrap()),
            set(&[])
        );
        assert_eq!(
            free_variables(&Term::app("f", vec![Term::var("z")])),
            set(&["z"])
        );
    }

    #[test]
    fn check_capture_avoidance() {
        let f = parse("∀y.P(x,y)").unwrap();
        let result = substitute(&f, "x", &Term::var("y")).unwrap();
        assert_eq!(format(&result), "∀y1.P(y, y1)");
        assert_eq!(
            result,
            Formula::forall(
                "y1",
                Formula::atom("P", vec![Term::var("y"), Term::var("y1")])
            )
        );
    }

    #[test]
    fn check_errors() {
        assert!(!is_trailing_input(&parse("p &").unwrap_err()));
        assert!(parse("(p").is_err());
        match parse("p # q") {
            Err(ParseError::User { error }) => assert_eq!(error.position(), 2),
            other => panic!("expected a lex error, got {:?}", other),
        }
    }

    #[test]
    fn check_round_trip() {
        for text in &[
            "p",
            "(p & (p -> q)) -> q",
            "~(p & q) -> (~p | ~q)",
            "(forall x. P(x)) & Q(x)",
            "~exists x. P(x) -> q",
            "forall x. (P(x) -> exists y. R(x, f(y, C)))",
            "⊥ -> p",
        ] {
            let f = parse(text).unwrap();
            assert_eq!(parse(&format(&f)).unwrap(), f, "{}", text);
        }
    }
}
