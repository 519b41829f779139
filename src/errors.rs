use crate::lexer::Token;
use thiserror::Error;

/// Errors from the parser share the vocabulary of LALRPOP-generated parsers:
///
/// * `User { error }` wraps a [`SyntaxError`]: a bad character or input
///   nested deeper than the parser accepts
/// * `UnrecognizedToken` / `UnrecognizedEof` report a structural violation
///   along with the list of expected tokens
/// * `ExtraToken` means a complete formula was followed by trailing input
///
/// `InvalidToken` is never produced, the lexer reports bad characters itself.
pub type ParseError = lalrpop_util::ParseError<usize, Token, SyntaxError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unrecognized character `{found}` at position {position}")]
pub struct LexError {
    pub position: usize,
    pub found: char,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("formula nested more than {limit} levels deep at position {position}")]
    TooDeep { position: usize, limit: usize },
}

impl SyntaxError {
    pub fn position(&self) -> usize {
        match *self {
            SyntaxError::Lex(ref err) => err.position,
            SyntaxError::TooDeep { position, .. } => position,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubstitutionError {
    #[error("function {0} applied to no arguments")]
    EmptyApplication(String),
    #[error("term contains a symbol with an empty name")]
    EmptyName,
}

/// Position (character offset) where parsing went wrong.
pub fn error_position(err: &ParseError) -> usize {
    use lalrpop_util::ParseError::*;
    match *err {
        InvalidToken { location } | UnrecognizedEof { location, .. } => location,
        UnrecognizedToken {
            token: (start, _, _),
            ..
        }
        | ExtraToken {
            token: (start, _, _),
        } => start,
        User { ref error } => error.position(),
    }
}

/// True for a well-formed prefix followed by unconsumed tokens.
pub fn is_trailing_input(err: &ParseError) -> bool {
    match *err {
        lalrpop_util::ParseError::ExtraToken { .. } => true,
        _ => false,
    }
}

fn describe_parse_error(err: &ParseError) -> String {
    match *err {
        lalrpop_util::ParseError::User {
            error: SyntaxError::Lex(ref error),
        } => format!("lex error: {}", error),
        lalrpop_util::ParseError::User { ref error } => {
            format!("parse error: {}", error)
        }
        lalrpop_util::ParseError::ExtraToken {
            token: (start, ref tok, _),
        } => format!(
            "parse error: unexpected {} after complete formula at position {}",
            tok, start
        ),
        _ => format!("parse error: {}", err),
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{}", describe_parse_error(.0))]
    Parse(#[from] ParseError),
    #[error("substitution error: {0}")]
    Subst(#[from] SubstitutionError),
    /// the line did not match any command syntax
    #[error("usage: {0}")]
    Usage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions() {
        let lex: ParseError = lalrpop_util::ParseError::User {
            error: SyntaxError::Lex(LexError {
                position: 2,
                found: '#',
            }),
        };
        assert_eq!(error_position(&lex), 2);
        assert!(!is_trailing_input(&lex));

        let extra: ParseError = lalrpop_util::ParseError::ExtraToken {
            token: (1, Token::RParen, 2),
        };
        assert_eq!(error_position(&extra), 1);
        assert!(is_trailing_input(&extra));
    }

    #[test]
    fn messages() {
        let err = CommandError::Parse(lalrpop_util::ParseError::User {
            error: SyntaxError::Lex(LexError {
                position: 2,
                found: '#',
            }),
        });
        assert_eq!(
            err.to_string(),
            "lex error: unrecognized character `#` at position 2"
        );
        assert_eq!(
            CommandError::Subst(SubstitutionError::EmptyApplication("f".into()))
                .to_string(),
            "substitution error: function f applied to no arguments"
        );

        let deep = CommandError::from(ParseError::User {
            error: SyntaxError::TooDeep {
                position: 7,
                limit: 256,
            },
        });
        assert_eq!(
            deep.to_string(),
            "parse error: formula nested more than 256 levels deep at position 7"
        );
        assert_eq!(
            CommandError::Usage("free <formula>".into()).to_string(),
            "usage: free <formula>"
        );
    }
}
