use crate::errors::LexError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// `(start, token, end)` with positions counted in characters.
pub type Spanned = (usize, Token, usize);

static IDENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{Alphabetic}[\p{Alphabetic}\p{N}]*")
        .expect("identifier pattern is valid")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    Not,
    And,
    Or,
    Implies,
    Bottom,
    Forall,
    Exists,
    Dot,
    Comma,
    LParen,
    RParen,
    EndOfInput,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Token::Ident(ref s) => write!(f, "{}", s),
            Token::Not => write!(f, "¬"),
            Token::And => write!(f, "∧"),
            Token::Or => write!(f, "∨"),
            Token::Implies => write!(f, "→"),
            Token::Bottom => write!(f, "⊥"),
            Token::Forall => write!(f, "∀"),
            Token::Exists => write!(f, "∃"),
            Token::Dot => write!(f, "."),
            Token::Comma => write!(f, ","),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Lazily splits input into tokens. Every spelling of a symbol maps to the
/// same token kind; the spelling itself is not kept.
pub struct Lexer<'input> {
    input: &'input str,
    /// byte offset into `input`
    offset: usize,
    /// character offset, reported in spans and errors
    position: usize,
    done: bool,
}

impl<'input> Lexer<'input> {
    pub fn new(input: &'input str) -> Lexer<'input> {
        Lexer {
            input,
            offset: 0,
            position: 0,
            done: false,
        }
    }

    fn rest(&self) -> &'input str {
        &self.input[self.offset..]
    }

    fn advance(&mut self, text: &str) {
        self.offset += text.len();
        self.position += text.chars().count();
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        let skipped = &rest[..rest.len() - trimmed.len()];
        self.advance(skipped);
    }

    /// Next token. Once the input is exhausted this keeps returning
    /// `EndOfInput`.
    pub fn next_token(&mut self) -> Result<Spanned, LexError> {
        self.skip_whitespace();
        let start = self.position;
        let rest = self.rest();

        let c = match rest.chars().next() {
            Some(c) => c,
            None => return Ok((start, Token::EndOfInput, start)),
        };

        if let Some(m) = IDENT.find(rest) {
            let word = m.as_str();
            let tok = match word {
                "forall" => Token::Forall,
                "exists" => Token::Exists,
                _ => Token::Ident(word.to_string()),
            };
            self.advance(word);
            return Ok((start, tok, self.position));
        }

        if rest.starts_with("->") {
            self.advance("->");
            return Ok((start, Token::Implies, self.position));
        }

        let tok = match c {
            '~' | '¬' | '!' => Token::Not,
            '&' | '∧' => Token::And,
            '|' | '∨' => Token::Or,
            '→' => Token::Implies,
            '⊥' | '_' => Token::Bottom,
            '∀' => Token::Forall,
            '∃' => Token::Exists,
            '.' => Token::Dot,
            ',' => Token::Comma,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => {
                return Err(LexError {
                    position: start,
                    found: c,
                })
            }
        };
        self.offset += c.len_utf8();
        self.position += 1;
        Ok((start, tok, self.position))
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = Result<Spanned, LexError>;

    /// Yields `EndOfInput` once, then stops. Also stops after the first
    /// error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_token();
        match item {
            Ok((_, Token::EndOfInput, _)) | Err(_) => self.done = true,
            Ok(_) => (),
        }
        Some(item)
    }
}

/// Tokenize the whole input, ending with `EndOfInput`.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(text)
        .map(|item| item.map(|(_, tok, _)| tok))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Token::*;

    fn ident(s: &str) -> Token {
        Ident(s.to_string())
    }

    #[test]
    fn ascii_spellings() {
        assert_eq!(
            tokenize("~p & q | r -> _").unwrap(),
            vec![
                Not,
                ident("p"),
                And,
                ident("q"),
                Or,
                ident("r"),
                Implies,
                Bottom,
                EndOfInput
            ]
        );
    }

    #[test]
    fn unicode_spellings_match_ascii() {
        assert_eq!(
            tokenize("¬p ∧ q ∨ r → ⊥").unwrap(),
            tokenize("!p & q | r -> _").unwrap()
        );
        assert_eq!(
            tokenize("∀x.∃y.R(x,y)").unwrap(),
            tokenize("forall x. exists y. R(x, y)").unwrap()
        );
    }

    #[test]
    fn identifiers() {
        assert_eq!(
            tokenize("prop1 Foo2 forallx").unwrap(),
            vec![ident("prop1"), ident("Foo2"), ident("forallx"), EndOfInput]
        );
        assert_eq!(
            tokenize("f(x,C)").unwrap(),
            vec![
                ident("f"),
                LParen,
                ident("x"),
                Comma,
                ident("C"),
                RParen,
                EndOfInput
            ]
        );
    }

    #[test]
    fn spans_count_characters() {
        let spans: Vec<Spanned> =
            Lexer::new("¬ pq").collect::<Result<_, _>>().unwrap();
        assert_eq!(
            spans,
            vec![(0, Not, 1), (2, ident("pq"), 4), (4, EndOfInput, 4)]
        );
    }

    #[test]
    fn unrecognized_character() {
        assert_eq!(
            tokenize("p # q"),
            Err(LexError {
                position: 2,
                found: '#'
            })
        );
        assert_eq!(
            tokenize("p - q"),
            Err(LexError {
                position: 2,
                found: '-'
            })
        );
    }

    #[test]
    fn stops_after_error() {
        let mut lexer = Lexer::new("# p");
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn empty_input() {
        assert_eq!(tokenize("   ").unwrap(), vec![EndOfInput]);
    }
}
