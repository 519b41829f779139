//! Recursive descent parser for formulas and terms.
//!
//! Precedence, tightest first: quantifiers, negation, conjunction,
//! disjunction, implication. Conjunction and disjunction associate to the
//! left, implication to the right. A quantifier body extends as far to the
//! right as possible, so `forall x. p & q` is `forall x. (p & q)`.
//!
//! Nesting is bounded by [`MAX_DEPTH`], both the parser's own recursion
//! (parentheses, negations, quantifiers, function applications) and the
//! height of the tree it returns. Deeper input is a
//! [`SyntaxError::TooDeep`], so later traversals of a parsed tree cannot
//! exhaust the stack either.

use crate::errors::{ParseError, SyntaxError};
use crate::lexer::{Lexer, Spanned, Token};
use crate::syntax::{Formula, Term};
use lalrpop_util::ParseError as Error;
use std::mem;
use tracing::trace;

/// Deepest nesting accepted by [`parse`] and [`parse_term`].
pub const MAX_DEPTH: usize = 256;

/// A formula together with the height of its tree.
type Parsed = (Formula, usize);

pub struct Parser<'input> {
    lexer: Lexer<'input>,
    lookahead: Spanned,
    depth: usize,
}

impl<'input> Parser<'input> {
    pub fn new(input: &'input str) -> Result<Parser<'input>, ParseError> {
        let mut lexer = Lexer::new(input);
        let lookahead = lexer.next_token().map_err(|err| Error::User {
            error: SyntaxError::from(err),
        })?;
        Ok(Parser {
            lexer,
            lookahead,
            depth: 0,
        })
    }

    /// Parse a complete formula; anything left over is an error.
    pub fn parse_formula(mut self) -> Result<Formula, ParseError> {
        let (formula, _) = self.implication()?;
        self.finish()?;
        Ok(formula)
    }

    /// Parse a complete term; anything left over is an error.
    pub fn parse_term(mut self) -> Result<Term, ParseError> {
        let term = self.term()?;
        self.finish()?;
        Ok(term)
    }

    fn finish(self) -> Result<(), ParseError> {
        match self.lookahead {
            (_, Token::EndOfInput, _) => Ok(()),
            token => Err(Error::ExtraToken { token }),
        }
    }

    fn peek(&self) -> &Token {
        &self.lookahead.1
    }

    fn bump(&mut self) -> Result<Spanned, ParseError> {
        let next = self.lexer.next_token().map_err(|err| Error::User {
            error: SyntaxError::from(err),
        })?;
        Ok(mem::replace(&mut self.lookahead, next))
    }

    fn eat(&mut self, tok: &Token) -> Result<bool, ParseError> {
        if self.peek() == tok {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn unexpected(&self, expected: &[&str]) -> ParseError {
        let expected = expected.iter().map(|s| s.to_string()).collect();
        match self.lookahead {
            (location, Token::EndOfInput, _) => {
                Error::UnrecognizedEof { location, expected }
            }
            ref token => Error::UnrecognizedToken {
                token: token.clone(),
                expected,
            },
        }
    }

    fn expect(&mut self, tok: Token, name: &str) -> Result<(), ParseError> {
        if self.eat(&tok)? {
            Ok(())
        } else {
            Err(self.unexpected(&[name]))
        }
    }

    fn too_deep(&self) -> ParseError {
        Error::User {
            error: SyntaxError::TooDeep {
                position: self.lookahead.0,
                limit: MAX_DEPTH,
            },
        }
    }

    /// Step one level further into the input. Paired with `leave`.
    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.too_deep());
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Height of a node whose tallest child has height `height`.
    fn grow(&self, height: usize) -> Result<usize, ParseError> {
        if height >= MAX_DEPTH {
            Err(self.too_deep())
        } else {
            Ok(height + 1)
        }
    }

    fn combine(
        &self,
        (left, lh): Parsed,
        (right, rh): Parsed,
        build: fn(Formula, Formula) -> Formula,
    ) -> Result<Parsed, ParseError> {
        let height = self.grow(lh.max(rh))?;
        Ok((build(left, right), height))
    }

    fn ident(&mut self, name: &str) -> Result<String, ParseError> {
        if let Token::Ident(_) = self.lookahead.1 {
            if let (_, Token::Ident(s), _) = self.bump()? {
                return Ok(s);
            }
        }
        Err(self.unexpected(&[name]))
    }

    fn implication(&mut self) -> Result<Parsed, ParseError> {
        let first = self.disjunction()?;
        let mut rest = vec![];
        while self.eat(&Token::Implies)? {
            rest.push(self.disjunction()?);
        }
        // a -> b -> c groups as a -> (b -> c)
        let mut consequent = match rest.pop() {
            Some(last) => last,
            None => return Ok(first),
        };
        while let Some(antecedent) = rest.pop() {
            consequent = self.combine(antecedent, consequent, Formula::implies)?;
        }
        self.combine(first, consequent, Formula::implies)
    }

    fn disjunction(&mut self) -> Result<Parsed, ParseError> {
        let mut left = self.conjunction()?;
        while self.eat(&Token::Or)? {
            let right = self.conjunction()?;
            left = self.combine(left, right, Formula::or)?;
        }
        Ok(left)
    }

    fn conjunction(&mut self) -> Result<Parsed, ParseError> {
        let mut left = self.unary()?;
        while self.eat(&Token::And)? {
            let right = self.unary()?;
            left = self.combine(left, right, Formula::and)?;
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Parsed, ParseError> {
        match self.lookahead.1 {
            Token::Not => {
                self.bump()?;
                self.enter()?;
                let (operand, height) = self.unary()?;
                self.leave();
                Ok((Formula::not(operand), self.grow(height)?))
            }
            Token::Forall => {
                self.bump()?;
                let (x, (body, height)) = self.quantified()?;
                Ok((Formula::Forall(x, Box::new(body)), self.grow(height)?))
            }
            Token::Exists => {
                self.bump()?;
                let (x, (body, height)) = self.quantified()?;
                Ok((Formula::Exists(x, Box::new(body)), self.grow(height)?))
            }
            _ => self.primary(),
        }
    }

    /// Binder and body, after the quantifier keyword.
    fn quantified(&mut self) -> Result<(String, Parsed), ParseError> {
        let is_variable = match self.lookahead.1 {
            Token::Ident(ref s) => starts_lowercase(s),
            _ => false,
        };
        if !is_variable {
            return Err(self.unexpected(&["variable"]));
        }
        let x = self.ident("variable")?;
        self.expect(Token::Dot, "\".\"")?;
        self.enter()?;
        let body = self.implication()?;
        self.leave();
        Ok((x, body))
    }

    fn primary(&mut self) -> Result<Parsed, ParseError> {
        match self.lookahead.1 {
            Token::LParen => {
                self.bump()?;
                self.enter()?;
                let formula = self.implication()?;
                self.leave();
                self.expect(Token::RParen, "\")\"")?;
                Ok(formula)
            }
            Token::Bottom => {
                self.bump()?;
                Ok((Formula::Bottom, 1))
            }
            Token::Ident(_) => {
                let name = self.ident("identifier")?;
                let args = if self.eat(&Token::LParen)? {
                    self.term_list()?
                } else {
                    vec![]
                };
                Ok((Formula::Atom(name, args), 1))
            }
            _ => Err(self.unexpected(&[
                "\"(\"",
                "\"⊥\"",
                "\"¬\"",
                "\"∀\"",
                "\"∃\"",
                "identifier",
            ])),
        }
    }

    /// Arguments after an opening parenthesis, through the closing one.
    fn term_list(&mut self) -> Result<Vec<Term>, ParseError> {
        let mut args = vec![self.term()?];
        while self.eat(&Token::Comma)? {
            args.push(self.term()?);
        }
        if !self.eat(&Token::RParen)? {
            return Err(self.unexpected(&["\",\"", "\")\""]));
        }
        Ok(args)
    }

    fn term(&mut self) -> Result<Term, ParseError> {
        let name = self.ident("term")?;
        if self.eat(&Token::LParen)? {
            self.enter()?;
            let args = self.term_list()?;
            self.leave();
            Ok(Term::App(name, args))
        } else if starts_lowercase(&name) {
            Ok(Term::Var(name))
        } else {
            Ok(Term::Const(name))
        }
    }
}

fn starts_lowercase(name: &str) -> bool {
    name.chars().next().map_or(false, char::is_lowercase)
}

/// Parse a formula.
///
/// Inside argument lists, an identifier followed by `(` is a function
/// application; otherwise one starting with a lowercase letter is a variable
/// and any other is a constant. This is a naming convention only: `x` is
/// always a variable and `C` always a constant, whether or not a quantifier
/// binds that name.
pub fn parse(text: &str) -> Result<Formula, ParseError> {
    trace!(text, "parsing formula");
    let result = Parser::new(text)?.parse_formula();
    trace!(ok = result.is_ok(), "parsed formula");
    result
}

/// Parse a single term, using the same naming convention as [`parse`].
pub fn parse_term(text: &str) -> Result<Term, ParseError> {
    Parser::new(text)?.parse_term()
}
