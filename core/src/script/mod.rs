//! A tiny operation language for driving a [`Context`](crate::Context) from text:
//! `int 1; int 2; pair; pop; collect`.

mod exec;
pub mod lexer;

pub use exec::{Outcome, Snapshot, execute};

use std::fmt;

use crate::errors::SyntaxError;
use lexer::{Span, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Allocate an integer and root it.
    Int(i32),
    /// Pair the two topmost roots.
    Pair,
    Pop,
    /// Root the object in the given slot.
    Push(usize),
    /// Print the object in the given slot.
    Show(usize),
    /// Point the head of the first pair at the second object.
    SetHead(usize, usize),
    SetTail(usize, usize),
    Collect,
    Stats,
    Roots,
}

pub const OPERATIONS: [&str; 10] = [
    "int", "pair", "pop", "push", "show", "sethead", "settail", "collect", "stats", "roots",
];

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Int(value) => write!(f, "int {value}"),
            Op::Pair => write!(f, "pair"),
            Op::Pop => write!(f, "pop"),
            Op::Push(index) => write!(f, "push #{index}"),
            Op::Show(index) => write!(f, "show #{index}"),
            Op::SetHead(pair, value) => write!(f, "sethead #{pair} #{value}"),
            Op::SetTail(pair, value) => write!(f, "settail #{pair} #{value}"),
            Op::Collect => write!(f, "collect"),
            Op::Stats => write!(f, "stats"),
            Op::Roots => write!(f, "roots"),
        }
    }
}

/// Parse a script into the operations it names.
pub fn parse(source: &str) -> Result<Vec<Op>, SyntaxError> {
    let tokens = lexer::lex(source)?;
    Parser::new(tokens, source.len()).parse_ops()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>, eof: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            eof,
        }
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    fn parse_ops(&mut self) -> Result<Vec<Op>, SyntaxError> {
        let mut ops = Vec::new();
        while let Some(token) = self.advance() {
            ops.push(self.parse_op(token)?);
        }
        Ok(ops)
    }

    fn parse_op(&mut self, token: Token) -> Result<Op, SyntaxError> {
        let TokenKind::Word(word) = &token.kind else {
            return Err(error_at("expected an operation", token.span));
        };
        match word.as_str() {
            "int" => self.expect_int(&token).map(Op::Int),
            "pair" => Ok(Op::Pair),
            "pop" => Ok(Op::Pop),
            "push" => self.expect_ref(&token).map(Op::Push),
            "show" => self.expect_ref(&token).map(Op::Show),
            "sethead" => {
                let pair = self.expect_ref(&token)?;
                Ok(Op::SetHead(pair, self.expect_ref(&token)?))
            }
            "settail" => {
                let pair = self.expect_ref(&token)?;
                Ok(Op::SetTail(pair, self.expect_ref(&token)?))
            }
            "collect" | "gc" => Ok(Op::Collect),
            "stats" => Ok(Op::Stats),
            "roots" => Ok(Op::Roots),
            other => Err(error_at(format!("unknown operation '{other}'"), token.span)),
        }
    }

    fn expect_int(&mut self, op: &Token) -> Result<i32, SyntaxError> {
        match self.advance() {
            Some(Token {
                kind: TokenKind::Int(value),
                span,
            }) => i32::try_from(value)
                .map_err(|_| error_at("integer does not fit in 32 bits", span)),
            Some(other) => Err(error_at("expected an integer", other.span)),
            None => Err(self.missing_operand(op, "an integer")),
        }
    }

    fn expect_ref(&mut self, op: &Token) -> Result<usize, SyntaxError> {
        match self.advance() {
            Some(Token {
                kind: TokenKind::Ref(index),
                ..
            }) => Ok(index),
            Some(other) => Err(error_at("expected a slot reference like #3", other.span)),
            None => Err(self.missing_operand(op, "a slot reference")),
        }
    }

    fn missing_operand(&self, op: &Token, what: &str) -> SyntaxError {
        SyntaxError::new(format!("expected {what} after '{}'", op_name(op)), self.eof, 0)
    }
}

fn op_name(token: &Token) -> &str {
    match &token.kind {
        TokenKind::Word(word) => word,
        _ => "?",
    }
}

fn error_at(message: impl Into<String>, span: Span) -> SyntaxError {
    SyntaxError::new(message, span.start, span.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_operation() {
        let ops = parse("int 7; pair; pop; push #2; show #0; settail #1 #1; collect; stats; roots")
            .expect("parse");
        assert_eq!(
            ops,
            vec![
                Op::Int(7),
                Op::Pair,
                Op::Pop,
                Op::Push(2),
                Op::Show(0),
                Op::SetTail(1, 1),
                Op::Collect,
                Op::Stats,
                Op::Roots,
            ]
        );
    }

    #[test]
    fn rejects_unknown_operation() {
        let err = parse("int 1; frob").unwrap_err();
        assert!(err.message.contains("frob"));
        assert_eq!(err.span.offset(), 7);
    }

    #[test]
    fn int_requires_operand() {
        let err = parse("int").unwrap_err();
        assert!(err.message.contains("integer"));
    }

    #[test]
    fn int_rejects_out_of_range_literal() {
        assert!(parse("int 4294967296").is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let op = Op::SetHead(12, 3);
        assert_eq!(parse(&op.to_string()).expect("parse"), vec![op]);
    }
}
