use crate::errors::SyntaxError;

/// A single token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Byte offset span in the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Word(String),
    Int(i64),
    /// `#N`: the object in slot `N`.
    Ref(usize),
}

/// Splits an operation script into tokens. `;` and whitespace separate tokens, `//`
/// starts a line comment.
pub fn lex(source: &str) -> Result<Vec<Token>, SyntaxError> {
    Scanner::new(source).scan_tokens()
}

struct Scanner<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Scanner<'src> {
    fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos + 1).copied()
    }

    fn scan_tokens(&mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_separators();
            let Some(ch) = self.peek() else {
                break;
            };
            let token = match ch {
                b'#' => self.scan_ref()?,
                b'-' | b'0'..=b'9' => self.scan_int()?,
                c if c.is_ascii_alphabetic() => self.scan_word(),
                _ => {
                    let found = self.source[self.pos..].chars().next().unwrap_or('?');
                    return Err(SyntaxError::new(
                        format!("unexpected character '{found}'"),
                        self.pos,
                        found.len_utf8(),
                    ));
                }
            };
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn skip_separators(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                b' ' | b'\t' | b'\r' | b'\n' | b';' => self.pos += 1,
                b'/' if self.peek_next() == Some(b'/') => {
                    while let Some(ch) = self.peek() {
                        if ch == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn scan_ref(&mut self) -> Result<Token, SyntaxError> {
        let start = self.pos;
        self.pos += 1;
        if self.eat_digits() == 0 {
            return Err(SyntaxError::new("expected a slot index after '#'", start, 1));
        }
        let text = &self.source[start + 1..self.pos];
        let index = text.parse::<usize>().map_err(|_| {
            SyntaxError::new("slot index out of range", start, self.pos - start)
        })?;
        Ok(Token {
            kind: TokenKind::Ref(index),
            span: Span::new(start, self.pos),
        })
    }

    fn scan_int(&mut self) -> Result<Token, SyntaxError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        if self.eat_digits() == 0 {
            return Err(SyntaxError::new("expected digits after '-'", start, 1));
        }
        let text = &self.source[start..self.pos];
        let value = text.parse::<i64>().map_err(|_| {
            SyntaxError::new("integer literal out of range", start, self.pos - start)
        })?;
        Ok(Token {
            kind: TokenKind::Int(value),
            span: Span::new(start, self.pos),
        })
    }

    fn scan_word(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == b'_')
        {
            self.pos += 1;
        }
        Token {
            kind: TokenKind::Word(self.source[start..self.pos].to_ascii_lowercase()),
            span: Span::new(start, self.pos),
        }
    }
}
