//! Lexer (scanner) for hedge source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! The scanner walks the source bytes with a single forward cursor and never
//! copies text: every token spelling is a slice of the input.
//!
//! One rule is worth knowing before reading any hedge program: a `-` that is
//! immediately followed by a digit always starts a negative number literal,
//! whatever came before it. `a -4` is therefore the identifier `a` followed by
//! the literal `-4`, not a subtraction. Write `a - 4` to subtract.

use super::token::{keyword, Token, TokenKind};
use std::fmt;

/// What went wrong while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A `"` with no closing `"` before end of input.
    UnterminatedString,
    /// A character that starts no token.
    UnexpectedCharacter(char),
    /// `!` not followed by `=`.
    LoneBang,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnterminatedString => write!(f, "Unterminated string literal"),
            LexErrorKind::UnexpectedCharacter(c) => {
                write!(f, "Unexpected character: '{}'", c.escape_debug())
            }
            LexErrorKind::LoneBang => write!(f, "Expected '=' after '!'"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte offset where the offending token starts.
    pub offset: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lexer error at byte {}: {}", self.offset, self.kind)
    }
}

impl std::error::Error for LexError {}

/// Scan `source` into tokens, ending with [`TokenKind::Eof`].
pub fn scan(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(source).tokenize()
}

/// Lexer for hedge source code
pub struct Lexer<'src> {
    source: &'src str,
    position: usize,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token<'src>>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token::eof(self.position));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Scan one token starting at the cursor. Whitespace has already been
    /// skipped and the cursor is not at the end.
    fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        let start = self.position;
        let ch = self.advance().ok_or(LexError {
            kind: LexErrorKind::UnexpectedCharacter('\0'),
            offset: start,
        })?;

        let kind = match ch {
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'{' => TokenKind::LeftBrace,
            b'}' => TokenKind::RightBrace,
            b'[' => TokenKind::LeftBracket,
            b']' => TokenKind::RightBracket,
            b'+' => TokenKind::Plus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'<' => TokenKind::Less,
            b'>' => TokenKind::Greater,
            b'.' => TokenKind::Period,
            b'?' => TokenKind::Question,
            b',' => TokenKind::Comma,

            b'-' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.number_literal()
                } else {
                    TokenKind::Minus
                }
            }
            b'=' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                }
            }
            b'!' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::BangEqual
                } else {
                    return Err(LexError {
                        kind: LexErrorKind::LoneBang,
                        offset: start,
                    });
                }
            }

            b'"' => self.string_literal(start)?,
            b'0'..=b'9' => self.number_literal(),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier_or_keyword(start),

            _ => {
                // Report the whole character, not just its first byte.
                let c = self.source[start..].chars().next().unwrap_or('\0');
                return Err(LexError {
                    kind: LexErrorKind::UnexpectedCharacter(c),
                    offset: start,
                });
            }
        };

        Ok(Token::new(kind, &self.source[start..self.position], start))
    }

    /// Scan the rest of a string literal; the opening quote is consumed.
    /// The spelling keeps both quotes.
    fn string_literal(&mut self, start: usize) -> Result<TokenKind, LexError> {
        while let Some(ch) = self.advance() {
            if ch == b'"' {
                return Ok(TokenKind::String);
            }
        }

        Err(LexError {
            kind: LexErrorKind::UnterminatedString,
            offset: start,
        })
    }

    /// Scan the digits of a number, plus a fractional part when a `.` is
    /// directly followed by another digit. The first digit (or the leading
    /// `-`) is already consumed.
    fn number_literal(&mut self) -> TokenKind {
        self.skip_digits();

        if self.peek() == Some(b'.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume '.'
            self.skip_digits();
            TokenKind::Float
        } else {
            TokenKind::Integer
        }
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Scan an identifier and check it against the keyword table
    fn identifier_or_keyword(&mut self, start: usize) -> TokenKind {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_')
        {
            self.advance();
        }

        keyword(&self.source[start..self.position]).unwrap_or(TokenKind::Identifier)
    }

    /// Skip spaces, tabs and line breaks
    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.advance();
        }
    }

    /// Peek at current byte without consuming
    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.position).copied()
    }

    /// Peek ahead n bytes
    fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.source.as_bytes().get(self.position + n).copied()
    }

    /// Advance to next byte
    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }
}
