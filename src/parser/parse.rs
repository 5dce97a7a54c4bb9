//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: Parsing `fun` declarations
//! - `statements`: Parsing statements and their terminators
//! - `expressions`: Parsing expressions, one method per precedence level
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! The parser never backtracks. The one place where the grammar needs to look
//! ahead (an identifier that may start an assignment) uses [`Parser::peek_ahead`]
//! without consuming anything.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, LexErrorKind, Lexer};
use crate::parser::token::{Token, TokenKind};
use std::fmt;

/// Deepest allowed nesting of brackets, blocks, loop bodies and unary
/// operators. Deeper input is a [`ParseErrorKind::NestingTooDeep`] fault
/// instead of a stack overflow.
pub const MAX_NESTING: usize = 128;

/// What kind of structural fault stopped the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A specific token was required here.
    ExpectedToken { expected: TokenKind, found: TokenKind },
    /// A statement body was not followed by `.` or `?`.
    BadTerminator { found: TokenKind },
    /// The token cannot start an expression.
    UnexpectedToken { found: TokenKind },
    /// A mandatory keyword (such as `gotcha` after a `try` body) is missing.
    MissingKeyword { keyword: TokenKind, found: TokenKind },
    /// A literal whose spelling cannot be represented (integer overflow).
    InvalidLiteral,
    /// Brackets, blocks or unary operators nested past [`MAX_NESTING`].
    NestingTooDeep,
    /// The source could not be scanned.
    Lex(LexErrorKind),
}

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset of the offending token.
    pub offset: usize,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error at byte {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            kind: ParseErrorKind::Lex(err.kind),
            offset: err.offset,
            message: err.kind.to_string(),
        }
    }
}

/// Recursive descent parser for hedge
pub struct Parser<'src> {
    pub(crate) tokens: Vec<Token<'src>>,
    pub(crate) position: usize,
    /// Cleared while parsing a `loop` condition, whose body opens with `(`.
    pub(crate) allow_calls: bool,
    /// Current nesting level, see [`Parser::nested`].
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Create a parser over an already scanned token list.
    ///
    /// The list ends at its first end-of-input marker: any tokens after it
    /// are dropped. A list without one gets one appended.
    pub fn new(mut tokens: Vec<Token<'src>>) -> Self {
        match tokens.iter().position(|t| t.kind == TokenKind::Eof) {
            Some(end) => tokens.truncate(end + 1),
            None => {
                let offset = tokens.last().map_or(0, |t| t.offset + t.spelling.len());
                tokens.push(Token::eof(offset));
            }
        }

        Self {
            tokens,
            position: 0,
            allow_calls: true,
            depth: 0,
        }
    }

    /// Scan `source` and create a parser over its tokens.
    pub fn from_source(source: &'src str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::new(tokens))
    }

    /// Parse the entire program, stopping at the first fault
    pub fn parse_program(&mut self) -> Result<Vec<Statement<'src>>, ParseError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse the entire program, collecting every fault.
    ///
    /// After a fault the parser skips forward from the start of the broken
    /// statement to its terminator (ignoring terminators inside braces) and
    /// carries on with the next statement.
    pub fn parse_program_recovering(&mut self) -> (Vec<Statement<'src>>, Vec<ParseError>) {
        let mut statements = Vec::new();
        let mut errors = Vec::new();

        while !self.is_at_end() {
            let start = self.position;
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    errors.push(err);
                    self.position = start;
                    self.allow_calls = true;
                    self.synchronize();
                }
            }
        }

        (statements, errors)
    }

    /// Skip past the terminator of the current statement.
    fn synchronize(&mut self) {
        let mut depth = 0usize;

        while !self.is_at_end() {
            match self.advance().kind {
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => depth = depth.saturating_sub(1),
                kind if kind.is_terminator() && depth == 0 => break,
                _ => {}
            }
        }
    }

    // ===== Helper methods =====

    /// Run `parse` one nesting level deeper, failing once the level passes
    /// [`MAX_NESTING`].
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(
                ParseErrorKind::NestingTooDeep,
                format!("Nesting deeper than {} levels at {}", MAX_NESTING, self.peek()),
            ));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn peek(&self) -> &Token<'src> {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token<'src>> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token. The end-of-input marker is never consumed.
    pub(crate) fn advance(&mut self) -> Token<'src> {
        let token = *self.peek();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn error(&self, kind: ParseErrorKind, message: String) -> ParseError {
        ParseError {
            kind,
            offset: self.peek().offset,
            message,
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        ctx: &str,
    ) -> Result<Token<'src>, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(
                ParseErrorKind::ExpectedToken {
                    expected: kind,
                    found: self.peek_kind(),
                },
                format!("Expected {} {}, found {}", kind, ctx, self.peek()),
            ))
        }
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<&'src str, ParseError> {
        self.expect_token(TokenKind::Identifier, ctx)
            .map(|token| token.spelling)
    }

    /// Consume the `.` or `?` that ends a statement and return the certainty
    /// it stands for.
    pub(crate) fn expect_terminator(&mut self) -> Result<f64, ParseError> {
        match Certainty::for_terminator(self.peek_kind()) {
            Some(certainty) => {
                self.advance();
                Ok(certainty)
            }
            None => Err(self.error(
                ParseErrorKind::BadTerminator {
                    found: self.peek_kind(),
                },
                format!("Expected '.' or '?' after statement, found {}", self.peek()),
            )),
        }
    }
}
