//! Expression parsing implementation
//!
//! This module handles parsing of hedge expressions, one method per
//! precedence level, each handing its operands to the next tighter level.
//!
//! # Precedence
//!
//! Loosest to tightest; every binary level is left-associative:
//!
//! ```text
//! or            a or b
//! and           a and b
//! equality      == !=
//! comparison    < >
//! additive      + -
//! multiplicative * / %
//! unary         not x, -x
//! postfix       xs[i], f(args)   (chainable)
//! primary       literals, identifiers, ( expr ), [ array ]
//! ```
//!
//! Each level also accepts an already built leftmost operand (`seed`). The
//! statement parser uses this to continue an expression from an identifier
//! it has consumed while looking for `=`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};
use crate::parser::token::TokenKind;

type Seed<'src> = Option<Expression<'src>>;

impl<'src> Parser<'src> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expression<'src>, ParseError> {
        self.parse_or(None)
    }

    /// Parse an expression whose leftmost operand is `head`
    pub(crate) fn parse_expression_from(
        &mut self,
        head: Expression<'src>,
    ) -> Result<Expression<'src>, ParseError> {
        self.parse_or(Some(head))
    }

    /// Fold `operand (op operand)*` into left-leaning binary nodes.
    fn parse_binary_level(
        &mut self,
        seed: Seed<'src>,
        operators: &[TokenKind],
        operand: fn(&mut Self, Seed<'src>) -> Result<Expression<'src>, ParseError>,
    ) -> Result<Expression<'src>, ParseError> {
        let mut left = operand(self, seed)?;

        while operators.contains(&self.peek_kind()) {
            let token = self.advance();
            let Some(operator) = BinaryOperator::from_token(token.kind) else {
                break;
            };
            let right = operand(self, None)?;
            left = Expression::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse logical `or`
    fn parse_or(&mut self, seed: Seed<'src>) -> Result<Expression<'src>, ParseError> {
        self.parse_binary_level(seed, &[TokenKind::Or], Self::parse_and)
    }

    /// Parse logical `and`
    fn parse_and(&mut self, seed: Seed<'src>) -> Result<Expression<'src>, ParseError> {
        self.parse_binary_level(seed, &[TokenKind::And], Self::parse_equality)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self, seed: Seed<'src>) -> Result<Expression<'src>, ParseError> {
        self.parse_binary_level(
            seed,
            &[TokenKind::EqualEqual, TokenKind::BangEqual],
            Self::parse_comparison,
        )
    }

    /// Parse comparison (< >)
    fn parse_comparison(&mut self, seed: Seed<'src>) -> Result<Expression<'src>, ParseError> {
        self.parse_binary_level(
            seed,
            &[TokenKind::Less, TokenKind::Greater],
            Self::parse_additive,
        )
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self, seed: Seed<'src>) -> Result<Expression<'src>, ParseError> {
        self.parse_binary_level(
            seed,
            &[TokenKind::Plus, TokenKind::Minus],
            Self::parse_multiplicative,
        )
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self, seed: Seed<'src>) -> Result<Expression<'src>, ParseError> {
        self.parse_binary_level(
            seed,
            &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent],
            Self::parse_unary,
        )
    }

    /// Parse unary (not, -). A seed is already an operand, so it skips
    /// straight to the postfix level.
    fn parse_unary(&mut self, seed: Seed<'src>) -> Result<Expression<'src>, ParseError> {
        if seed.is_some() {
            return self.parse_postfix(seed);
        }

        let operator = if self.match_token(TokenKind::Not) {
            UnaryOperator::Not
        } else if self.match_token(TokenKind::Minus) {
            UnaryOperator::Negate
        } else {
            return self.parse_postfix(None);
        };

        let operand = Box::new(self.nested(|p| p.parse_unary(None))?);
        Ok(Expression::Unary { operator, operand })
    }

    /// Parse postfix indexing and calls
    fn parse_postfix(&mut self, seed: Seed<'src>) -> Result<Expression<'src>, ParseError> {
        let mut expr = match seed {
            Some(expr) => expr,
            None => self.parse_primary()?,
        };

        loop {
            if self.match_token(TokenKind::LeftBracket) {
                let index = self.with_calls_allowed(Self::parse_expression)?;
                self.expect_token(TokenKind::RightBracket, "after index")?;
                expr = Expression::Index {
                    target: Box::new(expr),
                    index: Box::new(index),
                };
            } else if self.allow_calls && self.match_token(TokenKind::LeftParen) {
                let arguments = self.parse_argument_list()?;
                self.expect_token(TokenKind::RightParen, "after function arguments")?;
                expr = Expression::Call {
                    callee: Box::new(expr),
                    arguments,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse argument list: expr, expr, ...
    fn parse_argument_list(&mut self) -> Result<Vec<Expression<'src>>, ParseError> {
        self.parse_expression_list(TokenKind::RightParen)
    }

    /// Parse comma-separated expressions up to (not including) `close`
    fn parse_expression_list(
        &mut self,
        close: TokenKind,
    ) -> Result<Vec<Expression<'src>>, ParseError> {
        let mut items = Vec::new();

        if self.check(close) {
            return Ok(items);
        }

        loop {
            items.push(self.with_calls_allowed(Self::parse_expression)?);

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(items)
    }

    /// Run `parse` one level deeper with calls re-enabled; used inside
    /// delimiters, where a `(` can no longer be mistaken for a loop body.
    fn with_calls_allowed<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = self.allow_calls;
        self.allow_calls = true;
        let result = self.nested(parse);
        self.allow_calls = saved;
        result
    }

    /// Parse primary (literals, identifiers, grouping, array literals)
    fn parse_primary(&mut self) -> Result<Expression<'src>, ParseError> {
        let token = *self.peek();

        let expr = match token.kind {
            TokenKind::Integer => {
                let value = token.spelling.parse::<i64>().map_err(|_| {
                    self.error(
                        ParseErrorKind::InvalidLiteral,
                        format!("Integer literal out of range: {}", token.spelling),
                    )
                })?;
                Expression::Literal(Literal::Integer(value))
            }
            TokenKind::Float => {
                let value = token.spelling.parse::<f64>().map_err(|_| {
                    self.error(
                        ParseErrorKind::InvalidLiteral,
                        format!("Invalid float literal: {}", token.spelling),
                    )
                })?;
                Expression::Literal(Literal::Float(value))
            }
            TokenKind::String => {
                let contents = token
                    .spelling
                    .strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .unwrap_or(token.spelling);
                Expression::Literal(Literal::String(contents))
            }
            TokenKind::Boolean => Expression::Literal(Literal::Boolean(token.spelling == "true")),
            TokenKind::Null => Expression::Literal(Literal::Null),
            TokenKind::Identifier => Expression::Identifier(token.spelling),

            TokenKind::LeftParen => {
                self.advance();
                let inner = self.with_calls_allowed(Self::parse_expression)?;
                self.expect_token(TokenKind::RightParen, "after expression")?;
                return Ok(Expression::Grouping(Box::new(inner)));
            }
            TokenKind::LeftBracket => {
                self.advance();
                let elements = self.parse_expression_list(TokenKind::RightBracket)?;
                self.expect_token(TokenKind::RightBracket, "after array elements")?;
                return Ok(Expression::Literal(Literal::Array(elements)));
            }

            found => {
                return Err(self.error(
                    ParseErrorKind::UnexpectedToken { found },
                    format!("Expected expression, found {}", token),
                ))
            }
        };

        self.advance();
        Ok(expr)
    }
}
