//! Statement parsing implementation
//!
//! This module handles parsing of all hedge statement types:
//!
//! - Assignments: `x = 42.`
//! - Control flow: `if`, `loop`, `try`/`gotcha`
//! - `throwaway` and `say` statements
//! - Expression statements: bare calls and any other expression
//!
//! Every statement ends with `.` (certain) or `?` (uncertain); the terminator
//! is read after the statement body and decides its certainty.
//!
//! # Grammar
//!
//! ```text
//! statement  ::= body ( "." | "?" )
//! body       ::= if_stmt | loop_stmt | fun_decl | try_stmt
//!              | "throwaway" expr | "say" expr
//!              | IDENT "=" expr | expr
//! if_stmt    ::= "if" expr block [ "else" block ]
//! loop_stmt  ::= "loop" expr "(" statement*      (runs to end of input)
//! try_stmt   ::= "try" block "gotcha" block
//! block      ::= "{" statement* "}"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};
use crate::parser::token::TokenKind;

impl<'src> Parser<'src> {
    /// Parse a statement, including its terminator
    pub(crate) fn parse_statement(&mut self) -> Result<Statement<'src>, ParseError> {
        // The loop body runs to end of input and swallows every terminator,
        // so it settles its own certainty.
        if self.match_token(TokenKind::Loop) {
            return self.parse_loop_statement();
        }

        let kind = if self.match_token(TokenKind::If) {
            self.parse_if_statement()?
        } else if self.match_token(TokenKind::Fun) {
            self.parse_function_declaration()?
        } else if self.match_token(TokenKind::Try) {
            self.parse_try_statement()?
        } else if self.match_token(TokenKind::Throwaway) {
            StatementKind::Throwaway(self.parse_expression()?)
        } else if self.match_token(TokenKind::Output) {
            StatementKind::Output(self.parse_expression()?)
        } else if self.check(TokenKind::Identifier) {
            self.parse_identifier_statement()?
        } else {
            StatementKind::Expression(self.parse_expression()?)
        };

        let certainty = self.expect_terminator()?;
        Ok(Statement::new(kind, certainty))
    }

    /// Parse a statement starting with an identifier: an assignment when the
    /// next token is `=`, otherwise an expression that begins with this
    /// identifier.
    fn parse_identifier_statement(&mut self) -> Result<StatementKind<'src>, ParseError> {
        let is_assignment = self
            .peek_ahead(1)
            .is_some_and(|next| next.kind == TokenKind::Equal);

        let name = self.advance().spelling;

        if is_assignment {
            self.advance(); // consume '='
            let value = self.parse_expression()?;
            return Ok(StatementKind::Assignment { name, value });
        }

        let expr = self.parse_expression_from(Expression::Identifier(name))?;
        Ok(StatementKind::Expression(expr))
    }

    /// Parse if statement; `if` is already consumed
    fn parse_if_statement(&mut self) -> Result<StatementKind<'src>, ParseError> {
        let condition = self.parse_expression()?;
        let then_branch = self.parse_block("after if condition")?;

        let else_branch = if self.match_token(TokenKind::Else) {
            Some(self.parse_block("after 'else'")?)
        } else {
            None
        };

        Ok(StatementKind::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// Parse loop statement; `loop` is already consumed.
    ///
    /// The body opens with `(` and has no closing delimiter: it holds every
    /// remaining statement up to end of input. The loop shares the terminator
    /// of its last body statement, so an empty body has no terminator at all.
    fn parse_loop_statement(&mut self) -> Result<Statement<'src>, ParseError> {
        let saved = self.allow_calls;
        self.allow_calls = false;
        let condition = self.parse_expression();
        self.allow_calls = saved;
        let condition = condition?;

        self.expect_token(TokenKind::LeftParen, "after loop condition")?;

        let body = self.nested(|p| {
            let mut body = Vec::new();
            while !p.is_at_end() {
                body.push(p.parse_statement()?);
            }
            Ok(body)
        })?;

        let certainty = match body.last() {
            Some(last) => last.certainty,
            None => {
                return Err(self.error(
                    ParseErrorKind::BadTerminator {
                        found: TokenKind::Eof,
                    },
                    "Expected at least one statement in loop body, found end of input"
                        .to_string(),
                ))
            }
        };

        Ok(Statement::new(StatementKind::Loop { condition, body }, certainty))
    }

    /// Parse try statement; `try` is already consumed
    fn parse_try_statement(&mut self) -> Result<StatementKind<'src>, ParseError> {
        let body = self.parse_block("after 'try'")?;

        if !self.match_token(TokenKind::Gotcha) {
            return Err(self.error(
                ParseErrorKind::MissingKeyword {
                    keyword: TokenKind::Gotcha,
                    found: self.peek_kind(),
                },
                format!("Expected 'gotcha' after try body, found {}", self.peek()),
            ));
        }

        let gotcha = self.parse_block("after 'gotcha'")?;

        Ok(StatementKind::Try { body, gotcha })
    }

    /// Parse a brace-delimited statement list
    pub(crate) fn parse_block(&mut self, ctx: &str) -> Result<Vec<Statement<'src>>, ParseError> {
        self.expect_token(TokenKind::LeftBrace, ctx)?;

        let statements = self.nested(|p| {
            let mut statements = Vec::new();
            while !p.check(TokenKind::RightBrace) && !p.is_at_end() {
                statements.push(p.parse_statement()?);
            }
            Ok(statements)
        })?;

        self.expect_token(TokenKind::RightBrace, "after block")?;
        Ok(statements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Vec<Statement<'_>>, ParseError> {
        Parser::from_source(source)?.parse_program()
    }

    #[test]
    fn test_assignment() {
        let program = parse("total = 1 + 2.").unwrap();
        match &program[0].kind {
            StatementKind::Assignment { name, value } => {
                assert_eq!(*name, "total");
                assert!(matches!(value, Expression::Binary { .. }));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_call_statement() {
        let program = parse("greet(\"bob\", 3)?").unwrap();
        assert_eq!(program[0].certainty, Certainty::UNCERTAIN);
        match &program[0].kind {
            StatementKind::Expression(Expression::Call { callee, arguments }) => {
                assert_eq!(**callee, Expression::Identifier("greet"));
                assert_eq!(arguments.len(), 2);
                assert_eq!(arguments[0], Expression::Literal(Literal::String("bob")));
            }
            other => panic!("Expected call statement, got {:?}", other),
        }
    }

    #[test]
    fn test_identifier_continues_into_expression() {
        let program = parse("xs[0] == 1.").unwrap();
        let expected = Expression::binary(
            Expression::Index {
                target: Box::new(Expression::Identifier("xs")),
                index: Box::new(Expression::integer(0)),
            },
            BinaryOperator::Equal,
            Expression::integer(1),
        );
        assert_eq!(program[0].kind, StatementKind::Expression(expected));
    }

    #[test]
    fn test_if_else() {
        let program = parse("if x > 1 { a. } else { b? }.").unwrap();
        match &program[0].kind {
            StatementKind::If {
                then_branch,
                else_branch,
                ..
            } => {
                assert_eq!(then_branch.len(), 1);
                let else_branch = else_branch.as_ref().expect("else branch");
                assert_eq!(else_branch.len(), 1);
                assert_eq!(else_branch[0].certainty, Certainty::UNCERTAIN);
            }
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_if_without_else_has_no_branch() {
        let program = parse("if x { }.").unwrap();
        match &program[0].kind {
            StatementKind::If {
                then_branch,
                else_branch,
                ..
            } => {
                assert!(then_branch.is_empty());
                assert!(else_branch.is_none());
            }
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_if_requires_brace() {
        let err = parse("if x a.").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::ExpectedToken {
                expected: TokenKind::LeftBrace,
                found: TokenKind::Identifier
            }
        );
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse("if x { a.").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::ExpectedToken {
                expected: TokenKind::RightBrace,
                found: TokenKind::Eof
            }
        );
    }

    #[test]
    fn test_loop_runs_to_end_of_input() {
        let program = parse("loop i < 10 ( i = i + 1. say i?").unwrap();
        assert_eq!(program.len(), 1);
        match &program[0].kind {
            StatementKind::Loop { condition, body } => {
                assert!(matches!(
                    condition,
                    Expression::Binary {
                        operator: BinaryOperator::Less,
                        ..
                    }
                ));
                assert_eq!(body.len(), 2);
            }
            other => panic!("Expected loop, got {:?}", other),
        }
        assert_eq!(program[0].certainty, Certainty::UNCERTAIN);
    }

    #[test]
    fn test_loop_condition_is_not_a_call() {
        let program = parse("loop running ( tick().").unwrap();
        match &program[0].kind {
            StatementKind::Loop { condition, body } => {
                assert_eq!(*condition, Expression::Identifier("running"));
                assert_eq!(body.len(), 1);
            }
            other => panic!("Expected loop, got {:?}", other),
        }
    }

    #[test]
    fn test_loop_condition_allows_calls_inside_grouping() {
        let program = parse("loop (ready()) ( go().").unwrap();
        match &program[0].kind {
            StatementKind::Loop { condition, .. } => {
                assert!(matches!(condition, Expression::Grouping(inner)
                    if matches!(**inner, Expression::Call { .. })));
            }
            other => panic!("Expected loop, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_loop_body() {
        let err = parse("loop x (").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::BadTerminator {
                found: TokenKind::Eof
            }
        );
    }

    #[test]
    fn test_try_gotcha() {
        let program = parse("try { risky(). } gotcha { say \"oops\". }?").unwrap();
        assert_eq!(program[0].certainty, Certainty::UNCERTAIN);
        match &program[0].kind {
            StatementKind::Try { body, gotcha } => {
                assert_eq!(body.len(), 1);
                assert_eq!(gotcha.len(), 1);
                assert!(matches!(gotcha[0].kind, StatementKind::Output(_)));
            }
            other => panic!("Expected try, got {:?}", other),
        }
    }

    #[test]
    fn test_try_without_gotcha() {
        let err = parse("try { risky(). }.").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingKeyword {
                keyword: TokenKind::Gotcha,
                found: TokenKind::Period
            }
        );
    }

    #[test]
    fn test_throwaway() {
        let program = parse("throwaway compute(1).").unwrap();
        assert!(matches!(
            program[0].kind,
            StatementKind::Throwaway(Expression::Call { .. })
        ));
    }

    #[test]
    fn test_nested_statements_keep_their_certainty() {
        let program = parse("if a { b. c? }.").unwrap();
        let StatementKind::If { then_branch, .. } = &program[0].kind else {
            panic!("Expected if statement");
        };
        assert_eq!(then_branch[0].certainty, Certainty::CERTAIN);
        assert_eq!(then_branch[1].certainty, Certainty::UNCERTAIN);
        assert_eq!(program[0].certainty, Certainty::CERTAIN);
    }

    #[test]
    fn test_deep_blocks() {
        let source =
            |depth: usize| format!("{}y.{}", "if x { ".repeat(depth), " }.".repeat(depth));

        let err = parse(&source(10_000)).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);

        assert_eq!(parse(&source(100)).unwrap().len(), 1);
    }

    #[test]
    fn test_deep_loops() {
        let err = parse(&format!("{}y.", "loop x ( ".repeat(5_000))).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);

        let source = format!("{}y?", "loop x ( ".repeat(50));
        let program = parse(&source).unwrap();
        assert_eq!(program.len(), 1);
        assert_eq!(program[0].certainty, Certainty::UNCERTAIN);
    }
}
