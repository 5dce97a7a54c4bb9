//! Function declaration parsing
//!
//! ```text
//! fun_decl ::= "fun" IDENT "(" [ IDENT { "," IDENT } ] ")" block
//! ```
//!
//! Parameters are bare names; anything else in the parameter list is a fault.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

impl<'src> Parser<'src> {
    /// Parse function declaration; `fun` is already consumed
    pub(crate) fn parse_function_declaration(&mut self) -> Result<StatementKind<'src>, ParseError> {
        let name = self.expect_identifier("after 'fun'")?;

        self.expect_token(TokenKind::LeftParen, "after function name")?;
        let parameters = self.parse_parameter_list()?;
        self.expect_token(TokenKind::RightParen, "after parameters")?;

        let body = self.parse_block("before function body")?;

        Ok(StatementKind::Function {
            name,
            parameters,
            body,
        })
    }

    /// Parse parameter list: name, name, ...
    fn parse_parameter_list(&mut self) -> Result<Vec<&'src str>, ParseError> {
        let mut parameters = Vec::new();

        if self.check(TokenKind::RightParen) {
            return Ok(parameters);
        }

        loop {
            parameters.push(self.expect_identifier("in parameter list")?);

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::ParseErrorKind;

    fn parse(source: &str) -> Result<Vec<Statement<'_>>, ParseError> {
        Parser::from_source(source)?.parse_program()
    }

    #[test]
    fn test_parse_simple_function() {
        let program = parse("fun add(a, b) { say a + b. }.").unwrap();

        assert_eq!(program.len(), 1);
        match &program[0].kind {
            StatementKind::Function {
                name,
                parameters,
                body,
            } => {
                assert_eq!(*name, "add");
                assert_eq!(parameters, &vec!["a", "b"]);
                assert_eq!(body.len(), 1);
            }
            other => panic!("Expected function declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_no_parameters() {
        let program = parse("fun nothing() { }?").unwrap();
        match &program[0].kind {
            StatementKind::Function {
                parameters, body, ..
            } => {
                assert!(parameters.is_empty());
                assert!(body.is_empty());
            }
            other => panic!("Expected function declaration, got {:?}", other),
        }
        assert_eq!(program[0].certainty, Certainty::UNCERTAIN);
    }

    #[test]
    fn test_rejects_literal_parameter() {
        let err = parse("fun f(1) { }.").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::ExpectedToken {
                expected: TokenKind::Identifier,
                found: TokenKind::Integer
            }
        );
        assert_eq!(err.offset, 6);
    }

    #[test]
    fn test_rejects_trailing_comma() {
        let err = parse("fun f(a,) { }.").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::ExpectedToken {
                expected: TokenKind::Identifier,
                found: TokenKind::RightParen
            }
        );
    }

    #[test]
    fn test_missing_name() {
        let err = parse("fun (a) { }.").unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::ExpectedToken {
                expected: TokenKind::Identifier,
                ..
            }
        ));
    }
}
