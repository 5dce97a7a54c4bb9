//! Property-based tests for the hedge scanner and parser
//!
//! These check that arbitrary input never panics either stage, that tokens
//! account for every non-blank character, and that statement certainty only
//! ever comes from the two terminators.

use hedge::parser::ast::Certainty;
use hedge::parser::lexer::scan;
use hedge::parser::parse::Parser;
use hedge::parser::token::TokenKind;
use proptest::prelude::*;

/// Statement bodies that parse on their own
fn body_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "x",
        "42",
        "-7",
        "4.5",
        "\"text\"",
        "true",
        "null",
        "[1, 2, 3]",
        "total = a + b * 2",
        "f(1, g(2))",
        "xs[0][1]",
        "say not done",
        "throwaway -x % 3",
        "if a < b { c. } else { d? }",
        "fun add(a, b) { say a + b. }",
        "try { risky(). } gotcha { say 0? }",
    ])
}

fn program_strategy() -> impl Strategy<Value = (String, Vec<f64>)> {
    prop::collection::vec((body_strategy(), prop::bool::ANY), 0..12).prop_map(|parts| {
        let mut source = String::new();
        let mut certainties = Vec::new();
        for (body, certain) in parts {
            source.push_str(body);
            source.push(if certain { '.' } else { '?' });
            source.push('\n');
            certainties.push(if certain {
                Certainty::CERTAIN
            } else {
                Certainty::UNCERTAIN
            });
        }
        (source, certainties)
    })
}

proptest! {
    #[test]
    fn test_scan_never_panics(input in "\\PC*") {
        let _ = scan(&input);
    }

    #[test]
    fn test_recovering_parse_never_panics(input in "[a-z0-9 .?(){}\\[\\],=<>+*/%-]{0,80}") {
        if let Ok(mut parser) = Parser::from_source(&input) {
            let (statements, errors) = parser.parse_program_recovering();
            for statement in &statements {
                prop_assert!(
                    statement.certainty == Certainty::CERTAIN
                        || statement.certainty == Certainty::UNCERTAIN
                );
            }
            for error in &errors {
                prop_assert!(error.offset <= input.len());
            }
        }
    }

    #[test]
    fn test_spellings_cover_non_blank_source(input in "[a-z0-9 \n.?(){}\\[\\],=<>+*/%-]{0,80}") {
        // No quotes, '!' or other stray characters here, so scanning cannot fail
        let tokens = scan(&input).unwrap();
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));

        let spelled: String = tokens.iter().map(|t| t.spelling).collect();
        let expected: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        prop_assert_eq!(spelled, expected);

        for token in &tokens {
            let end = token.offset + token.spelling.len();
            prop_assert_eq!(&input[token.offset..end], token.spelling);
        }
    }

    #[test]
    fn test_certainty_follows_terminator((source, certainties) in program_strategy()) {
        let program = hedge::parse(&source).unwrap();
        let found: Vec<f64> = program.iter().map(|s| s.certainty).collect();
        prop_assert_eq!(found, certainties);
    }
}
