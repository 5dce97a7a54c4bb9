//! # Introduction
//!
//! hedge is a small interpreted language in which every statement says how
//! sure it is: a statement ending in `.` is certain, one ending in `?` is
//! not. This crate is the language front end. It scans source text, parses
//! it into a syntax tree whose statements carry that certainty, and offers a
//! terminal inspector for looking at both.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Statements → (evaluator)
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds the AST.
//! 2. [`diagnostics`] — renders lexer and parser faults against the source.
//! 3. [`ui`] — ratatui-based inspector; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use hedge::parser::ast::{Certainty, StatementKind};
//!
//! let program = hedge::parse("greeting = \"hi\". say greeting?").unwrap();
//! assert_eq!(program.len(), 2);
//! assert!(matches!(program[0].kind, StatementKind::Assignment { .. }));
//! assert_eq!(program[1].certainty, Certainty::UNCERTAIN);
//! ```

pub mod diagnostics;
pub mod parser;
pub mod ui;

use parser::ast::Statement;
use parser::parse::{ParseError, Parser};

/// Scan and parse a whole program, stopping at the first fault.
pub fn parse(source: &str) -> Result<Vec<Statement<'_>>, ParseError> {
    Parser::from_source(source)?.parse_program()
}
