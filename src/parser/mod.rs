//! hedge source code parser
//!
//! This module transforms hedge source text into an Abstract Syntax Tree (AST):
//! - [`token`]: Token kinds and the keyword table
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), with `statements`, `declarations`
//!   and `expressions` extending the parser
//! - [`ast`]: AST node definitions
//! - [`outline`]: Text renderings of tokens and trees
//!
//! # The language
//!
//! - Every statement ends with `.` (certainty 1.0) or `?` (certainty 0.75)
//! - Statements: assignment, `if`/`else`, `loop`, `fun`, `try`/`gotcha`,
//!   `throwaway`, `say`, expression statements
//! - Expressions: integer, float, string, boolean, `null` and array literals,
//!   arithmetic, comparison, `and`/`or`/`not`, indexing, calls
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per precedence level.
//! No external parser generator dependencies. Faults are returned as
//! [`parse::ParseError`] values; nothing in here panics on bad input. Nesting
//! is capped at [`parse::MAX_NESTING`] levels, so very deep input is a fault
//! rather than a stack overflow.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod outline;
pub mod parse;
mod statements;
pub mod token;
