//! Compiler-style rendering of lexer and parser faults
//!
//! The core only tracks byte offsets. Line and column are worked out here,
//! on demand, for display.
//!
//! ```text
//! error: Expected '.' or '?' after statement, found integer literal -4
//!  --> demo.hg:3:7
//!   |
//! 3 | y = a -4.
//!   |       ^
//! help: '-' directly before a digit starts a negative number; put a space after '-' to subtract
//! ```

use crate::parser::parse::{ParseError, ParseErrorKind};
use crate::parser::token::TokenKind;

/// 1-based line and column (in characters) of a byte offset.
///
/// Offsets past the end clamp to the end of the source; offsets inside a
/// multi-byte character count as that character.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }

    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = source[line_start..offset].chars().count() + 1;

    (line, column)
}

/// A fault ready to be rendered against its source
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub offset: usize,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
            help: None,
        }
    }

    /// Attach a help message (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Build a diagnostic for a parse error, adding a hint for the faults
    /// with a well-known cause.
    pub fn from_parse_error(error: &ParseError, source: &str) -> Self {
        let diagnostic = Self::new(error.message.clone(), error.offset);
        let rest = source.get(error.offset..).unwrap_or("");

        match error.kind {
            ParseErrorKind::BadTerminator {
                found: TokenKind::Integer | TokenKind::Float,
            } if rest.starts_with('-') => diagnostic.with_help(
                "'-' directly before a digit starts a negative number; put a space after '-' to subtract",
            ),
            ParseErrorKind::BadTerminator { .. } => {
                diagnostic.with_help("end every statement with '.' (certain) or '?' (uncertain)")
            }
            ParseErrorKind::MissingKeyword {
                keyword: TokenKind::Gotcha,
                ..
            } => diagnostic.with_help("every 'try' block needs a 'gotcha' block after it"),
            _ => diagnostic,
        }
    }

    /// Render against the full source text.
    pub fn render(&self, file_name: &str, source: &str) -> String {
        let (line, column) = line_col(source, self.offset);
        let src_line = source.lines().nth(line - 1).unwrap_or("");
        let gutter = line.to_string().len();

        let mut out = format!(
            "error: {}\n{:>width$}--> {}:{}:{}\n{:>width$} |\n{} | {}\n{:>width$} | {}^",
            self.message,
            "",
            file_name,
            line,
            column,
            "",
            line,
            src_line,
            "",
            " ".repeat(column - 1),
            width = gutter,
        );

        if let Some(help) = &self.help {
            out.push_str("\nhelp: ");
            out.push_str(help);
        }

        out
    }
}
