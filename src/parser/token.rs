//! Token model and keyword table
//!
//! A [`Token`] is a kind plus the exact slice of source it was scanned from.
//! Nothing is copied out of the source buffer, so every token (and every AST
//! node built from one) borrows the source for `'src`.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;

/// Every kind of token the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]

    // Operators and punctuation
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    Percent,    // %
    Less,       // <
    Greater,    // >
    EqualEqual, // ==
    BangEqual,  // !=
    Equal,      // =
    Period,     // .
    Question,   // ?
    Comma,      // ,

    // Literals
    Integer,
    Float,
    String,
    Boolean,
    Null,

    // Keywords
    If,
    Else,
    Loop,
    Fun,
    Throwaway,
    Try,
    Gotcha,
    And,
    Or,
    Not,
    Output,

    Identifier,
    Eof,
}

impl TokenKind {
    /// Whether this kind ends a statement.
    pub fn is_terminator(self) -> bool {
        matches!(self, TokenKind::Period | TokenKind::Question)
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::Loop
                | TokenKind::Fun
                | TokenKind::Throwaway
                | TokenKind::Try
                | TokenKind::Gotcha
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::Output
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Less => "'<'",
            TokenKind::Greater => "'>'",
            TokenKind::EqualEqual => "'=='",
            TokenKind::BangEqual => "'!='",
            TokenKind::Equal => "'='",
            TokenKind::Period => "'.'",
            TokenKind::Question => "'?'",
            TokenKind::Comma => "','",
            TokenKind::Integer => "integer literal",
            TokenKind::Float => "float literal",
            TokenKind::String => "string literal",
            TokenKind::Boolean => "boolean literal",
            TokenKind::Null => "'null'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::Loop => "'loop'",
            TokenKind::Fun => "'fun'",
            TokenKind::Throwaway => "'throwaway'",
            TokenKind::Try => "'try'",
            TokenKind::Gotcha => "'gotcha'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Not => "'not'",
            TokenKind::Output => "'say'",
            TokenKind::Identifier => "identifier",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// A scanned token: its kind, the source text it spans, and where that text
/// starts (byte offset, for diagnostics only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub spelling: &'src str,
    pub offset: usize,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, spelling: &'src str, offset: usize) -> Self {
        Self {
            kind,
            spelling,
            offset,
        }
    }

    /// The end-of-input marker. Its spelling is always empty.
    pub fn eof(offset: usize) -> Self {
        Self::new(TokenKind::Eof, "", offset)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.spelling),
            TokenKind::Integer | TokenKind::Float | TokenKind::Boolean => {
                write!(f, "{} {}", self.kind, self.spelling)
            }
            TokenKind::String => write!(f, "string literal {}", self.spelling),
            _ => write!(f, "{}", self.kind),
        }
    }
}

static KEYWORDS: Lazy<FxHashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut table = FxHashMap::default();
    table.insert("if", TokenKind::If);
    table.insert("else", TokenKind::Else);
    table.insert("loop", TokenKind::Loop);
    table.insert("fun", TokenKind::Fun);
    table.insert("try", TokenKind::Try);
    table.insert("gotcha", TokenKind::Gotcha);
    table.insert("throwaway", TokenKind::Throwaway);
    table.insert("and", TokenKind::And);
    table.insert("or", TokenKind::Or);
    table.insert("not", TokenKind::Not);
    table.insert("null", TokenKind::Null);
    table.insert("true", TokenKind::Boolean);
    table.insert("false", TokenKind::Boolean);
    table.insert("say", TokenKind::Output);
    table
});

/// Look up a reserved spelling. `true` and `false` both map to
/// [`TokenKind::Boolean`]; the spelling tells them apart.
pub fn keyword(spelling: &str) -> Option<TokenKind> {
    KEYWORDS.get(spelling).copied()
}

/// All reserved spellings, in no particular order.
pub fn keywords() -> impl Iterator<Item = &'static str> {
    KEYWORDS.keys().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(keyword("if"), Some(TokenKind::If));
        assert_eq!(keyword("gotcha"), Some(TokenKind::Gotcha));
        assert_eq!(keyword("throwaway"), Some(TokenKind::Throwaway));
        assert_eq!(keyword("say"), Some(TokenKind::Output));
        assert_eq!(keyword("true"), Some(TokenKind::Boolean));
        assert_eq!(keyword("false"), Some(TokenKind::Boolean));
        assert_eq!(keyword("null"), Some(TokenKind::Null));
    }

    #[test]
    fn test_non_keywords() {
        assert_eq!(keyword("If"), None);
        assert_eq!(keyword("loops"), None);
        assert_eq!(keyword("catch"), None);
        assert_eq!(keyword(""), None);
    }

    #[test]
    fn test_keyword_count() {
        assert_eq!(keywords().count(), 14);
        assert!(keywords().all(|k| keyword(k).is_some()));
    }

    #[test]
    fn test_terminators() {
        assert!(TokenKind::Period.is_terminator());
        assert!(TokenKind::Question.is_terminator());
        assert!(!TokenKind::Comma.is_terminator());
    }
}
