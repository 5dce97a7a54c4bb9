// AST (Abstract Syntax Tree) definitions for hedge
//
// Names and string literals borrow from the source buffer. Everything else is
// owned: a `Vec<Statement>` returned by the parser owns its whole tree.

use super::token::TokenKind;

/// How sure a statement is, taken from the punctuation that ends it.
pub struct Certainty;

impl Certainty {
    /// Statement ended with `.`
    pub const CERTAIN: f64 = 1.0;
    /// Statement ended with `?`
    pub const UNCERTAIN: f64 = 0.75;

    /// Certainty for a terminator token, or `None` if the kind does not end
    /// statements.
    pub fn for_terminator(kind: TokenKind) -> Option<f64> {
        match kind {
            TokenKind::Period => Some(Self::CERTAIN),
            TokenKind::Question => Some(Self::UNCERTAIN),
            _ => None,
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    // Comparison
    Less,
    Greater,
    Equal,
    NotEqual,
    // Logical
    And,
    Or,
}

impl BinaryOperator {
    /// Map an operator token to its binary operator.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Minus => BinaryOperator::Subtract,
            TokenKind::Star => BinaryOperator::Multiply,
            TokenKind::Slash => BinaryOperator::Divide,
            TokenKind::Percent => BinaryOperator::Modulo,
            TokenKind::Less => BinaryOperator::Less,
            TokenKind::Greater => BinaryOperator::Greater,
            TokenKind::EqualEqual => BinaryOperator::Equal,
            TokenKind::BangEqual => BinaryOperator::NotEqual,
            TokenKind::And => BinaryOperator::And,
            TokenKind::Or => BinaryOperator::Or,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate, // -x
    Not,    // not x
}

impl UnaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Not => "not",
        }
    }
}

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Literal<'src> {
    Integer(i64),
    Float(f64),
    /// Contents between the quotes, verbatim
    String(&'src str),
    Boolean(bool),
    Null,
    Array(Vec<Expression<'src>>),
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expression<'src> {
    Identifier(&'src str),
    Literal(Literal<'src>),
    Grouping(Box<Expression<'src>>),
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression<'src>>,
    },
    Binary {
        left: Box<Expression<'src>>,
        operator: BinaryOperator,
        right: Box<Expression<'src>>,
    },
    Call {
        callee: Box<Expression<'src>>,
        arguments: Vec<Expression<'src>>,
    },
    Index {
        target: Box<Expression<'src>>,
        index: Box<Expression<'src>>,
    },
}

impl<'src> Expression<'src> {
    pub fn binary(
        left: Expression<'src>,
        operator: BinaryOperator,
        right: Expression<'src>,
    ) -> Self {
        Expression::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn integer(value: i64) -> Self {
        Expression::Literal(Literal::Integer(value))
    }
}

/// The shape of a statement
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind<'src> {
    Expression(Expression<'src>),
    Assignment {
        name: &'src str,
        value: Expression<'src>,
    },
    If {
        condition: Expression<'src>,
        then_branch: Vec<Statement<'src>>,
        /// `None` when there is no `else`, never an empty list
        else_branch: Option<Vec<Statement<'src>>>,
    },
    Loop {
        condition: Expression<'src>,
        body: Vec<Statement<'src>>,
    },
    Function {
        name: &'src str,
        parameters: Vec<&'src str>,
        body: Vec<Statement<'src>>,
    },
    Try {
        body: Vec<Statement<'src>>,
        gotcha: Vec<Statement<'src>>,
    },
    /// Expression whose value is deliberately discarded
    Throwaway(Expression<'src>),
    /// `say expr`
    Output(Expression<'src>),
}

/// A statement and the certainty its terminator gave it
#[derive(Debug, Clone, PartialEq)]
pub struct Statement<'src> {
    pub kind: StatementKind<'src>,
    pub certainty: f64,
}

impl<'src> Statement<'src> {
    pub fn new(kind: StatementKind<'src>, certainty: f64) -> Self {
        Self { kind, certainty }
    }

    pub fn is_certain(&self) -> bool {
        self.certainty == Certainty::CERTAIN
    }
}
