//! Text renderings of tokens and syntax trees
//!
//! Expressions print as compact s-expressions (`(+ 1 (* 2 3))`), statements
//! as an indented outline with one header line per statement. Both the
//! `--tokens`/`--ast` command-line modes and the inspector panes use these.

use super::ast::*;
use super::token::Token;
use std::fmt;

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Float(x) => write!(f, "{:?}", x),
            Literal::String(s) => write!(f, "\"{}\"", s),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Null => write!(f, "null"),
            Literal::Array(elements) => {
                write!(f, "[")?;
                write_list(f, elements)?;
                write!(f, "]")
            }
        }
    }
}

impl fmt::Display for Expression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::Literal(literal) => write!(f, "{}", literal),
            Expression::Grouping(inner) => write!(f, "(group {})", inner),
            Expression::Unary { operator, operand } => {
                write!(f, "({} {})", operator.symbol(), operand)
            }
            Expression::Binary {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", operator.symbol(), left, right),
            Expression::Call { callee, arguments } => {
                write!(f, "(call {}", callee)?;
                for argument in arguments {
                    write!(f, " {}", argument)?;
                }
                write!(f, ")")
            }
            Expression::Index { target, index } => write!(f, "(index {} {})", target, index),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expression<'_>]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// One line of a statement outline
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineLine {
    pub depth: usize,
    pub text: String,
    /// Set on statement header lines, `None` on section labels
    pub certainty: Option<f64>,
}

impl fmt::Display for OutlineLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.text, indent = self.depth * 2)?;
        if let Some(certainty) = self.certainty {
            write!(f, "  [{:.2}]", certainty)?;
        }
        Ok(())
    }
}

/// Build the outline of a statement list
pub fn outline(statements: &[Statement<'_>]) -> Vec<OutlineLine> {
    let mut lines = Vec::new();
    for statement in statements {
        outline_statement(statement, 0, &mut lines);
    }
    lines
}

fn outline_statement(statement: &Statement<'_>, depth: usize, lines: &mut Vec<OutlineLine>) {
    let header = |text: String| OutlineLine {
        depth,
        text,
        certainty: Some(statement.certainty),
    };

    match &statement.kind {
        StatementKind::Expression(expr) => lines.push(header(format!("expr {}", expr))),
        StatementKind::Assignment { name, value } => {
            lines.push(header(format!("assign {} = {}", name, value)))
        }
        StatementKind::Throwaway(expr) => lines.push(header(format!("throwaway {}", expr))),
        StatementKind::Output(expr) => lines.push(header(format!("say {}", expr))),
        StatementKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            lines.push(header(format!("if {}", condition)));
            outline_section("then", then_branch, depth + 1, lines);
            if let Some(else_branch) = else_branch {
                outline_section("else", else_branch, depth + 1, lines);
            }
        }
        StatementKind::Loop { condition, body } => {
            lines.push(header(format!("loop {}", condition)));
            outline_section("body", body, depth + 1, lines);
        }
        StatementKind::Function {
            name,
            parameters,
            body,
        } => {
            lines.push(header(format!("fun {}({})", name, parameters.join(", "))));
            outline_section("body", body, depth + 1, lines);
        }
        StatementKind::Try { body, gotcha } => {
            lines.push(header("try".to_string()));
            outline_section("body", body, depth + 1, lines);
            outline_section("gotcha", gotcha, depth + 1, lines);
        }
    }
}

fn outline_section(
    label: &str,
    statements: &[Statement<'_>],
    depth: usize,
    lines: &mut Vec<OutlineLine>,
) {
    lines.push(OutlineLine {
        depth,
        text: format!("{}:", label),
        certainty: None,
    });
    for statement in statements {
        outline_statement(statement, depth + 1, lines);
    }
}

/// One line per token: offset, kind and spelling
pub fn token_lines(tokens: &[Token<'_>]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| {
            format!(
                "{:>5}  {:<12} {}",
                token.offset,
                format!("{:?}", token.kind),
                token.spelling
            )
        })
        .collect()
}

/// Join outline lines into printable text
pub fn render_outline(lines: &[OutlineLine]) -> String {
    lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::scan;
    use crate::parser::parse::Parser;

    fn outline_of(source: &str) -> String {
        let statements = Parser::from_source(source)
            .unwrap()
            .parse_program()
            .unwrap();
        render_outline(&outline(&statements))
    }

    #[test]
    fn test_expression_display() {
        assert_eq!(outline_of("1 + 2 * 3."), "expr (+ 1 (* 2 3))  [1.00]");
        assert_eq!(
            outline_of("f(xs[0], [1, 2.5])?"),
            "expr (call f (index xs 0) [1, 2.5])  [0.75]"
        );
    }

    #[test]
    fn test_nested_outline() {
        let text = outline_of("if ok { say \"yes\". } else { x = -1? }.");
        let expected = [
            "if ok  [1.00]",
            "  then:",
            "    say \"yes\"  [1.00]",
            "  else:",
            "    assign x = -1  [0.75]",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_function_outline() {
        let lines = outline(
            &Parser::from_source("fun f(a, b) { throwaway a. }.")
                .unwrap()
                .parse_program()
                .unwrap(),
        );
        assert_eq!(lines[0].text, "fun f(a, b)");
        assert_eq!(lines[1].certainty, None);
        assert_eq!(lines[2].depth, 2);
        assert_eq!(lines[2].text, "throwaway a");
    }

    #[test]
    fn test_token_lines() {
        let tokens = scan("x = 1.").unwrap();
        let lines = token_lines(&tokens);
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Identifier"));
        assert!(lines[0].ends_with('x'));
        assert!(lines[4].contains("Eof"));
    }
}
