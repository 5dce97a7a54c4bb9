//! Main TUI application state and logic

use crate::diagnostics::line_col;
use crate::parser::lexer::Lexer;
use crate::parser::outline::{outline, token_lines, OutlineLine};
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Problems,
    Tokens,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> tokens -> tree -> problems)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Problems,
            FocusedPane::Problems => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Problems,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Tree => FocusedPane::Tokens,
            FocusedPane::Problems => FocusedPane::Tree,
        }
    }
}

/// Source range of one token, for highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

/// A fault positioned for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Problem {
    fn from_error(source: &str, error: &ParseError) -> Self {
        let (line, column) = line_col(source, error.offset);
        Problem {
            line,
            column,
            message: error.message.clone(),
        }
    }
}

/// Everything the panes show, worked out once from the source.
///
/// Parsing runs in recovery mode so that one broken statement does not hide
/// the rest of the tree.
#[derive(Debug, Clone, Default)]
pub struct Inspection {
    pub highlights: Vec<Highlight>,
    pub token_lines: Vec<String>,
    pub outline: Vec<OutlineLine>,
    pub statement_count: usize,
    pub problems: Vec<Problem>,
}

impl Inspection {
    pub fn of(source: &str) -> Self {
        let tokens = match Lexer::new(source).tokenize() {
            Ok(tokens) => tokens,
            Err(err) => {
                return Inspection {
                    problems: vec![Problem::from_error(source, &ParseError::from(err))],
                    ..Inspection::default()
                }
            }
        };

        let highlights = tokens
            .iter()
            .filter(|token| token.kind != TokenKind::Eof)
            .map(|token| Highlight {
                start: token.offset,
                end: token.offset + token.spelling.len(),
                kind: token.kind,
            })
            .collect();
        let token_lines = token_lines(&tokens);

        let (statements, errors) = Parser::new(tokens).parse_program_recovering();

        Inspection {
            highlights,
            token_lines,
            outline: outline(&statements),
            statement_count: statements.len(),
            problems: errors
                .iter()
                .map(|err| Problem::from_error(source, err))
                .collect(),
        }
    }
}

/// The main application state
pub struct App {
    /// Name shown in the source pane title
    pub file_name: String,

    /// The source code being inspected
    pub source_code: String,

    pub inspection: Inspection,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub problems_scroll: usize,
    pub tokens_scroll: usize,
    pub tree_scroll: usize,

    /// Problem most recently jumped to with `n`
    pub selected_problem: Option<usize>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app for the given source code
    pub fn new(file_name: impl Into<String>, source_code: String) -> Self {
        let inspection = Inspection::of(&source_code);
        let status_message = match inspection.problems.len() {
            0 => format!("Parsed {} statement(s)", inspection.statement_count),
            n => format!("{} problem(s), press n to jump", n),
        };

        App {
            file_name: file_name.into(),
            source_code,
            inspection,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            problems_scroll: 0,
            tokens_scroll: 0,
            tree_scroll: 0,
            selected_problem: None,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Problems (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(columns[0]);

        // Right column: Tokens (top) | Syntax tree (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(columns[1]);

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.file_name,
            &self.source_code,
            &self.inspection.highlights,
            &self.inspection.problems,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_problems_pane(
            frame,
            left_rows[1],
            &self.inspection.problems,
            self.selected_problem,
            self.focused_pane == FocusedPane::Problems,
            &mut self.problems_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            right_rows[0],
            &self.inspection.token_lines,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            right_rows[1],
            &self.inspection.outline,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.inspection.statement_count,
            self.inspection.problems.len(),
        );
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Problems => &mut self.problems_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(10);
            }
            KeyCode::Home => {
                *self.focused_scroll() = 0;
            }
            KeyCode::End => {
                // Clamped to the last page when rendered
                *self.focused_scroll() = usize::MAX;
            }
            KeyCode::Char('n') => self.next_problem(),
            _ => {}
        }
    }

    /// Scroll the source to the next problem, wrapping around
    fn next_problem(&mut self) {
        let total = self.inspection.problems.len();
        if total == 0 {
            self.status_message = "No problems".to_string();
            return;
        }

        let index = self.selected_problem.map_or(0, |i| (i + 1) % total);
        let problem = &self.inspection.problems[index];

        self.selected_problem = Some(index);
        self.source_scroll = problem.line.saturating_sub(3);
        self.problems_scroll = index;
        self.status_message = format!(
            "Problem {}/{} at {}:{}",
            index + 1,
            total,
            problem.line,
            problem.column
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_inspection_of_valid_source() {
        let inspection = Inspection::of("x = 1.\nsay x?");
        assert_eq!(inspection.statement_count, 2);
        assert!(inspection.problems.is_empty());
        assert_eq!(inspection.highlights.len(), 7);
        assert_eq!(inspection.token_lines.len(), 8);
        assert_eq!(inspection.outline.len(), 2);
    }

    #[test]
    fn test_inspection_keeps_good_statements() {
        let inspection = Inspection::of("a = 1.\nb = .\nc = 3?");
        assert_eq!(inspection.statement_count, 2);
        assert_eq!(inspection.problems.len(), 1);
        assert_eq!(inspection.problems[0].line, 2);
        assert_eq!(inspection.problems[0].column, 5);
    }

    #[test]
    fn test_inspection_of_lex_error() {
        let inspection = Inspection::of("x = \"open");
        assert!(inspection.highlights.is_empty());
        assert_eq!(inspection.problems.len(), 1);
        assert_eq!(inspection.problems[0].message, "Unterminated string literal");
    }

    #[test]
    fn test_focus_cycle() {
        let mut app = App::new("t.hg", "x.".to_string());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Problems);
    }

    #[test]
    fn test_scroll_focused_pane() {
        let mut app = App::new("t.hg", "x.".to_string());
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.source_scroll, 1);
        assert_eq!(app.tokens_scroll, 0);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.source_scroll, 0);
    }

    #[test]
    fn test_next_problem_wraps() {
        let source = "a.\nb = .\nc.\nd = ,\n";
        let mut app = App::new("t.hg", source.to_string());
        assert_eq!(app.inspection.problems.len(), 2);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.selected_problem, Some(0));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.selected_problem, Some(1));
        assert!(app.status_message.starts_with("Problem 2/2 at 4:"));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.selected_problem, Some(0));
    }

    #[test]
    fn test_quit() {
        let mut app = App::new("t.hg", String::new());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
