//! Source code pane rendering with syntax highlighting
//!
//! Highlighting comes from the scanned tokens rather than a separate
//! tokenizer, so what is colored is exactly what the parser saw. Text between
//! tokens is whitespace. Terminators are colored by the certainty they stand
//! for.

use super::{clamp_scroll, pane_block, visible_height};
use crate::parser::token::TokenKind;
use crate::ui::app::{Highlight, Problem};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Period => Style::default()
            .fg(DEFAULT_THEME.certain)
            .add_modifier(Modifier::BOLD),
        TokenKind::Question => Style::default()
            .fg(DEFAULT_THEME.uncertain)
            .add_modifier(Modifier::BOLD),
        TokenKind::String => Style::default().fg(DEFAULT_THEME.string),
        TokenKind::Integer | TokenKind::Float | TokenKind::Boolean | TokenKind::Null => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        TokenKind::LeftParen
        | TokenKind::RightParen
        | TokenKind::LeftBrace
        | TokenKind::RightBrace
        | TokenKind::LeftBracket
        | TokenKind::RightBracket => Style::default().fg(DEFAULT_THEME.primary),
        kind if kind.is_keyword() => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

fn push_gap<'a>(spans: &mut Vec<Span<'a>>, gap: &'a str) {
    if !gap.is_empty() {
        spans.push(Span::raw(gap));
    }
}

/// Highlight the line spanning `start..start + line.len()` of the source.
///
/// `highlights` must be sorted by offset, as the lexer produces them.
fn highlight_line<'a>(line: &'a str, start: usize, highlights: &[Highlight]) -> Line<'a> {
    let end = start + line.len();
    let mut spans = Vec::new();
    let mut cursor = start;

    for highlight in highlights
        .iter()
        .filter(|h| h.end > start && h.start < end)
    {
        let from = highlight.start.max(start);
        let to = highlight.end.min(end);
        if from < cursor {
            continue;
        }
        push_gap(&mut spans, &line[cursor - start..from - start]);
        spans.push(Span::styled(
            &line[from - start..to - start],
            token_style(highlight.kind),
        ));
        cursor = to;
    }

    push_gap(&mut spans, &line[cursor - start..]);
    Line::from(spans)
}

/// Render the source code pane
#[allow(clippy::too_many_arguments)]
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    file_name: &str,
    source_code: &str,
    highlights: &[Highlight],
    problems: &[Problem],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Source: {} ", file_name);
    let block = pane_block(&title, is_focused);

    // Byte offset of every line start
    let mut line_start = 0;
    let lines: Vec<(usize, &str)> = source_code
        .split('\n')
        .map(|line| {
            let start = line_start;
            line_start += line.len() + 1;
            (start, line.strip_suffix('\r').unwrap_or(line))
        })
        .collect();

    let visible_height = visible_height(area);
    clamp_scroll(scroll_offset, lines.len(), visible_height);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, &(start, line))| {
            let line_num = idx + 1;
            let has_problem = problems.iter().any(|p| p.line == line_num);

            let num_style = if has_problem {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content_line = highlight_line(line, start, highlights);
            if has_problem {
                let marked = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(marked);
                }
            }

            let mut final_spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            final_spans.extend(content_line.spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
