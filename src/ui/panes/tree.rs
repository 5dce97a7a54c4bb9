//! Syntax tree pane rendering

use super::{clamp_scroll, pane_block, visible_height};
use crate::parser::ast::Certainty;
use crate::parser::outline::OutlineLine;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

fn outline_item(line: &OutlineLine) -> ListItem<'_> {
    let indent = Span::raw(" ".repeat(line.depth * 2));

    let spans = match line.certainty {
        Some(certainty) => {
            let color = if certainty >= Certainty::CERTAIN {
                DEFAULT_THEME.certain
            } else {
                DEFAULT_THEME.uncertain
            };
            vec![
                indent,
                Span::styled(line.text.as_str(), Style::default().fg(DEFAULT_THEME.fg)),
                Span::styled(
                    format!("  [{:.2}]", certainty),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]
        }
        None => vec![
            indent,
            Span::styled(
                line.text.as_str(),
                Style::default()
                    .fg(DEFAULT_THEME.comment)
                    .add_modifier(Modifier::ITALIC),
            ),
        ],
    };

    ListItem::new(Line::from(spans))
}

/// Render the statement outline
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    outline: &[OutlineLine],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Syntax Tree ", is_focused);

    if outline.is_empty() {
        let paragraph = Paragraph::new("(no statements)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = visible_height(area);
    clamp_scroll(scroll_offset, outline.len(), visible_height);

    let items: Vec<ListItem> = outline
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(outline_item)
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
