//! Token list pane rendering

use super::{clamp_scroll, pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Render the scanned tokens, one per row
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    token_lines: &[String],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Tokens ", is_focused);

    if token_lines.is_empty() {
        let paragraph = Paragraph::new("(source did not scan)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = visible_height(area);
    clamp_scroll(scroll_offset, token_lines.len(), visible_height);

    let items: Vec<ListItem> = token_lines
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| ListItem::new(line.as_str()).style(Style::default().fg(DEFAULT_THEME.fg)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
