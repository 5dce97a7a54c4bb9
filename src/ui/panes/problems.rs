//! Problems pane rendering

use super::{clamp_scroll, pane_block, visible_height};
use crate::ui::app::Problem;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the list of faults; `selected` is the one last jumped to
pub fn render_problems_pane(
    frame: &mut Frame,
    area: Rect,
    problems: &[Problem],
    selected: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Problems ({}) ", problems.len());
    let block = pane_block(&title, is_focused);

    if problems.is_empty() {
        let paragraph = Paragraph::new("(no problems)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.success));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = visible_height(area);
    clamp_scroll(scroll_offset, problems.len(), visible_height);

    let items: Vec<ListItem> = problems
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, problem)| {
            let position_style = if selected == Some(idx) {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(DEFAULT_THEME.error)
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{}:{}", problem.line, problem.column),
                    position_style,
                ),
                Span::raw(" "),
                Span::styled(
                    problem.message.as_str(),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
