use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::app::SelectorState;
use crate::ui::widgets::tables::scroll_offset;

/// Draws one dropdown. `current` is the value the selection holds for this
/// field and is marked in the list.
pub fn render_selector(
    selector: &SelectorState,
    current: &str,
    focused: bool,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let title = if selector.filter.is_empty() {
        format!(" {} ", selector.field.label())
    } else {
        format!(" {} [filter: {}] ", selector.field.label(), selector.filter)
    };

    let border_color = if focused { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let visible = selector.visible();
    if visible.is_empty() {
        let empty = List::new(vec![ListItem::new(Span::styled(
            "No matches",
            Style::default().fg(Color::Gray),
        ))])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let max_rows = usize::from(area.height.saturating_sub(2));
    let highlighted = selector.highlighted.min(visible.len() - 1);
    let offset = scroll_offset(visible.len(), max_rows, highlighted);

    let items: Vec<ListItem<'_>> = visible
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_rows)
        .filter_map(|(row, &index)| {
            let option = selector.options.get(index)?;
            let marker = if option == current { "● " } else { "  " };
            let style = if focused && row == highlighted {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if row == highlighted {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Some(ListItem::new(TextLine::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(option.as_str(), style),
            ])))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
