use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

/// Dropdown of previous searches under the search bar.
pub fn draw(f: &mut Frame, area: Rect, entries: &[&str], selected: Option<usize>, theme: &Theme) {
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| ListItem::new(Line::from(*entry)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" recent searches ")
                .border_style(theme.history()),
        )
        .style(theme.history())
        .highlight_style(theme.history_selection());

    let mut list_state = ListState::default();
    list_state.select(selected);
    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut list_state);
}

/// Index of the entry under `row`, given the panel area (borders included).
pub fn entry_at(area: Rect, row: u16, len: usize) -> Option<usize> {
    let first = area.y.saturating_add(1);
    let last = area.y.saturating_add(area.height).saturating_sub(1);
    if row < first || row >= last {
        return None;
    }
    let idx = usize::from(row - first);
    (idx < len).then_some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_at_skips_borders() {
        let area = Rect::new(0, 3, 40, 5);
        assert_eq!(entry_at(area, 3, 3), None);
        assert_eq!(entry_at(area, 4, 3), Some(0));
        assert_eq!(entry_at(area, 6, 3), Some(2));
        assert_eq!(entry_at(area, 7, 3), None);
    }

    #[test]
    fn test_entry_at_past_last_entry() {
        let area = Rect::new(0, 3, 40, 6);
        assert_eq!(entry_at(area, 6, 2), None);
    }
}
