use crate::theme::Theme;
use photoscout_core::{Mode, ViewModel};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub struct PhotoListProps<'a> {
    pub view: &'a ViewModel<'a>,
    pub selected: Option<usize>,
    pub offset: usize,
    pub focused: bool,
}

fn title(view: &ViewModel<'_>) -> String {
    let count = view.items.len();
    match view.mode {
        Mode::Browsing => format!(" recent photos ({count}) "),
        Mode::Searching if view.has_more => format!(" {count} results, scroll for more "),
        Mode::Searching => format!(" {count} results "),
    }
}

/// Render the results and return the scroll offset ratatui settled on.
pub fn draw(f: &mut Frame, area: Rect, props: &PhotoListProps<'_>, theme: &Theme) -> usize {
    let view = props.view;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title(view))
        .border_style(theme.pane_border(props.focused));

    if view.items.is_empty() {
        let message = if view.is_loading {
            Span::styled("Loading...", theme.dim())
        } else if view.no_results {
            Span::styled("No results", theme.notice())
        } else {
            Span::styled("Nothing to show", theme.dim())
        };
        f.render_widget(Paragraph::new(Line::from(message)).block(block), area);
        return 0;
    }

    let items: Vec<ListItem> = view
        .items
        .iter()
        .map(|photo| {
            ListItem::new(Line::from(vec![
                Span::raw(photo.display_title().to_string()),
                Span::styled(format!("  #{}", photo.id), theme.dim()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.result_selection())
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default()
        .with_offset(props.offset)
        .with_selected(props.selected);
    f.render_stateful_widget(list, area, &mut list_state);
    list_state.offset()
}

/// Index of the result under `row`, given the list area and scroll offset.
pub fn item_at(area: Rect, offset: usize, row: u16, len: usize) -> Option<usize> {
    let first = area.y.saturating_add(1);
    let last = area.y.saturating_add(area.height).saturating_sub(1);
    if row < first || row >= last {
        return None;
    }
    let idx = offset + usize::from(row - first);
    (idx < len).then_some(idx)
}
