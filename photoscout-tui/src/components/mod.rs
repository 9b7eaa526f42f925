use ratatui::layout::{Constraint, Layout, Rect};

pub mod photo_list;
pub mod preview;
pub mod search_bar;
pub mod status_bar;
pub mod suggestions;

/// Helper function to center a rect within another rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Percentage(percent_y.min(100)),
        Constraint::Fill(1),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Percentage(percent_x.min(100)),
        Constraint::Fill(1),
    ])
    .split(popup_layout[1])[1]
}

/// Area directly under `anchor` for a dropdown of `rows` entries plus borders,
/// clipped to `bounds`.
pub fn dropdown_rect(anchor: Rect, rows: usize, bounds: Rect) -> Option<Rect> {
    let top = anchor.y.saturating_add(anchor.height);
    let available = bounds.y.saturating_add(bounds.height).saturating_sub(top);
    let wanted = u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2);
    let height = wanted.min(available);
    (height > 2).then(|| Rect::new(anchor.x, top, anchor.width, height))
}
