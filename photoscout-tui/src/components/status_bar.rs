use crate::theme::Theme;
use photoscout_core::{Mode, ViewModel};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

fn hints(view: &ViewModel<'_>) -> &'static [(&'static str, &'static str)] {
    match view.mode {
        Mode::Browsing => &[("type", "search"), ("tab", "results"), ("esc", "quit")],
        Mode::Searching => &[
            ("enter", "save search"),
            ("tab", "results"),
            ("ctrl+u", "clear"),
            ("esc", "quit"),
        ],
    }
}

pub fn draw(f: &mut Frame, area: Rect, view: &ViewModel<'_>, error: Option<&str>, theme: &Theme) {
    let line = if let Some(error) = error {
        Line::from(Span::styled(
            format!(" Error: {error}"),
            theme.error_line(),
        ))
    } else if view.mode == Mode::Searching && !view.has_more && !view.items.is_empty() {
        Line::from(Span::styled(" End of results", theme.notice()))
    } else {
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, label)) in hints(view).iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", theme.dim()));
            }
            spans.push(Span::styled(*key, theme.key_hint()));
            spans.push(Span::styled(format!(" {label}"), theme.dim()));
        }
        Line::from(spans)
    };
    f.render_widget(Paragraph::new(line), area);
}
