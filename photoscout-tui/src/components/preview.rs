use super::centered_rect;
use crate::theme::Theme;
use photoscout_core::photo::{PhotoRecord, PhotoSize};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn field<'a>(label: &'a str, value: String, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:>10} "), theme.dim()),
        Span::raw(value),
    ])
}

pub fn draw(f: &mut Frame, area: Rect, photo: &PhotoRecord, theme: &Theme) {
    let text = vec![
        Line::from(Span::styled(
            photo.display_title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        field("id", photo.id.clone(), theme),
        field("server", photo.server.clone(), theme),
        field("preview", photo.url(PhotoSize::Preview), theme),
        field("thumbnail", photo.url(PhotoSize::Thumbnail), theme),
        Line::raw(""),
        Line::from(vec![
            Span::styled("o", theme.key_hint()),
            Span::raw(" open in browser   "),
            Span::styled("esc", theme.key_hint()),
            Span::raw(" close"),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" preview ")
        .border_style(theme.pane_border(true));

    let popup = centered_rect(80, 50, area);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}
