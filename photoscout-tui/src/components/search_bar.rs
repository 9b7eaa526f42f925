use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub struct SearchBarProps<'a> {
    pub text: &'a str,
    pub cursor: usize,
    pub focused: bool,
    /// Spinner frame shown in the title while a fetch is outstanding
    pub spinner: Option<&'a str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Window {
    start: usize,
    end: usize,
    cursor_col: u16,
}

/// The byte range of `text` that fits in `width` columns with the cursor visible.
fn window(text: &str, cursor: usize, width: u16) -> Window {
    let width = usize::from(width);
    if width == 0 || text.is_empty() {
        return Window {
            start: 0,
            end: 0,
            cursor_col: 0,
        };
    }

    // (byte offset, starting column) for every grapheme, plus the end sentinel
    let mut cells: Vec<(usize, usize)> = Vec::new();
    let mut col = 0;
    for (offset, grapheme) in text.grapheme_indices(true) {
        cells.push((offset, col));
        col += grapheme.width();
    }
    cells.push((text.len(), col));

    let cursor = cursor.min(text.len());
    let cursor_idx = cells
        .iter()
        .rposition(|(offset, _)| *offset <= cursor)
        .unwrap_or(0);
    let cursor_abs = cells[cursor_idx].1;

    // Scroll just far enough that the cursor sits on the last column
    let scroll = cursor_abs.saturating_sub(width - 1);
    let start_idx = cells
        .iter()
        .rposition(|(_, c)| *c <= scroll)
        .unwrap_or(0)
        .min(cells.len().saturating_sub(2));
    let start_col = cells[start_idx].1;

    let end_idx = cells
        .iter()
        .rposition(|(_, c)| *c <= start_col + width)
        .unwrap_or(start_idx);

    let cursor_col = cursor_abs.saturating_sub(start_col).min(width - 1);
    Window {
        start: cells[start_idx].0,
        end: cells[end_idx].0,
        cursor_col: u16::try_from(cursor_col).unwrap_or(u16::MAX),
    }
}

pub fn draw(f: &mut Frame, area: Rect, props: &SearchBarProps<'_>, theme: &Theme) {
    let mut title = vec![Span::styled(
        " photoscout ",
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    )];
    if let Some(frame) = props.spinner {
        title.push(Span::styled(
            format!("{frame} "),
            Style::default().fg(theme.accent),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title))
        .border_style(theme.pane_border(props.focused));
    let inner = block.inner(area);

    let (content, cursor_col) = if props.text.is_empty() {
        (
            Line::from(Span::styled(
                "Search Flickr...",
                theme.dim(),
            )),
            0,
        )
    } else {
        let w = window(props.text, props.cursor, inner.width);
        (Line::from(&props.text[w.start..w.end]), w.cursor_col)
    };
    f.render_widget(Paragraph::new(content).block(block), area);

    if props.focused && inner.width > 0 && inner.height > 0 {
        f.set_cursor_position((inner.x.saturating_add(cursor_col), inner.y));
    }
}
