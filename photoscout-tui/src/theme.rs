use photoscout_core::config::{NamedColor, ThemeColor, ThemeConfig};
use ratatui::style::{Color, Modifier, Style};

/// Resolved colours. Components ask for the role-based styles below rather than
/// picking slots themselves.
pub struct Theme {
    /// Focused pane borders, the title and the result selection
    pub accent: Color,
    /// The recent-searches dropdown
    pub secondary: Color,
    /// Status-line errors
    pub error: Color,
    /// "No results" and "End of results"
    pub warning: Color,
    /// Placeholder text, photo ids and preview labels
    pub muted: Color,
    /// Unfocused pane borders
    pub border: Color,
    /// Key names in the status line and the preview
    pub hint: Color,
    /// Text on a selected row
    pub highlight_fg: Color,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            accent: to_ratatui_color(config.accent),
            secondary: to_ratatui_color(config.secondary),
            error: to_ratatui_color(config.error),
            warning: to_ratatui_color(config.warning),
            muted: to_ratatui_color(config.muted),
            border: to_ratatui_color(config.border),
            hint: to_ratatui_color(config.hint),
            highlight_fg: to_ratatui_color(config.highlight_fg),
        }
    }

    /// Border for the search bar and the result list.
    pub fn pane_border(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.accent } else { self.border })
    }

    pub fn result_selection(&self) -> Style {
        selection(self.accent, self.highlight_fg)
    }

    pub fn history_selection(&self) -> Style {
        selection(self.secondary, self.highlight_fg)
    }

    pub fn history(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.hint).add_modifier(Modifier::BOLD)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn notice(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error_line(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

fn selection(fill: Color, text: Color) -> Style {
    Style::default()
        .bg(fill)
        .fg(text)
        .add_modifier(Modifier::BOLD)
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

fn to_ratatui_color(color: ThemeColor) -> Color {
    match color {
        ThemeColor::Rgb(r, g, b) => Color::Rgb(r, g, b),
        ThemeColor::Named(named) => match named {
            NamedColor::Black => Color::Black,
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Blue => Color::Blue,
            NamedColor::Magenta => Color::Magenta,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::White => Color::White,
            // Terminal "gray" reads better as the dim variant
            NamedColor::Gray => Color::DarkGray,
        },
    }
}
