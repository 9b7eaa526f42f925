use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl NamedColor {
    const ALL: [NamedColor; 9] = [
        Self::Black,
        Self::Blue,
        Self::Cyan,
        Self::Gray,
        Self::Green,
        Self::Magenta,
        Self::Red,
        Self::White,
        Self::Yellow,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Gray => "gray",
        }
    }
}

/// A terminal color: one of the basic named colors or a `#rrggbb` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

impl FromStr for ThemeColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            format!(
                "invalid color '{s}': expected a named color (black, red, green, yellow, blue, magenta, cyan, white, gray/grey) or hex (#rrggbb)"
            )
        };

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
            };
            return Ok(Self::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
        }

        let lower = s.to_lowercase();
        let name = if lower == "grey" { "gray" } else { &lower };
        NamedColor::ALL
            .into_iter()
            .find(|color| color.as_str() == name)
            .map(Self::Named)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => f.write_str(n.as_str()),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl Serialize for ThemeColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ThemeColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct ThemeConfig {
    /// Search bar, selection and spinner (default: "magenta").
    pub accent: ThemeColor,
    /// Suggestions and photo ids (default: "cyan").
    pub secondary: ThemeColor,
    /// Error line (default: "red").
    pub error: ThemeColor,
    /// "No results" and end-of-results notices (default: "yellow").
    pub warning: ThemeColor,
    /// Dim text (default: "gray").
    pub muted: ThemeColor,
    /// Panel borders (default: "gray").
    pub border: ThemeColor,
    /// Key hints in the status bar (default: "blue").
    pub hint: ThemeColor,
    /// Foreground of the selected row (default: "white").
    pub highlight_fg: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: ThemeColor::Named(NamedColor::Magenta),
            secondary: ThemeColor::Named(NamedColor::Cyan),
            error: ThemeColor::Named(NamedColor::Red),
            warning: ThemeColor::Named(NamedColor::Yellow),
            muted: ThemeColor::Named(NamedColor::Gray),
            border: ThemeColor::Named(NamedColor::Gray),
            hint: ThemeColor::Named(NamedColor::Blue),
            highlight_fg: ThemeColor::Named(NamedColor::White),
        }
    }
}
