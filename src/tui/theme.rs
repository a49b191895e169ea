//! Terminal colors for the predictor UI.

use ratatui::style::{Color, Modifier, Style};

use crate::charts::palette::{DEFAULT_COLOR, MUTED_COLOR};
use crate::color::Rgba;

/// Convert a chart color to a 24-bit terminal color. Alpha is dropped.
#[must_use]
pub fn to_color(color: Rgba) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Styles used across the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Headings and borders.
    pub primary: Color,
    /// Focus highlight and live data.
    pub accent: Color,
    /// Hints and secondary text.
    pub muted: Color,
    /// Inline validation and request errors.
    pub error: Color,
}

impl Theme {
    /// Border style, highlighted when `focused`.
    #[must_use]
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.primary)
        }
    }

    /// Bold heading style.
    #[must_use]
    pub fn heading(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    /// Secondary text style.
    #[must_use]
    pub fn hint(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Error text style.
    #[must_use]
    pub fn error_text(&self) -> Style {
        Style::default().fg(self.error)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: to_color(Rgba::from_u32(0x8ab6c9)),
            accent: to_color(DEFAULT_COLOR),
            muted: to_color(MUTED_COLOR).into_lighter(),
            error: to_color(Rgba::from_u32(0xe63946)),
        }
    }
}

trait Lighten {
    fn into_lighter(self) -> Self;
}

impl Lighten for Color {
    fn into_lighter(self) -> Self {
        match self {
            Color::Rgb(r, g, b) => {
                let up = |c: u8| c.saturating_add((255 - c) / 2);
                Color::Rgb(up(r), up(g), up(b))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_color() {
        assert_eq!(to_color(Rgba::from_u32(0x2a9d8f)), Color::Rgb(0x2a, 0x9d, 0x8f));
        assert_eq!(to_color(Rgba::new(1, 2, 3, 0)), Color::Rgb(1, 2, 3));
    }

    #[test]
    fn test_lighten() {
        assert_eq!(Color::Rgb(0, 100, 255).into_lighter(), Color::Rgb(127, 177, 255));
        assert_eq!(Color::Red.into_lighter(), Color::Red);
    }

    #[test]
    fn test_border_focus() {
        let theme = Theme::default();
        assert_eq!(theme.border(true).fg, Some(theme.accent));
        assert_eq!(theme.border(false).fg, Some(theme.primary));
    }
}
