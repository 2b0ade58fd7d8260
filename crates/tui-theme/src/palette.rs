//! Semantic color palettes.

use ratatui::style::{Color, Modifier, Style};

/// Colors used by the widgets, named by role rather than hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub error: Color,
    pub success: Color,
    /// Public holidays
    pub holiday: Color,
    /// Pre-holiday shortened work days
    pub short_day: Color,
    pub weekend: Color,
    /// Search highlight background
    pub highlight: Color,
    /// Current date marker
    pub today: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            bg: Color::Rgb(0x1e, 0x1e, 0x2e),
            accent: Color::Rgb(0x89, 0xb4, 0xfa),
            muted: Color::Rgb(0x6c, 0x70, 0x86),
            border: Color::Rgb(0x45, 0x47, 0x5a),
            error: Color::Rgb(0xf3, 0x8b, 0xa8),
            success: Color::Rgb(0xa6, 0xe3, 0xa1),
            holiday: Color::Rgb(0xf3, 0x8b, 0xa8),
            short_day: Color::Rgb(0xf9, 0xe2, 0xaf),
            weekend: Color::Rgb(0xfa, 0xb3, 0x87),
            highlight: Color::Rgb(0x58, 0x5b, 0x70),
            today: Color::Rgb(0x94, 0xe2, 0xd5),
        }
    }

    pub fn light() -> Self {
        Self {
            fg: Color::Rgb(0x4c, 0x4f, 0x69),
            bg: Color::Rgb(0xef, 0xf1, 0xf5),
            accent: Color::Rgb(0x1e, 0x66, 0xf5),
            muted: Color::Rgb(0x8c, 0x8f, 0xa1),
            border: Color::Rgb(0xbc, 0xc0, 0xcc),
            error: Color::Rgb(0xd2, 0x0f, 0x39),
            success: Color::Rgb(0x40, 0xa0, 0x2b),
            holiday: Color::Rgb(0xd2, 0x0f, 0x39),
            short_day: Color::Rgb(0xdf, 0x8e, 0x1d),
            weekend: Color::Rgb(0xfe, 0x64, 0x0b),
            highlight: Color::Rgb(0xcc, 0xd0, 0xda),
            today: Color::Rgb(0x17, 0x92, 0x99),
        }
    }

    /// Base text style (foreground on background).
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn block_border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for a focused or pressed control.
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_text(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}
