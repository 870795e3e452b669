//! Colors shared by the views.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Accent for focused borders and the active section tab.
    pub accent: Color,
    /// Paid badge.
    pub paid: Color,
    /// Unpaid badge.
    pub unpaid: Color,
    /// Secondary text and unfocused borders.
    pub muted: Color,
    /// Background of the selected row.
    pub selection_bg: Color,
}

const DEFAULT_THEME: Theme = Theme {
    accent: Color::Cyan,
    paid: Color::Green,
    unpaid: Color::Yellow,
    muted: Color::DarkGray,
    selection_bg: Color::Rgb(40, 44, 52),
};

impl Default for Theme {
    fn default() -> Self {
        DEFAULT_THEME
    }
}

impl Theme {
    /// Style for the selected row of a list.
    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style, highlighted when focused.
    pub fn border(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.accent } else { self.muted })
    }
}

/// The active theme.
pub fn theme() -> &'static Theme {
    &DEFAULT_THEME
}
