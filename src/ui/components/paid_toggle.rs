//! Paid status badge.

use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::theme;

/// Badge text for a paid value.
pub fn label(paid: bool) -> &'static str {
    if paid {
        "[x] Paid"
    } else {
        "[ ] Unpaid"
    }
}

/// A styled badge for the displayed paid value.
///
/// `pending` marks a toggle whose request has not been confirmed by a
/// refresh yet.
pub fn badge(paid: bool, pending: bool) -> Span<'static> {
    let theme = theme();
    let mut style = Style::default().fg(if paid { theme.paid } else { theme.unpaid });
    if pending {
        style = style.add_modifier(Modifier::ITALIC);
    } else {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(label(paid), style)
}
