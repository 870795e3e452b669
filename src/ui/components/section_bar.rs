//! Section selector bar.
//!
//! Stateless: it renders whatever section it is given and maps keys to a
//! requested section. The controller decides whether the switch happens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::Section;
use crate::ui::theme::theme;

/// Map a key to the section it selects.
///
/// Digits pick a section directly; Tab cycles from `current`.
pub fn handle_key(key: KeyEvent, current: Section) -> Option<Section> {
    match (key.code, key.modifiers) {
        (KeyCode::Tab, KeyModifiers::NONE) => Some(current.next()),
        (KeyCode::Char(c), KeyModifiers::NONE) => Section::from_shortcut(c),
        _ => None,
    }
}

/// Render the tabs with `current` highlighted.
pub fn render(frame: &mut Frame, area: Rect, current: Section) {
    let theme = theme();
    let mut spans = vec![Span::raw(" ")];

    for section in Section::ALL {
        let label = format!(" {} {} ", section.shortcut(), section.label());
        let style = if section == current {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digit_selects_section() {
        assert_eq!(
            handle_key(key(KeyCode::Char('2')), Section::Activity),
            Some(Section::Info)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('1')), Section::Activity),
            Some(Section::Activity)
        );
    }

    #[test]
    fn test_tab_cycles() {
        assert_eq!(
            handle_key(key(KeyCode::Tab), Section::Info),
            Some(Section::Activity)
        );
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(handle_key(key(KeyCode::Char('9')), Section::Activity), None);
        assert_eq!(handle_key(key(KeyCode::Char('x')), Section::Activity), None);
        let ctrl_one = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(ctrl_one, Section::Info), None);
    }
}
