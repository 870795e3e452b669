//! Key hint bar shown at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintContext {
    Activity,
    Info,
    Editing,
    Dialog,
}

impl HintContext {
    /// Hint text for the context. Keys are written in brackets.
    pub fn hints(&self) -> &'static str {
        match self {
            HintContext::Activity => {
                "[j/k] move  [space] toggle paid  [r] refresh  [1/2/Tab] section  [q] quit"
            }
            HintContext::Info => {
                "[j/k] move  [h/l] field  [Enter] edit  [s] save  [r] refresh  [1/2/Tab] section"
            }
            HintContext::Editing => "[Esc] stop editing  [Ctrl+S] save",
            HintContext::Dialog => "[y] confirm  [n] cancel  [←/→] focus  [Enter] choose",
        }
    }
}

/// Render the hint bar for `context`.
pub fn render(frame: &mut Frame, area: Rect, context: HintContext) {
    let line = Line::from(hint_spans(context.hints()));
    frame.render_widget(Paragraph::new(line), area);
}

/// Split hint text into key and description spans.
fn hint_spans(hints: &str) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    let mut rest = hints;
    while let Some(start) = rest.find('[') {
        let Some(len) = rest[start..].find(']') else {
            break;
        };
        if start > 0 {
            spans.push(Span::styled(rest[..start].to_string(), text_style));
        }
        let end = start + len + 1;
        spans.push(Span::styled(rest[start..end].to_string(), key_style));
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text_style));
    }
    spans
}
