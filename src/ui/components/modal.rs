//! Modal dialogs.
//!
//! While a modal is visible the controller routes every key to it first, so
//! the rest of the interface is blocked.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::error::AppError;

/// Outcome of a confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction<T> {
    /// The user confirmed; carries the intent supplied when the dialog opened.
    Confirm(T),
    /// The user cancelled; the intent is dropped.
    Cancel,
}

/// Which dialog button has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogButton {
    Cancel,
    Confirm,
}

/// A yes/no dialog holding a pending intent.
///
/// It can only be closed through its two buttons. Esc and every other key
/// are swallowed while it is open.
#[derive(Debug)]
pub struct ConfirmDialog<T> {
    title: String,
    message: String,
    pending: Option<T>,
    focus: DialogButton,
}

impl<T> Default for ConfirmDialog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ConfirmDialog<T> {
    /// Create a hidden dialog.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            pending: None,
            focus: DialogButton::Cancel,
        }
    }

    /// Open the dialog for `intent`. Cancel is focused initially.
    pub fn show(&mut self, title: impl Into<String>, message: impl Into<String>, intent: T) {
        self.title = title.into();
        self.message = message.into();
        self.pending = Some(intent);
        self.focus = DialogButton::Cancel;
    }

    /// Whether the dialog is open.
    pub fn is_visible(&self) -> bool {
        self.pending.is_some()
    }

    /// The dialog title.
    #[cfg(test)]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The dialog message.
    #[cfg(test)]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Handle a key while the dialog is open.
    ///
    /// Returns an action exactly once, when the dialog closes.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ConfirmAction<T>> {
        self.pending.as_ref()?;

        match (key.code, key.modifiers) {
            (KeyCode::Char('y') | KeyCode::Char('Y'), _) => self.confirm(),
            (KeyCode::Char('n') | KeyCode::Char('N'), _) => self.cancel(),
            (KeyCode::Enter, KeyModifiers::NONE) => match self.focus {
                DialogButton::Confirm => self.confirm(),
                DialogButton::Cancel => self.cancel(),
            },
            (KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab, _)
            | (KeyCode::Char('h') | KeyCode::Char('l'), KeyModifiers::NONE) => {
                self.focus = match self.focus {
                    DialogButton::Cancel => DialogButton::Confirm,
                    DialogButton::Confirm => DialogButton::Cancel,
                };
                None
            }
            _ => None,
        }
    }

    fn confirm(&mut self) -> Option<ConfirmAction<T>> {
        self.pending.take().map(ConfirmAction::Confirm)
    }

    fn cancel(&mut self) -> Option<ConfirmAction<T>> {
        self.pending.take().map(|_| ConfirmAction::Cancel)
    }

    /// Render the dialog centered over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.is_visible() {
            return;
        }

        let dialog_area = centered_rect(area, 50, 8);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let message = Paragraph::new(self.message.as_str())
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center);
        frame.render_widget(message, chunks[0]);

        let button = |label: &'static str, focused: bool| {
            let style = if focused {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(label, style)
        };
        let buttons = Line::from(vec![
            button(" [N]o, cancel ", self.focus == DialogButton::Cancel),
            Span::raw("   "),
            button(" [Y]es, confirm ", self.focus == DialogButton::Confirm),
        ]);
        frame.render_widget(
            Paragraph::new(buttons).alignment(Alignment::Center),
            chunks[1],
        );
    }
}

/// A dialog for critical errors. Dismissed with Enter or Esc.
#[derive(Debug, Default)]
pub struct ErrorDialog {
    title: String,
    message: String,
    visible: bool,
}

impl ErrorDialog {
    /// Create a hidden error dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an application error.
    pub fn show(&mut self, error: &AppError) {
        self.show_message("Error", error.user_message());
    }

    /// Show a custom message.
    pub fn show_message(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.title = title.into();
        self.message = message.into();
        self.visible = true;
    }

    /// Hide the dialog.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Whether the dialog is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The message shown.
    #[cfg(test)]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Handle a key. Returns true if the dialog closed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        if self.visible && matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.dismiss();
            return true;
        }
        false
    }

    /// Render the dialog centered over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog_area = centered_rect(area, 60, 9);
        frame.render_widget(Clear, dialog_area);

        let text = vec![
            Line::raw(""),
            Line::styled(self.message.clone(), Style::default().fg(Color::White)),
            Line::raw(""),
            Line::styled("Press Enter to dismiss", Style::default().fg(Color::DarkGray)),
        ];
        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
        frame.render_widget(paragraph, dialog_area);
    }
}

/// Calculate a centered rectangle within the given area.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
