//! Ticket field edit form.
//!
//! Shows the free-text fields of one activity. Edits are reported as actions
//! and land in the controller's edit buffer; the form never persists
//! anything itself.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::text_editor::TextEditor;
use crate::api::Activity;
use crate::state::{EditBuffer, EditField};

/// Action emitted by the ticket form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketFormAction {
    /// A field's text changed.
    FieldChanged {
        id: String,
        field: EditField,
        value: String,
    },
    /// Save the buffered edits of an activity.
    Save(String),
}

/// The value a field should show: the buffered edit if any, else the
/// stored value.
pub fn field_value<'a>(activity: &'a Activity, buffer: &'a EditBuffer, field: EditField) -> &'a str {
    buffer.field(&activity.id, field).unwrap_or(match field {
        EditField::Response => activity.response_text(),
        EditField::InsideInfo => activity.inside_info_text(),
    })
}

/// Two multi-line fields for one activity, one of them focused.
#[derive(Debug, Default)]
pub struct TicketForm {
    field: EditField,
    /// Activity id being edited, if the editor is active.
    editing: Option<String>,
    editor: TextEditor,
}

impl TicketForm {
    /// Create a form focused on the response field.
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused field.
    #[cfg(test)]
    pub fn focused_field(&self) -> EditField {
        self.field
    }

    /// Move focus to the other field. Ignored while editing.
    pub fn next_field(&mut self) {
        if self.editing.is_none() {
            self.field = self.field.next();
        }
    }

    /// Whether the editor is active.
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Id of the activity being edited.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Start editing the focused field of `activity`.
    pub fn begin_editing(&mut self, activity: &Activity, buffer: &EditBuffer) {
        self.editor
            .set_content(field_value(activity, buffer, self.field));
        self.editing = Some(activity.id.clone());
    }

    /// Leave the editor. Typed text is already in the buffer.
    pub fn stop_editing(&mut self) {
        self.editing = None;
    }

    /// Handle a key while editing.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<TicketFormAction> {
        let id = self.editing.clone()?;

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.stop_editing();
                None
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                self.stop_editing();
                Some(TicketFormAction::Save(id))
            }
            _ => {
                if self.editor.handle_input(key) {
                    Some(TicketFormAction::FieldChanged {
                        id,
                        field: self.field,
                        value: self.editor.content(),
                    })
                } else {
                    None
                }
            }
        }
    }

    /// Render both fields of `activity`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, activity: &Activity, buffer: &EditBuffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        for (field, chunk) in EditField::ALL.into_iter().zip(chunks.iter()) {
            let dirty = buffer.field(&activity.id, field).is_some();
            let title = format!(" {}{} ", field.label(), if dirty { " *" } else { "" });
            let focused = field == self.field;

            if focused && self.editing.as_deref() == Some(activity.id.as_str()) {
                self.editor.render(frame, *chunk, true, &title);
                continue;
            }

            let border = if focused { Color::Cyan } else { Color::DarkGray };
            let paragraph = Paragraph::new(field_value(activity, buffer, field).to_string())
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .title(title)
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border)),
                );
            frame.render_widget(paragraph, *chunk);
        }
    }
}
