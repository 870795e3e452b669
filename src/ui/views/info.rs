//! Ticket info view.
//!
//! A ticket list on the left and the edit form for the selected ticket on
//! the right. Edits only reach the controller's buffer; saving is an action.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::events::KeyBindings;
use crate::state::{ActivityStore, EditBuffer, EditField};
use crate::ui::components::{paid_toggle, TicketForm, TicketFormAction};
use crate::ui::theme::theme;

/// Actions emitted by the info view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoAction {
    /// A buffered field changed.
    FieldChanged {
        id: String,
        field: EditField,
        value: String,
    },
    /// Persist the buffered edits of a ticket.
    Save(String),
    /// Re-fetch all activities.
    Refresh,
}

impl From<TicketFormAction> for InfoAction {
    fn from(action: TicketFormAction) -> Self {
        match action {
            TicketFormAction::FieldChanged { id, field, value } => {
                InfoAction::FieldChanged { id, field, value }
            }
            TicketFormAction::Save(id) => InfoAction::Save(id),
        }
    }
}

/// The info section.
#[derive(Debug, Default)]
pub struct InfoView {
    list_state: ListState,
    form: TicketForm,
}

impl InfoView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    /// Whether the text editor has focus.
    pub fn is_editing(&self) -> bool {
        self.form.is_editing()
    }

    /// Leave the text editor without touching the buffer.
    pub fn stop_editing(&mut self) {
        self.form.stop_editing();
    }

    /// Select the ticket with `id`, if present.
    pub fn select_id(&mut self, store: &ActivityStore, id: &str) {
        if let Some(index) = store.position(id) {
            self.form.stop_editing();
            self.list_state.select(Some(index));
        }
    }

    /// Follow fresh data.
    ///
    /// While editing, the selection moves to wherever the edited ticket now
    /// sits; if it is gone the editor closes.
    pub fn sync_selection(&mut self, store: &ActivityStore) {
        if let Some(id) = self.form.editing_id() {
            match store.position(id) {
                Some(index) => self.list_state.select(Some(index)),
                None => self.form.stop_editing(),
            }
        }
        self.clamp(store.len());
    }

    /// Keep the selection inside a list of `len` rows.
    pub fn clamp(&mut self, len: usize) {
        let selected = self.selected().min(len.saturating_sub(1));
        self.list_state.select(Some(selected));
    }

    /// Handle a key.
    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        store: &ActivityStore,
        buffer: &EditBuffer,
        keys: &KeyBindings,
    ) -> Option<InfoAction> {
        if self.form.is_editing() {
            return self.form.handle_input(key).map(InfoAction::from);
        }

        if keys.is_down(&key) {
            if !store.is_empty() {
                let next = (self.selected() + 1).min(store.len() - 1);
                self.list_state.select(Some(next));
            }
            return None;
        }
        if keys.is_up(&key) {
            self.list_state
                .select(Some(self.selected().saturating_sub(1)));
            return None;
        }

        let selected = store.get_index(self.selected());
        match (key.code, key.modifiers) {
            (KeyCode::Left | KeyCode::Right, _)
            | (KeyCode::Char('h') | KeyCode::Char('l'), KeyModifiers::NONE) => {
                self.form.next_field();
                None
            }
            (KeyCode::Enter, _) | (KeyCode::Char('i'), KeyModifiers::NONE) => {
                if let Some(activity) = selected {
                    self.form.begin_editing(activity, buffer);
                }
                None
            }
            (KeyCode::Char('s'), KeyModifiers::NONE | KeyModifiers::CONTROL) => {
                selected.map(|a| InfoAction::Save(a.id.clone()))
            }
            (KeyCode::Char('r'), KeyModifiers::NONE) => Some(InfoAction::Refresh),
            _ => None,
        }
    }

    /// Render the list and the form.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        store: &ActivityStore,
        buffer: &EditBuffer,
    ) {
        let theme = theme();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(area);

        if store.is_empty() {
            let empty = Paragraph::new(Line::styled(
                "No tickets loaded.",
                Style::default().fg(theme.muted),
            ))
            .block(Block::default().title(" Tickets ").borders(Borders::ALL));
            frame.render_widget(empty, area);
            return;
        }

        self.clamp(store.len());

        let items: Vec<ListItem> = store
            .activities()
            .iter()
            .map(|activity| {
                let paid = store.displayed_paid(&activity.id).unwrap_or(activity.paid);
                let marker = if buffer.draft(&activity.id).is_some() {
                    " *"
                } else {
                    ""
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        if paid { "● " } else { "○ " },
                        Style::default().fg(if paid { theme.paid } else { theme.unpaid }),
                    ),
                    Span::raw(activity.client_display().to_string()),
                    Span::styled(marker, Style::default().fg(theme.accent)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Tickets ")
                    .borders(Borders::ALL)
                    .border_style(theme.border(!self.form.is_editing())),
            )
            .highlight_style(theme.selected())
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        if let Some(activity) = store.get_index(self.selected()) {
            let detail = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(4)])
                .split(chunks[1]);

            let paid = store.displayed_paid(&activity.id).unwrap_or(activity.paid);
            let pending = store
                .toggle(&activity.id)
                .map(|t| t.is_pending())
                .unwrap_or(false);
            let header = Line::from(vec![
                Span::raw(format!(" {}  ", activity.client_display())),
                paid_toggle::badge(paid, pending),
                Span::styled(
                    format!("  {}", activity.description.as_deref().unwrap_or("")),
                    Style::default().fg(theme.muted),
                ),
            ]);
            frame.render_widget(Paragraph::new(header), detail[0]);

            self.form.render(frame, detail[1], activity, buffer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Activity;

    fn store() -> ActivityStore {
        let mut store = ActivityStore::new();
        let mut a = Activity::new("a", false);
        a.response = Some("hi".to_string());
        store.replace_all(vec![a, Activity::new("b", true)]);
        store
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_edit_emits_field_change_for_selected() {
        let store = store();
        let buffer = EditBuffer::new();
        let keys = KeyBindings::default();
        let mut view = InfoView::new();

        assert_eq!(view.handle_input(key(KeyCode::Enter), &store, &buffer, &keys), None);
        assert!(view.is_editing());

        let action = view.handle_input(key(KeyCode::Char('!')), &store, &buffer, &keys);
        assert_eq!(
            action,
            Some(InfoAction::FieldChanged {
                id: "a".to_string(),
                field: EditField::Response,
                value: "hi!".to_string(),
            })
        );
    }

    #[test]
    fn test_digits_go_to_editor_while_editing() {
        let store = store();
        let buffer = EditBuffer::new();
        let keys = KeyBindings::default();
        let mut view = InfoView::new();
        view.handle_input(key(KeyCode::Char('i')), &store, &buffer, &keys);

        match view.handle_input(key(KeyCode::Char('1')), &store, &buffer, &keys) {
            Some(InfoAction::FieldChanged { value, .. }) => assert_eq!(value, "hi1"),
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_save_selected() {
        let store = store();
        let buffer = EditBuffer::new();
        let keys = KeyBindings::default();
        let mut view = InfoView::new();
        view.handle_input(key(KeyCode::Char('j')), &store, &buffer, &keys);

        assert_eq!(
            view.handle_input(key(KeyCode::Char('s')), &store, &buffer, &keys),
            Some(InfoAction::Save("b".to_string()))
        );
    }

    #[test]
    fn test_field_switch_then_edit() {
        let store = store();
        let mut buffer = EditBuffer::new();
        buffer.set_field("a", EditField::InsideInfo, "draft".to_string());
        let keys = KeyBindings::default();
        let mut view = InfoView::new();

        view.handle_input(key(KeyCode::Char('l')), &store, &buffer, &keys);
        view.handle_input(key(KeyCode::Enter), &store, &buffer, &keys);
        match view.handle_input(key(KeyCode::Char('!')), &store, &buffer, &keys) {
            Some(InfoAction::FieldChanged { field, value, .. }) => {
                assert_eq!(field, EditField::InsideInfo);
                assert_eq!(value, "draft!");
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_select_id() {
        let store = store();
        let mut view = InfoView::new();
        view.select_id(&store, "b");
        assert_eq!(view.selected(), 1);

        view.select_id(&store, "missing");
        assert_eq!(view.selected(), 1);
    }

    #[test]
    fn test_sync_selection_follows_edited_ticket() {
        let mut store = store();
        let buffer = EditBuffer::new();
        let keys = KeyBindings::default();
        let mut view = InfoView::new();
        view.handle_input(key(KeyCode::Char('j')), &store, &buffer, &keys);
        view.handle_input(key(KeyCode::Enter), &store, &buffer, &keys);

        store.replace_all(vec![
            Activity::new("b", true),
            Activity::new("c", false),
            Activity::new("a", false),
        ]);
        view.sync_selection(&store);

        assert!(view.is_editing());
        assert_eq!(view.selected(), 0);
        match view.handle_input(key(KeyCode::Char('x')), &store, &buffer, &keys) {
            Some(InfoAction::FieldChanged { id, .. }) => assert_eq!(id, "b"),
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_sync_selection_stops_editing_removed_ticket() {
        let mut store = store();
        let buffer = EditBuffer::new();
        let keys = KeyBindings::default();
        let mut view = InfoView::new();
        view.handle_input(key(KeyCode::Char('j')), &store, &buffer, &keys);
        view.handle_input(key(KeyCode::Enter), &store, &buffer, &keys);

        store.replace_all(vec![Activity::new("a", false)]);
        view.sync_selection(&store);

        assert!(!view.is_editing());
        assert_eq!(view.selected(), 0);
    }

    #[test]
    fn test_empty_store() {
        let store = ActivityStore::new();
        let buffer = EditBuffer::new();
        let keys = KeyBindings::default();
        let mut view = InfoView::new();

        assert_eq!(view.handle_input(key(KeyCode::Enter), &store, &buffer, &keys), None);
        assert!(!view.is_editing());
        assert_eq!(view.handle_input(key(KeyCode::Char('s')), &store, &buffer, &keys), None);
    }
}
