//! Activity list view.
//!
//! Lists every activity with its paid badge. The badge always shows the
//! toggle's displayed value, so a flip is visible before the backend answers.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::events::KeyBindings;
use crate::state::ActivityStore;
use crate::ui::components::paid_toggle;
use crate::ui::theme::theme;

/// Actions emitted by the activity view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityAction {
    /// Flip the paid flag of an activity.
    TogglePaid(String),
    /// Open an activity in the info section.
    OpenInfo(String),
    /// Re-fetch all activities.
    Refresh,
}

/// The activity list.
#[derive(Debug, Default)]
pub struct ActivityView {
    table_state: TableState,
}

impl ActivityView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the selected row.
    pub fn selected(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Id of the selected activity.
    pub fn selected_id<'a>(&self, store: &'a ActivityStore) -> Option<&'a str> {
        store.get_index(self.selected()).map(|a| a.id.as_str())
    }

    /// Keep the selection inside a list of `len` rows.
    pub fn clamp(&mut self, len: usize) {
        let selected = self.selected().min(len.saturating_sub(1));
        self.table_state.select(Some(selected));
    }

    fn move_down(&mut self, len: usize) {
        if len > 0 {
            self.table_state.select(Some((self.selected() + 1).min(len - 1)));
        }
    }

    fn move_up(&mut self) {
        self.table_state
            .select(Some(self.selected().saturating_sub(1)));
    }

    /// Handle a key.
    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        store: &ActivityStore,
        keys: &KeyBindings,
    ) -> Option<ActivityAction> {
        if keys.is_down(&key) {
            self.move_down(store.len());
            return None;
        }
        if keys.is_up(&key) {
            self.move_up();
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char(' ') | KeyCode::Char('p'), KeyModifiers::NONE) => self
                .selected_id(store)
                .map(|id| ActivityAction::TogglePaid(id.to_string())),
            (KeyCode::Enter, _) => self
                .selected_id(store)
                .map(|id| ActivityAction::OpenInfo(id.to_string())),
            (KeyCode::Char('r'), KeyModifiers::NONE) => Some(ActivityAction::Refresh),
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                self.table_state.select(Some(0));
                None
            }
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                self.table_state
                    .select(Some(store.len().saturating_sub(1)));
                None
            }
            _ => None,
        }
    }

    /// Render the list.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, store: &ActivityStore) {
        let theme = theme();
        let block = Block::default()
            .title(format!(" Activity ({}) ", store.len()))
            .borders(Borders::ALL)
            .border_style(theme.border(true));

        if store.is_empty() {
            let empty = Paragraph::new(Line::styled(
                "No activities. Press r to refresh.",
                Style::default().fg(theme.muted),
            ))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        self.clamp(store.len());

        let rows: Vec<Row> = store
            .activities()
            .iter()
            .map(|activity| {
                let toggle = store.toggle(&activity.id);
                let paid = toggle.map(|t| t.displayed()).unwrap_or(activity.paid);
                let pending = toggle.map(|t| t.is_pending()).unwrap_or(false);
                Row::new(vec![
                    Cell::from(paid_toggle::badge(paid, pending)),
                    Cell::from(activity.client_display().to_string()),
                    Cell::from(activity.description.clone().unwrap_or_default()),
                    Cell::from(Span::styled(
                        activity.created_at.clone().unwrap_or_default(),
                        Style::default().fg(theme.muted),
                    )),
                ])
            })
            .collect();

        let header = Row::new(vec!["Paid", "Client", "Description", "Created"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1);

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Percentage(25),
                Constraint::Min(20),
                Constraint::Length(20),
            ],
        )
        .header(header)
        .block(block)
        .highlight_style(theme.selected())
        .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }
}
