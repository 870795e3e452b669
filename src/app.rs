//! Main application state and update logic.
//!
//! This module implements The Elm Architecture (TEA). `App` owns every piece
//! of mutable state; views only report intents. Network work is never
//! started here: the controller queues [`Effect`]s and the event loop hands
//! them to the task spawner.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, error, info, trace, warn};

use crate::api::ActivityUpdate;
use crate::config::Settings;
use crate::error::AppError;
use crate::events::{Event, KeyBindings};
use crate::state::{ActivityStore, EditBuffer, EditDraft, FailurePolicy, Section};
use crate::tasks::ApiMessage;
use crate::ui::components::{help_bar, section_bar};
use crate::ui::{
    ActivityAction, ActivityView, ConfirmAction, ConfirmDialog, ErrorDialog, HintContext,
    InfoAction, InfoView, LoadingIndicator, NotificationManager,
};

/// Side effects requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Re-fetch every activity.
    FetchActivities,
    /// Persist a paid flag.
    UpdatePaid {
        id: String,
        paid: bool,
        generation: u64,
    },
    /// Persist buffered ticket fields.
    SaveActivity { id: String, update: ActivityUpdate },
}

/// What happens once unsaved edits have been discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingIntent {
    SwitchSection(Section),
    Quit,
}

/// The main application struct that holds all state.
pub struct App {
    should_quit: bool,
    section: Section,
    store: ActivityStore,
    buffer: EditBuffer,
    /// Drafts handed to a save that has not answered yet.
    saving: HashMap<String, EditDraft>,
    /// Whether the first fetch has answered.
    loaded: bool,
    activity_view: ActivityView,
    info_view: InfoView,
    confirm: ConfirmDialog<PendingIntent>,
    error_dialog: ErrorDialog,
    notifications: NotificationManager,
    loading: LoadingIndicator,
    policy: FailurePolicy,
    keys: KeyBindings,
    effects: Vec<Effect>,
}

impl App {
    /// Create the controller from the user's settings.
    pub fn new(settings: &Settings) -> Self {
        debug!(
            section = %settings.default_section,
            policy = ?settings.failure_policy(),
            "Creating application"
        );
        Self {
            should_quit: false,
            section: settings.default_section,
            store: ActivityStore::new(),
            buffer: EditBuffer::new(),
            saving: HashMap::new(),
            loaded: false,
            activity_view: ActivityView::new(),
            info_view: InfoView::new(),
            confirm: ConfirmDialog::new(),
            error_dialog: ErrorDialog::new(),
            notifications: NotificationManager::new(),
            loading: LoadingIndicator::new(),
            policy: settings.failure_policy(),
            keys: KeyBindings::new(settings.vim_mode),
            effects: Vec::new(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The active section.
    #[cfg(test)]
    pub fn section(&self) -> Section {
        self.section
    }

    #[cfg(test)]
    pub fn store(&self) -> &ActivityStore {
        &self.store
    }

    #[cfg(test)]
    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    #[cfg(test)]
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    pub fn is_confirm_visible(&self) -> bool {
        self.confirm.is_visible()
    }

    pub fn is_error_dialog_visible(&self) -> bool {
        self.error_dialog.is_visible()
    }

    /// Drain the queued side effects.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    fn push_effect(&mut self, effect: Effect) {
        trace!(?effect, "Effect queued");
        self.loading.start();
        self.effects.push(effect);
    }

    /// Ask for a fresh copy of all activities.
    pub fn request_refresh(&mut self) {
        self.push_effect(Effect::FetchActivities);
    }

    /// Show an error. Critical errors get a modal dialog, others a toast.
    pub fn handle_error(&mut self, error: &AppError) {
        if error.is_critical() {
            warn!(error = %error, "Critical error occurred");
            self.error_dialog.show(error);
        } else {
            debug!(error = %error, "Recoverable error occurred");
            self.notifications.error(error.user_message());
        }
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
            }
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.loading.tick();
                self.notifications.tick();
            }
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Modals block everything else.
        if self.is_error_dialog_visible() {
            self.error_dialog.handle_input(key);
            return;
        }
        if self.is_confirm_visible() {
            match self.confirm.handle_input(key) {
                Some(ConfirmAction::Confirm(intent)) => self.apply_intent(intent),
                Some(ConfirmAction::Cancel) => debug!("Discard cancelled"),
                None => {}
            }
            return;
        }

        // The text editor owns the keyboard while active.
        if self.section == Section::Info && self.info_view.is_editing() {
            if let Some(action) =
                self.info_view
                    .handle_input(key, &self.store, &self.buffer, &self.keys)
            {
                self.apply_info_action(action);
            }
            return;
        }

        if key.code == KeyCode::Char('q') && key.modifiers == KeyModifiers::NONE {
            self.request_quit();
            return;
        }

        if let Some(target) = section_bar::handle_key(key, self.section) {
            self.select_section(target);
            return;
        }

        match self.section {
            Section::Activity => {
                if let Some(action) =
                    self.activity_view
                        .handle_input(key, &self.store, &self.keys)
                {
                    self.apply_activity_action(action);
                }
            }
            Section::Info => {
                if let Some(action) =
                    self.info_view
                        .handle_input(key, &self.store, &self.buffer, &self.keys)
                {
                    self.apply_info_action(action);
                }
            }
        }
    }

    /// Request a section change.
    ///
    /// Selecting the active section does nothing. Leaving the info section
    /// with unsaved edits asks first, since leaving discards them.
    pub fn select_section(&mut self, target: Section) {
        if target == self.section {
            trace!(section = %target, "Section already active");
            return;
        }
        if self.section == Section::Info && !self.buffer.is_empty() {
            self.confirm.show(
                "Discard unsaved edits?",
                format!(
                    "{} ticket(s) have unsaved edits that will be lost.",
                    self.buffer.len()
                ),
                PendingIntent::SwitchSection(target),
            );
            return;
        }
        self.switch_section(target);
    }

    fn switch_section(&mut self, target: Section) {
        debug!(from = %self.section, to = %target, "Switching section");
        self.info_view.stop_editing();
        self.section = target;
    }

    fn request_quit(&mut self) {
        if !self.buffer.is_empty() {
            self.confirm.show(
                "Quit with unsaved edits?",
                "Unsaved ticket edits will be lost.",
                PendingIntent::Quit,
            );
        } else {
            self.should_quit = true;
        }
    }

    fn apply_intent(&mut self, intent: PendingIntent) {
        info!(drafts = self.buffer.len(), ?intent, "Discarding unsaved edits");
        self.buffer.clear();
        match intent {
            PendingIntent::SwitchSection(target) => self.switch_section(target),
            PendingIntent::Quit => self.should_quit = true,
        }
    }

    fn apply_activity_action(&mut self, action: ActivityAction) {
        match action {
            ActivityAction::TogglePaid(id) => self.toggle_paid(&id),
            ActivityAction::OpenInfo(id) => {
                self.info_view.select_id(&self.store, &id);
                self.select_section(Section::Info);
            }
            ActivityAction::Refresh => {
                info!("Refreshing activities");
                self.request_refresh();
            }
        }
    }

    fn apply_info_action(&mut self, action: InfoAction) {
        match action {
            InfoAction::FieldChanged { id, field, value } => {
                trace!(activity_id = %id, ?field, "Field edited");
                self.buffer.set_field(&id, field, value);
            }
            InfoAction::Save(id) => self.save(&id),
            InfoAction::Refresh => {
                info!("Refreshing activities");
                self.request_refresh();
            }
        }
    }

    /// Flip the paid flag of an activity and queue the remote write.
    pub fn toggle_paid(&mut self, id: &str) {
        let Some(change) = self.store.begin_toggle(id) else {
            warn!(activity_id = %id, "Toggle requested for unknown activity");
            return;
        };
        info!(
            activity_id = %change.id,
            paid = change.paid,
            generation = change.generation,
            "Updating paid flag"
        );
        self.push_effect(Effect::UpdatePaid {
            id: change.id,
            paid: change.paid,
            generation: change.generation,
        });
    }

    /// Hand the buffered edits of one ticket to persistence.
    ///
    /// The draft stays in the buffer until the save succeeds.
    pub fn save(&mut self, id: &str) {
        let Some(draft) = self.buffer.draft(id).cloned() else {
            self.notifications.info("No changes to save");
            return;
        };
        info!(activity_id = %id, "Saving ticket fields");
        self.saving.insert(id.to_string(), draft.clone());
        self.push_effect(Effect::SaveActivity {
            id: id.to_string(),
            update: ActivityUpdate::from(draft),
        });
    }

    /// Apply the result of a background task.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        self.loading.finish();
        match message {
            ApiMessage::ActivitiesFetched(Ok(activities)) => {
                debug!(count = activities.len(), "Activities fetched");
                self.store.replace_all(activities);
                self.activity_view.clamp(self.store.len());
                self.info_view.sync_selection(&self.store);
                self.loaded = true;
            }
            ApiMessage::ActivitiesFetched(Err(e)) => {
                warn!(error = %e, "Failed to fetch activities");
                self.notifications.error(format!("Refresh failed: {}", e));
            }
            ApiMessage::PaidUpdated {
                id,
                paid,
                generation,
                result: Ok(()),
            } => {
                debug!(activity_id = %id, paid, generation, "Paid flag updated");
                self.store.settle_toggle(&id, generation);
                self.request_refresh();
            }
            ApiMessage::PaidUpdated {
                id,
                paid,
                generation,
                result: Err(e),
            } => {
                error!(activity_id = %id, paid, generation, error = %e, "Failed to update paid flag");
                if self.store.fail_toggle(&id, generation, self.policy) {
                    debug!(activity_id = %id, "Paid flag rolled back");
                }
            }
            ApiMessage::ActivitySaved { id, result: Ok(()) } => {
                info!(activity_id = %id, "Ticket saved");
                let sent = self.saving.remove(&id);
                // Keep edits typed after the save was sent.
                if sent.as_ref() == self.buffer.draft(&id) {
                    self.buffer.discard(&id);
                }
                self.notifications.success("Ticket saved");
                self.request_refresh();
            }
            ApiMessage::ActivitySaved { id, result: Err(e) } => {
                warn!(activity_id = %id, error = %e, "Failed to save ticket");
                self.saving.remove(&id);
                self.notifications.error(format!("Save failed: {}", e));
            }
        }
    }

    fn hint_context(&self) -> HintContext {
        if self.is_confirm_visible() || self.is_error_dialog_visible() {
            HintContext::Dialog
        } else if self.section == Section::Info && self.info_view.is_editing() {
            HintContext::Editing
        } else {
            match self.section {
                Section::Activity => HintContext::Activity,
                Section::Info => HintContext::Info,
            }
        }
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Sections
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        section_bar::render(frame, chunks[0], self.section);
        self.render_content(frame, chunks[1]);
        self.render_footer(frame, chunks[2]);

        self.notifications.render(frame, area);
        self.confirm.render(frame, area);
        self.error_dialog.render(frame, area);
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        if !self.loaded && self.store.is_empty() {
            let text = Paragraph::new(Line::styled(
                " Loading activities...",
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(text, area);
            return;
        }
        match self.section {
            Section::Activity => self.activity_view.render(frame, area, &self.store),
            Section::Info => self
                .info_view
                .render(frame, area, &self.store, &self.buffer),
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let status = Line::from(vec![
            self.loading.span(),
            Span::styled(
                if !self.buffer.is_empty() {
                    format!(" {} unsaved ", self.buffer.len())
                } else {
                    String::new()
                },
                Style::default().fg(Color::Yellow),
            ),
        ]);
        let width = status.width() as u16;

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(width)])
            .split(area);
        help_bar::render(frame, chunks[0], self.hint_context());
        frame.render_widget(Paragraph::new(status), chunks[1]);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
