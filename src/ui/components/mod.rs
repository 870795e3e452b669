//! Reusable UI components.

pub mod help_bar;
mod loading;
mod modal;
mod notification;
pub mod paid_toggle;
pub mod section_bar;
mod text_editor;
mod ticket_form;

pub use help_bar::HintContext;
pub use loading::LoadingIndicator;
pub use modal::{ConfirmAction, ConfirmDialog, ErrorDialog};
pub use notification::NotificationManager;
pub use ticket_form::{TicketForm, TicketFormAction};
