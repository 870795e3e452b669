//! Terminal user interface.
//!
//! Views and components render state they are handed and report user
//! intents as actions. Only the controller mutates state.

pub mod components;
pub mod theme;
pub mod views;

pub use components::{
    ConfirmAction, ConfirmDialog, ErrorDialog, HintContext, LoadingIndicator, NotificationManager,
};
pub use views::{ActivityAction, ActivityView, InfoAction, InfoView};
