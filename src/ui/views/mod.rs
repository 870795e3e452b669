//! Section views.

mod activity;
mod info;

pub use activity::{ActivityAction, ActivityView};
pub use info::{InfoAction, InfoView};
