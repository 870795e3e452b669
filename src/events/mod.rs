//! Event handling for the application.
//!
//! This module handles keyboard input and the periodic tick.

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::KeyBindings;

/// An input event for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// Periodic tick with no input.
    Tick,
    /// The application should exit.
    Quit,
}
