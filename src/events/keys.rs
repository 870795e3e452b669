//! Key binding definitions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Navigation key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Whether vim-style bindings are enabled.
    pub vim_mode: bool,
}

impl KeyBindings {
    /// Create new key bindings.
    pub fn new(vim_mode: bool) -> Self {
        Self { vim_mode }
    }

    /// Whether the key moves the selection down.
    pub fn is_down(&self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Down => true,
            KeyCode::Char('j') => self.vim_mode && key.modifiers == KeyModifiers::NONE,
            _ => false,
        }
    }

    /// Whether the key moves the selection up.
    pub fn is_up(&self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => true,
            KeyCode::Char('k') => self.vim_mode && key.modifiers == KeyModifiers::NONE,
            _ => false,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(true)
    }
}
