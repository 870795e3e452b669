//! Toast notifications.
//!
//! Toasts report the outcome of ticket saves and refreshes. They expire on
//! their own and never take keyboard focus.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// How long info and success toasts stay on screen.
const SUCCESS_TTL: Duration = Duration::from_secs(3);
/// How long an error toast stays on screen.
const ERROR_TTL: Duration = Duration::from_secs(6);
/// Width of a toast including borders.
const TOAST_WIDTH: u16 = 48;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    fn icon(&self) -> &'static str {
        match self {
            ToastKind::Info => "ℹ",
            ToastKind::Success => "✓",
            ToastKind::Error => "✗",
        }
    }

    fn color(&self) -> Color {
        match self {
            ToastKind::Info => Color::Blue,
            ToastKind::Success => Color::Green,
            ToastKind::Error => Color::Red,
        }
    }

    fn ttl(&self) -> Duration {
        match self {
            ToastKind::Info | ToastKind::Success => SUCCESS_TTL,
            ToastKind::Error => ERROR_TTL,
        }
    }
}

/// A single toast message.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
    ttl: Duration,
}

impl Toast {
    /// Create a toast with the default lifetime for its kind.
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
            ttl: kind.ttl(),
        }
    }

    /// Override the lifetime.
    #[cfg(test)]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Whether the toast has outlived its lifetime.
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= self.ttl
    }
}

/// Stack of visible toasts, newest last.
#[derive(Debug)]
pub struct NotificationManager {
    toasts: VecDeque<Toast>,
    capacity: usize,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    /// Create a manager showing at most three toasts.
    pub fn new() -> Self {
        Self::with_capacity(3)
    }

    /// Create a manager with a custom number of visible toasts.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Show a toast, evicting the oldest when full.
    pub fn push(&mut self, toast: Toast) {
        self.toasts.push_back(toast);
        while self.toasts.len() > self.capacity {
            self.toasts.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message, ToastKind::Info));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message, ToastKind::Success));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message, ToastKind::Error));
    }

    /// Drop expired toasts. Called once per tick.
    pub fn tick(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// The most recent toast.
    #[cfg(test)]
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    /// Render the stack in the top-right corner of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
        if width < 6 {
            return;
        }
        // Borders and the icon prefix.
        let text_width = width.saturating_sub(4) as usize;

        let x = area.x + area.width.saturating_sub(width + 1);
        let mut y = area.y + 1;
        let bottom = area.y + area.height;

        for toast in self.toasts.iter().rev() {
            let lines = toast.message.chars().count().div_ceil(text_width).max(1) as u16;
            let height = lines + 2;
            if y + height > bottom {
                break;
            }
            render_toast(frame, Rect::new(x, y, width, height), toast);
            y += height;
        }
    }
}

fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
    frame.render_widget(Clear, area);

    let style = Style::default().fg(toast.kind.color());
    let text = Line::from(vec![
        Span::styled(
            format!("{} ", toast.kind.icon()),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(toast.message.as_str(), style),
    ]);
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(style));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_default_ttl() {
        assert_eq!(Toast::new("ok", ToastKind::Success).ttl, SUCCESS_TTL);
        assert_eq!(Toast::new("fyi", ToastKind::Info).ttl, SUCCESS_TTL);
        assert_eq!(Toast::new("bad", ToastKind::Error).ttl, ERROR_TTL);
    }

    #[test]
    fn test_toast_expiry() {
        let toast = Toast::new("x", ToastKind::Success).with_ttl(Duration::ZERO);
        assert!(toast.is_expired());
        assert!(!Toast::new("x", ToastKind::Success).is_expired());
    }

    #[test]
    fn test_manager_push_and_latest() {
        let mut manager = NotificationManager::new();
        assert!(manager.is_empty());

        manager.success("Saved");
        manager.error("Save failed");
        assert_eq!(manager.len(), 2);

        let latest = manager.latest().unwrap();
        assert_eq!(latest.kind, ToastKind::Error);
        assert_eq!(latest.message, "Save failed");
    }

    #[test]
    fn test_manager_evicts_oldest() {
        let mut manager = NotificationManager::with_capacity(2);
        manager.success("1");
        manager.success("2");
        manager.success("3");

        let messages: Vec<&str> = manager.toasts.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["2", "3"]);
    }

    #[test]
    fn test_manager_tick_drops_expired() {
        let mut manager = NotificationManager::new();
        manager.push(Toast::new("gone", ToastKind::Success).with_ttl(Duration::ZERO));
        manager.success("stays");
        manager.tick();

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.latest().unwrap().message, "stays");
    }
}
