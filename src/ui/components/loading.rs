//! In-flight request indicator for the status line.

use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// Spinner animation frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Counts background requests and animates while any are running.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    in_flight: usize,
    frame: usize,
}

impl LoadingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A request was dispatched.
    pub fn start(&mut self) {
        self.in_flight += 1;
    }

    /// A request finished, successfully or not.
    pub fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn is_active(&self) -> bool {
        self.in_flight > 0
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Advance the animation. Called once per tick.
    pub fn tick(&mut self) {
        if self.is_active() {
            self.frame = (self.frame + 1) % FRAMES.len();
        } else {
            self.frame = 0;
        }
    }

    /// Status text, empty when idle.
    pub fn span(&self) -> Span<'static> {
        match self.in_flight {
            0 => Span::raw(""),
            1 => Span::styled(
                format!("{} syncing", FRAMES[self.frame]),
                Style::default().fg(Color::Yellow),
            ),
            n => Span::styled(
                format!("{} syncing ({n})", FRAMES[self.frame]),
                Style::default().fg(Color::Yellow),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_requests() {
        let mut loading = LoadingIndicator::new();
        assert!(!loading.is_active());

        loading.start();
        loading.start();
        assert_eq!(loading.in_flight(), 2);
        loading.finish();
        assert!(loading.is_active());
        loading.finish();
        assert!(!loading.is_active());
    }

    #[test]
    fn test_finish_never_underflows() {
        let mut loading = LoadingIndicator::new();
        loading.finish();
        assert_eq!(loading.in_flight(), 0);
    }

    #[test]
    fn test_span_text() {
        let mut loading = LoadingIndicator::new();
        assert_eq!(loading.span().content, "");

        loading.start();
        assert!(loading.span().content.ends_with("syncing"));
        loading.start();
        assert!(loading.span().content.ends_with("syncing (2)"));
    }

    #[test]
    fn test_tick_resets_when_idle() {
        let mut loading = LoadingIndicator::new();
        loading.start();
        loading.tick();
        assert_eq!(loading.frame, 1);
        loading.finish();
        loading.tick();
        assert_eq!(loading.frame, 0);
    }
}
