//! Display collaborator seam
//!
//! The calculator never touches a screen directly. It reports every
//! visible change through [`DisplaySink`]; the browser binding implements
//! it over the DOM and [`RecordingDisplay`] implements it in memory.

use crate::schedule::TimerQueue;
use std::time::Duration;

/// Receiver of everything the calculator wants shown
pub trait DisplaySink {
    /// Shows the current expression (or result) text
    fn update_display(&mut self, text: &str);

    /// Shows a transient error and arranges for it to be cleared after
    /// `clear_after`. Earlier pending clears are not cancelled.
    fn show_error(&mut self, message: &str, clear_after: Duration);

    /// Replaces the history list with `lines`, newest first
    fn render_history(&mut self, lines: &[String]);
}

/// A call received by a [`RecordingDisplay`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    /// `update_display(text)`
    Display(String),
    /// `show_error(message, _)`
    Error(String),
    /// Deferred clear of the error area fired
    ErrorCleared,
    /// `render_history(lines)`
    History(Vec<String>),
}

/// In-memory display with a fake clock for the error auto-clear
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    display: String,
    error: Option<String>,
    history: Vec<String>,
    calls: Vec<DisplayCall>,
    clears: TimerQueue<()>,
}

impl RecordingDisplay {
    /// Creates a blank display
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Returns the visible error message, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the rendered history lines
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Returns every call received, in order
    #[must_use]
    pub fn calls(&self) -> &[DisplayCall] {
        &self.calls
    }

    /// Returns the number of error clears not yet fired
    #[must_use]
    pub fn pending_clears(&self) -> usize {
        self.clears.pending_len()
    }

    /// Advances the fake clock, firing any due error clears
    pub fn advance(&mut self, by: Duration) {
        for () in self.clears.advance(by) {
            self.error = None;
            self.calls.push(DisplayCall::ErrorCleared);
        }
    }
}

impl DisplaySink for RecordingDisplay {
    fn update_display(&mut self, text: &str) {
        self.display = text.to_string();
        self.calls.push(DisplayCall::Display(text.to_string()));
    }

    fn show_error(&mut self, message: &str, clear_after: Duration) {
        self.error = Some(message.to_string());
        self.calls.push(DisplayCall::Error(message.to_string()));
        self.clears.schedule(clear_after, ());
    }

    fn render_history(&mut self, lines: &[String]) {
        self.history = lines.to_vec();
        self.calls.push(DisplayCall::History(lines.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_display_tracks_state() {
        let mut display = RecordingDisplay::new();
        display.update_display("12");
        display.render_history(&["1+1 = 2".to_string()]);
        assert_eq!(display.display(), "12");
        assert_eq!(display.history(), ["1+1 = 2".to_string()]);
        assert!(display.error().is_none());
        assert_eq!(display.calls().len(), 2);
    }

    #[test]
    fn test_error_clears_after_delay() {
        let mut display = RecordingDisplay::new();
        display.show_error("Invalid input", Duration::from_secs(2));
        display.advance(Duration::from_millis(1999));
        assert_eq!(display.error(), Some("Invalid input"));
        display.advance(Duration::from_millis(1));
        assert_eq!(display.error(), None);
        assert_eq!(display.calls().last(), Some(&DisplayCall::ErrorCleared));
    }

    #[test]
    fn test_earlier_clear_wipes_newer_error() {
        let mut display = RecordingDisplay::new();
        display.show_error("first", Duration::from_secs(2));
        display.advance(Duration::from_millis(1500));
        display.show_error("second", Duration::from_secs(2));
        assert_eq!(display.pending_clears(), 2);

        display.advance(Duration::from_millis(500));
        assert_eq!(display.error(), None);
        assert_eq!(display.pending_clears(), 1);
    }
}
