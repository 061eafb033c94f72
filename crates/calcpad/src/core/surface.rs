//! Capabilities the engine needs from its front end
//!
//! A front end adapts its display widget to [`TextBuffer`] and its alert
//! mechanism to [`ErrorNotifier`]. The engine depends on nothing else.

use crate::core::CalcError;

/// A text field the engine can read and overwrite
pub trait TextBuffer {
    /// Returns the text currently shown
    fn text(&self) -> &str;

    /// Replaces the shown text
    fn set_text(&mut self, text: &str);
}

impl TextBuffer for String {
    fn text(&self) -> &str {
        self
    }

    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// Receives arithmetic failures.
///
/// Called synchronously from inside event handling; implementations must not
/// feed events back into the engine.
pub trait ErrorNotifier {
    /// Presents an error to the user
    fn notify(&mut self, error: &CalcError);
}

impl<F> ErrorNotifier for F
where
    F: FnMut(&CalcError),
{
    fn notify(&mut self, error: &CalcError) {
        self(error);
    }
}

/// Notifier that queues messages until the front end takes them
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingNotifier {
    messages: Vec<String>,
}

impl RecordingNotifier {
    /// Creates an empty notifier
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received and not yet taken, oldest first
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Returns true if nothing is queued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Removes and returns the oldest queued message
    pub fn take(&mut self) -> Option<String> {
        if self.messages.is_empty() {
            None
        } else {
            Some(self.messages.remove(0))
        }
    }

    /// Drops every queued message
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl ErrorNotifier for RecordingNotifier {
    fn notify(&mut self, error: &CalcError) {
        self.messages.push(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== TextBuffer tests =====

    #[test]
    fn test_string_text_buffer() {
        let mut buffer = String::from("0");
        buffer.set_text("42.5");
        assert_eq!(TextBuffer::text(&buffer), "42.5");
    }

    // ===== ErrorNotifier tests =====

    #[test]
    fn test_closure_notifier() {
        let mut seen = Vec::new();
        {
            let mut notifier = |e: &CalcError| seen.push(e.clone());
            notifier.notify(&CalcError::DivisionByZero);
        }
        assert_eq!(seen, vec![CalcError::DivisionByZero]);
    }

    #[test]
    fn test_recording_notifier_queue() {
        let mut notifier = RecordingNotifier::new();
        assert!(notifier.is_empty());

        notifier.notify(&CalcError::DivisionByZero);
        notifier.notify(&CalcError::arithmetic("overflow"));
        assert_eq!(notifier.messages().len(), 2);

        assert_eq!(
            notifier.take().as_deref(),
            Some("Division by zero is not allowed.")
        );
        assert_eq!(notifier.take().as_deref(), Some("Arithmetic error: overflow"));
        assert!(notifier.take().is_none());
    }

    #[test]
    fn test_recording_notifier_clear() {
        let mut notifier = RecordingNotifier::new();
        notifier.notify(&CalcError::DivisionByZero);
        notifier.clear();
        assert!(notifier.is_empty());
    }
}
