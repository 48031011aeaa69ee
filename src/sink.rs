// Sink module - where greetings and log lines are forwarded
//
// The greeter never prints on its own. It hands each message to an optional
// MessageSink; the binary attaches ConsoleSink, embedders pick their own.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Maximum number of messages a BufferSink keeps
const MAX_BUFFERED_MESSAGES: usize = 1000;

/// Receiver for greeting and log messages (fire-and-forget)
pub trait MessageSink: Send + Sync {
    fn write_message(&self, message: &str);
}

/// Writes each message as a line on stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn write_message(&self, message: &str) {
        let mut stdout = std::io::stdout().lock();
        // Closed stdout (e.g. `greetr | head -0`) is not worth failing a greeting over
        if let Err(e) = writeln!(stdout, "{}", message) {
            tracing::warn!("Failed to write message to stdout: {}", e);
        }
    }
}

/// Emits each message as a tracing event on target `greetr::message`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn write_message(&self, message: &str) {
        tracing::info!(target: "greetr::message", "{}", message);
    }
}

/// In-memory message buffer with bounded size (ring buffer)
///
/// Clones share the same buffer, so a caller can keep one handle and give
/// another to a greeter.
#[derive(Debug, Clone)]
pub struct BufferSink {
    messages: Arc<Mutex<VecDeque<String>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// All buffered messages (oldest first)
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Most recent message, if any
    pub fn last(&self) -> Option<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .back()
            .cloned()
    }

    pub fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for BufferSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSink for BufferSink {
    fn write_message(&self, message: &str) {
        let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        if messages.len() >= MAX_BUFFERED_MESSAGES {
            messages.pop_front();
        }
        messages.push_back(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_buffer_keeps_order() {
        let sink = BufferSink::new();
        sink.write_message("one");
        sink.write_message("two");
        assert_eq!(sink.messages(), vec!["one", "two"]);
        assert_eq!(sink.last().as_deref(), Some("two"));
    }

    #[test]
    fn test_buffer_clones_share_storage() {
        let sink = BufferSink::new();
        let handle = sink.clone();
        sink.write_message("shared");
        assert_eq!(handle.messages(), vec!["shared"]);
        handle.clear();
        assert!(sink.messages().is_empty());
        assert_eq!(sink.last(), None);
    }

    #[test]
    fn test_buffer_drops_oldest_when_full() {
        let sink = BufferSink::new();
        for i in 0..MAX_BUFFERED_MESSAGES + 5 {
            sink.write_message(&i.to_string());
        }
        let messages = sink.messages();
        assert_eq!(messages.len(), MAX_BUFFERED_MESSAGES);
        assert_eq!(messages[0], "5");
    }

    #[traced_test]
    #[test]
    fn test_tracing_sink_emits_event() {
        TracingSink.write_message("Hola Jane!");
        assert!(logs_contain("Hola Jane!"));
    }
}
