//! Notification sink for user-facing feedback.
//!
//! The core only decides which events produce which kind of message;
//! presentation (toasts, tray balloons, a TUI status line) is the host's
//! concern, reached through the `Notifier` trait.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyLevel {
    Success,
    Error,
    Info,
}

impl std::fmt::Display for NotifyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Fire-and-forget notification sink.
///
/// `duration_ms` is a presentation hint (how long a toast stays up);
/// sinks that have no notion of duration may ignore it.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotifyLevel, message: &str, duration_ms: u64);
}

/// Default sink that forwards notifications to the tracing pipeline.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotifyLevel, message: &str, duration_ms: u64) {
        match level {
            NotifyLevel::Error => error!(duration_ms, "{}", message),
            _ => info!(kind = %level, duration_ms, "{}", message),
        }
    }
}

/// A notification captured by [`MemoryNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyEvent {
    pub level: NotifyLevel,
    pub message: String,
    pub duration_ms: u64,
}

/// In-memory sink that records every notification. Used by tests and
/// by headless hosts that render notifications themselves.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    events: Mutex<Vec<NotifyEvent>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NotifyEvent> {
        self.events.lock().expect("notifier lock poisoned").clone()
    }

    pub fn last(&self) -> Option<NotifyEvent> {
        self.events
            .lock()
            .expect("notifier lock poisoned")
            .last()
            .cloned()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, level: NotifyLevel, message: &str, duration_ms: u64) {
        self.events
            .lock()
            .expect("notifier lock poisoned")
            .push(NotifyEvent {
                level,
                message: message.to_string(),
                duration_ms,
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(NotifyLevel::Success, "Password saved!", 2000);
        notifier.notify(NotifyLevel::Error, "All fields are required", 2000);

        let events = notifier.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].level, NotifyLevel::Success);
        assert_eq!(events[1].message, "All fields are required");
        assert_eq!(notifier.last().unwrap().level, NotifyLevel::Error);
    }

    #[test]
    fn level_serializes_snake_case() {
        let json = serde_json::to_string(&NotifyLevel::Success).unwrap();
        assert_eq!(json, "\"success\"");
    }
}
