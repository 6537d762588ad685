//! User-facing notifications.
//!
//! Pages push messages here; the presenter (the CLI) drains and prints
//! them.  Every message is also logged.

use std::sync::{Mutex, PoisonError};

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Default)]
pub struct Notifications {
    queue: Mutex<Vec<Notification>>,
}

impl Notifications {
    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        match severity {
            Severity::Success | Severity::Info => info!(severity = severity.as_str(), "{message}"),
            Severity::Warning => warn!("{message}"),
            Severity::Error => error!("{message}"),
        }
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification { message, severity });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, Severity::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, Severity::Error);
    }

    /// Take every pending notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
