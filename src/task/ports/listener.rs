//! Listener port for task events.

use crate::task::domain::TaskEvent;
use thiserror::Error;

/// Observer of committed task commands.
///
/// Called synchronously on the thread that ran the command; a slow listener
/// delays the command's return.
pub trait TaskEventListener: Send + Sync {
    /// Handles one event.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] to stop delivery to later listeners and fail
    /// the command.
    fn on_event(&self, event: &TaskEvent) -> Result<(), ListenerError>;
}

/// Failure raised by a task event listener.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("task event listener failed: {message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    /// Creates a listener failure with a description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
