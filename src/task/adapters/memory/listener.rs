//! Listener that keeps every event it receives.

use std::sync::{Mutex, PoisonError};

use crate::task::{
    domain::TaskEvent,
    ports::{ListenerError, TaskEventListener},
};

/// Records delivered events in arrival order.
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Mutex<Vec<TaskEvent>>,
}

impl RecordingListener {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<TaskEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TaskEventListener for RecordingListener {
    fn on_event(&self, event: &TaskEvent) -> Result<(), ListenerError> {
        self.events
            .lock()
            .map_err(|err| ListenerError::new(err.to_string()))?
            .push(event.clone());
        Ok(())
    }
}
