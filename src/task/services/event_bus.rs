//! Synchronous, ordered multicast of task events.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::task::{
    domain::{TaskEvent, TaskEventKind},
    ports::{ListenerError, TaskEventListener},
};

/// Registry of task event listeners keyed by event kind.
///
/// Built once through [`EventBusBuilder`] and read-only afterwards, so
/// dispatch needs no locking.
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: HashMap<TaskEventKind, Vec<Arc<dyn TaskEventListener>>>,
}

impl EventBus {
    /// Starts building a bus.
    #[must_use]
    pub fn builder() -> EventBusBuilder {
        EventBusBuilder::default()
    }

    /// Creates a bus without listeners.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of listeners registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: TaskEventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Delivers `event` to every listener of its kind, in registration order.
    ///
    /// Returns the number of listeners that received the event.
    ///
    /// # Errors
    ///
    /// Returns the first [`ListenerError`]; listeners after the failing one
    /// are not called.
    pub fn publish(&self, event: &TaskEvent) -> Result<usize, ListenerError> {
        let Some(listeners) = self.listeners.get(&event.kind()) else {
            return Ok(0);
        };
        for (position, listener) in listeners.iter().enumerate() {
            if let Err(err) = listener.on_event(event) {
                warn!(
                    kind = %event.kind(),
                    task_id = %event.entity().id(),
                    position,
                    skipped = listeners.len() - position - 1,
                    error = %err,
                    "task event listener failed; remaining listeners skipped"
                );
                return Err(err);
            }
        }
        Ok(listeners.len())
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(&str, usize)> = self
            .listeners
            .iter()
            .map(|(kind, listeners)| (kind.as_str(), listeners.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}

/// Collects listener registrations for an [`EventBus`].
#[derive(Default)]
pub struct EventBusBuilder {
    listeners: HashMap<TaskEventKind, Vec<Arc<dyn TaskEventListener>>>,
}

impl EventBusBuilder {
    /// Registers `listener` for events of `kind`.
    #[must_use]
    pub fn on(mut self, kind: TaskEventKind, listener: Arc<dyn TaskEventListener>) -> Self {
        self.listeners.entry(kind).or_default().push(listener);
        self
    }

    /// Registers `listener` for every event kind.
    ///
    /// The listener takes its place in each kind's sequence at this point of
    /// the registration order.
    #[must_use]
    pub fn on_all(mut self, listener: Arc<dyn TaskEventListener>) -> Self {
        for kind in TaskEventKind::ALL {
            self.listeners
                .entry(kind)
                .or_default()
                .push(Arc::clone(&listener));
        }
        self
    }

    /// Finishes the registry.
    #[must_use]
    pub fn build(self) -> EventBus {
        EventBus {
            listeners: self.listeners,
        }
    }
}
