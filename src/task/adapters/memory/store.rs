//! In-memory task store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{FieldChange, Task, TaskCriteria, TaskId},
    ports::{TaskQueryPort, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Field changes are applied one at a time with last-write-wins semantics;
/// every accepted change is also appended to a log that tests can inspect.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    change_log: Vec<(TaskId, FieldChange)>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every field change accepted so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the lock is poisoned.
    pub fn applied_changes(&self) -> TaskStoreResult<Vec<(TaskId, FieldChange)>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.change_log.clone())
    }
}

fn poisoned(err: impl ToString) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskQueryPort for InMemoryTaskStore {
    async fn find_by_id(&self, id: &TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(id).cloned())
    }

    async fn find_by_criteria(&self, criteria: &TaskCriteria) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| criteria.matches(task))
            .cloned()
            .collect())
    }

    async fn apply_field_change(&self, id: &TaskId, change: &FieldChange) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let task = state
            .tasks
            .get_mut(id)
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))?;
        task.apply(change);
        state.change_log.push((id.clone(), change.clone()));
        Ok(())
    }

    async fn insert(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.tasks.contains_key(task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id().clone()));
        }
        state.tasks.insert(task.id().clone(), task.clone());
        Ok(())
    }
}
