//! Store port for task lookup and single-field mutation.
//!
//! The store is an external collaborator that owns the authoritative task
//! records. It offers no transactions: a command touching several fields
//! issues one [`TaskQueryPort::apply_field_change`] call per field, in order,
//! and a failure part-way leaves the earlier changes applied.

use crate::task::domain::{FieldChange, Task, TaskCriteria, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task store contract consumed by the runtime.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskQueryPort: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: &TaskId) -> TaskStoreResult<Option<Task>>;

    /// Returns every task matching `criteria`.
    async fn find_by_criteria(&self, criteria: &TaskCriteria) -> TaskStoreResult<Vec<Task>>;

    /// Changes exactly one field of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist and
    /// [`TaskStoreError::Conflict`] when the store detected a concurrent
    /// modification.
    async fn apply_field_change(&self, id: &TaskId, change: &FieldChange) -> TaskStoreResult<()>;

    /// Stores a newly created task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the identifier is taken.
    async fn insert(&self, task: &Task) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store rejected a write because the record changed underneath it.
    #[error("concurrent modification of task {0}")]
    Conflict(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` when repeating the command may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
