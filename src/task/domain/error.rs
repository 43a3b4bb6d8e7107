//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be blank")]
    BlankTaskId,

    /// The principal identifier is empty after trimming.
    #[error("principal identifier must not be blank")]
    BlankPrincipalId,

    /// The group identifier is empty after trimming.
    #[error("group identifier must not be blank")]
    BlankGroupId,
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Errors raised while turning a command payload into store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// The payload does not name a task.
    #[error("task id is required")]
    MissingTaskId,

    /// The update payload carries no field to change.
    #[error("update payload does not change any field")]
    EmptyUpdate,

    /// The task name is empty after trimming.
    #[error("task name must not be blank")]
    BlankName,

    /// The task name exceeds the configured limit.
    #[error("task name has {length} characters, exceeds limit of {max}")]
    NameTooLong {
        /// The actual name length in characters.
        length: usize,
        /// The configured maximum.
        max: usize,
    },

    /// The assignee is empty after trimming.
    #[error("assignee must not be blank")]
    BlankAssignee,

    /// The parent task reference is empty after trimming.
    #[error("parent task id must not be blank")]
    BlankParentTaskId,

    /// The payload names the task as its own parent.
    #[error("task {0} cannot be its own parent")]
    SelfParent(String),

    /// A candidate payload lists no candidates.
    #[error("candidate list must not be empty")]
    EmptyCandidates,

    /// A candidate identifier is empty after trimming.
    #[error("candidate identifiers must not be blank")]
    BlankCandidate,
}
