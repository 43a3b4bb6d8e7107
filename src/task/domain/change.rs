//! Single-field mutations issued against the task store.

use super::{GroupId, PrincipalId, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names the task field a [`FieldChange`] targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    /// Display name.
    Name,
    /// Free-form description.
    Description,
    /// Numeric priority.
    Priority,
    /// Due date.
    DueDate,
    /// Parent task reference.
    ParentTaskId,
    /// Current assignee.
    Assignee,
    /// Lifecycle status.
    Status,
    /// Time the current assignee claimed the task.
    ClaimedDate,
    /// Principals eligible to claim the task.
    CandidateUsers,
    /// Groups eligible to claim the task.
    CandidateGroups,
}

impl TaskField {
    /// Returns the canonical field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Priority => "priority",
            Self::DueDate => "due_date",
            Self::ParentTaskId => "parent_task_id",
            Self::Assignee => "assignee",
            Self::Status => "status",
            Self::ClaimedDate => "claimed_date",
            Self::CandidateUsers => "candidate_users",
            Self::CandidateGroups => "candidate_groups",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A new value for exactly one task field.
///
/// The runtime expresses every mutation as a sequence of these, and the store
/// applies each one independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldChange {
    /// Replaces the task name.
    Name(String),
    /// Replaces the task description.
    Description(String),
    /// Replaces the task priority.
    Priority(i32),
    /// Replaces the due date.
    DueDate(DateTime<Utc>),
    /// Replaces the parent task reference.
    ParentTaskId(TaskId),
    /// Sets or clears the assignee.
    Assignee(Option<PrincipalId>),
    /// Moves the task to a new status.
    Status(TaskStatus),
    /// Sets or clears the claim timestamp.
    ClaimedDate(Option<DateTime<Utc>>),
    /// Replaces the candidate user list.
    CandidateUsers(Vec<PrincipalId>),
    /// Replaces the candidate group list.
    CandidateGroups(Vec<GroupId>),
}

impl FieldChange {
    /// Returns the field this change targets.
    #[must_use]
    pub const fn field(&self) -> TaskField {
        match self {
            Self::Name(_) => TaskField::Name,
            Self::Description(_) => TaskField::Description,
            Self::Priority(_) => TaskField::Priority,
            Self::DueDate(_) => TaskField::DueDate,
            Self::ParentTaskId(_) => TaskField::ParentTaskId,
            Self::Assignee(_) => TaskField::Assignee,
            Self::Status(_) => TaskField::Status,
            Self::ClaimedDate(_) => TaskField::ClaimedDate,
            Self::CandidateUsers(_) => TaskField::CandidateUsers,
            Self::CandidateGroups(_) => TaskField::CandidateGroups,
        }
    }
}
