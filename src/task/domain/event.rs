//! Events published after a task command commits.

use super::{PrincipalId, Task};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Tag identifying what happened to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskEventKind {
    /// A task was created.
    Created,
    /// Descriptive fields of a task changed.
    Updated,
    /// A task was handed to an assignee.
    Assigned,
    /// A candidate claimed a task.
    Claimed,
    /// The assignee gave a task back.
    Released,
    /// A task was completed.
    Completed,
    /// A task was cancelled.
    Cancelled,
    /// Candidate users were added.
    CandidateUsersAdded,
    /// Candidate users were removed.
    CandidateUsersRemoved,
    /// Candidate groups were added.
    CandidateGroupsAdded,
    /// Candidate groups were removed.
    CandidateGroupsRemoved,
}

impl TaskEventKind {
    /// Every event kind, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Created,
        Self::Updated,
        Self::Assigned,
        Self::Claimed,
        Self::Released,
        Self::Completed,
        Self::Cancelled,
        Self::CandidateUsersAdded,
        Self::CandidateUsersRemoved,
        Self::CandidateGroupsAdded,
        Self::CandidateGroupsRemoved,
    ];

    /// Returns the canonical event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Assigned => "assigned",
            Self::Claimed => "claimed",
            Self::Released => "released",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::CandidateUsersAdded => "candidate_users_added",
            Self::CandidateUsersRemoved => "candidate_users_removed",
            Self::CandidateGroupsAdded => "candidate_groups_added",
            Self::CandidateGroupsRemoved => "candidate_groups_removed",
        }
    }
}

impl fmt::Display for TaskEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of a committed task command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEvent {
    event_id: Uuid,
    kind: TaskEventKind,
    entity: Task,
    principal: PrincipalId,
    timestamp: DateTime<Utc>,
}

impl TaskEvent {
    /// Creates an event carrying the post-command snapshot.
    #[must_use]
    pub fn new(
        kind: TaskEventKind,
        entity: Task,
        principal: PrincipalId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            kind,
            entity,
            principal,
            timestamp: clock.utc(),
        }
    }

    /// Returns the unique event identifier.
    #[must_use]
    pub const fn event_id(&self) -> Uuid {
        self.event_id
    }

    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> TaskEventKind {
        self.kind
    }

    /// Returns the task snapshot after the command.
    #[must_use]
    pub const fn entity(&self) -> &Task {
        &self.entity
    }

    /// Returns the principal who issued the command.
    #[must_use]
    pub const fn principal(&self) -> &PrincipalId {
        &self.principal
    }

    /// Returns when the event was raised.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
