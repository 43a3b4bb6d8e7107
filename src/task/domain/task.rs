//! Task snapshot and related lifecycle types.

use super::{FieldChange, GroupId, ParseTaskStatusError, Principal, PrincipalId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task exists and nobody is working on it.
    Created,
    /// Task was handed to an assignee by its owner or an administrator.
    Assigned,
    /// Task was picked up by one of its candidates.
    Claimed,
    /// Task work has finished.
    Completed,
    /// Task was withdrawn before completion.
    Cancelled,
    /// Task is on hold in the workflow engine.
    Suspended,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Assigned => "ASSIGNED",
            Self::Claimed => "CLAIMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Suspended => "SUSPENDED",
        }
    }

    /// Returns `true` when no further command may change the task.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "CREATED" => Ok(Self::Created),
            "ASSIGNED" => Ok(Self::Assigned),
            "CLAIMED" => Ok(Self::Claimed),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            "SUSPENDED" => Ok(Self::Suspended),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Validated field values for a task about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional initial assignee.
    pub assignee: Option<PrincipalId>,
    /// Optional priority; [`Task::DEFAULT_PRIORITY`] when unset.
    pub priority: Option<i32>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional parent task.
    pub parent_task_id: Option<TaskId>,
    /// Principals allowed to claim the task.
    pub candidate_users: Vec<PrincipalId>,
    /// Groups whose members may claim the task.
    pub candidate_groups: Vec<GroupId>,
}

/// Point-in-time copy of a task's fields.
///
/// The external store owns the authoritative record; a `Task` never updates
/// itself behind the caller's back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: String,
    description: Option<String>,
    assignee: Option<PrincipalId>,
    owner: Option<PrincipalId>,
    status: TaskStatus,
    priority: i32,
    created_date: DateTime<Utc>,
    claimed_date: Option<DateTime<Utc>>,
    due_date: Option<DateTime<Utc>>,
    parent_task_id: Option<TaskId>,
    candidate_users: Vec<PrincipalId>,
    candidate_groups: Vec<GroupId>,
}

impl Task {
    /// Priority given to tasks created without one.
    pub const DEFAULT_PRIORITY: i32 = 50;

    /// Creates an unassigned, ownerless task in [`TaskStatus::Created`].
    #[must_use]
    pub fn new(id: TaskId, name: impl Into<String>, created_date: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            assignee: None,
            owner: None,
            status: TaskStatus::Created,
            priority: Self::DEFAULT_PRIORITY,
            created_date,
            claimed_date: None,
            due_date: None,
            parent_task_id: None,
            candidate_users: Vec::new(),
            candidate_groups: Vec::new(),
        }
    }

    /// Builds a task from creation input, owned by `owner`.
    ///
    /// A task created with an assignee starts in [`TaskStatus::Assigned`].
    #[must_use]
    pub fn create(id: TaskId, input: NewTask, owner: PrincipalId, clock: &impl Clock) -> Self {
        let status = if input.assignee.is_some() {
            TaskStatus::Assigned
        } else {
            TaskStatus::Created
        };

        Self {
            id,
            name: input.name,
            description: input.description,
            assignee: input.assignee,
            owner: Some(owner),
            status,
            priority: input.priority.unwrap_or(Self::DEFAULT_PRIORITY),
            created_date: clock.utc(),
            claimed_date: None,
            due_date: input.due_date,
            parent_task_id: input.parent_task_id,
            candidate_users: dedup(input.candidate_users),
            candidate_groups: dedup(input.candidate_groups),
        }
    }

    /// Sets the owner.
    #[must_use]
    pub fn with_owner(mut self, owner: PrincipalId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Returns a copy with `change` applied.
    #[must_use]
    pub fn with_change(mut self, change: &FieldChange) -> Self {
        self.apply(change);
        self
    }

    /// Applies a single field change in place.
    ///
    /// Store adapters and the runtime both use this so an in-memory snapshot
    /// matches what a fresh fetch would return.
    pub fn apply(&mut self, change: &FieldChange) {
        match change {
            FieldChange::Name(name) => self.name.clone_from(name),
            FieldChange::Description(description) => {
                self.description = Some(description.clone());
            }
            FieldChange::Priority(priority) => self.priority = *priority,
            FieldChange::DueDate(due_date) => self.due_date = Some(*due_date),
            FieldChange::ParentTaskId(parent) => self.parent_task_id = Some(parent.clone()),
            FieldChange::Assignee(assignee) => self.assignee.clone_from(assignee),
            FieldChange::Status(status) => self.status = *status,
            FieldChange::ClaimedDate(claimed_date) => self.claimed_date = *claimed_date,
            FieldChange::CandidateUsers(users) => self.candidate_users = dedup(users.clone()),
            FieldChange::CandidateGroups(groups) => {
                self.candidate_groups = dedup(groups.clone());
            }
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the current assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&PrincipalId> {
        self.assignee.as_ref()
    }

    /// Returns the owner, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<&PrincipalId> {
        self.owner.as_ref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    /// Returns the time the current assignee claimed the task.
    #[must_use]
    pub const fn claimed_date(&self) -> Option<DateTime<Utc>> {
        self.claimed_date
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the parent task, if any.
    #[must_use]
    pub const fn parent_task_id(&self) -> Option<&TaskId> {
        self.parent_task_id.as_ref()
    }

    /// Returns the principals allowed to claim the task.
    #[must_use]
    pub fn candidate_users(&self) -> &[PrincipalId] {
        &self.candidate_users
    }

    /// Returns the groups whose members may claim the task.
    #[must_use]
    pub fn candidate_groups(&self) -> &[GroupId] {
        &self.candidate_groups
    }

    /// Returns `true` when `principal` is the assignee.
    #[must_use]
    pub fn is_assigned_to(&self, principal: &PrincipalId) -> bool {
        self.assignee.as_ref() == Some(principal)
    }

    /// Returns `true` when `principal` is the owner.
    #[must_use]
    pub fn is_owned_by(&self, principal: &PrincipalId) -> bool {
        self.owner.as_ref() == Some(principal)
    }

    /// Returns `true` when any candidate user or group is configured.
    #[must_use]
    pub fn has_candidates(&self) -> bool {
        !self.candidate_users.is_empty() || !self.candidate_groups.is_empty()
    }

    /// Returns `true` when `principal` is a candidate user or belongs to a
    /// candidate group.
    #[must_use]
    pub fn is_candidate(&self, principal: &Principal) -> bool {
        self.candidate_users.contains(principal.id())
            || self
                .candidate_groups
                .iter()
                .any(|group| principal.is_member_of(group))
    }
}

/// Removes repeated entries while keeping first-seen order.
fn dedup<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
