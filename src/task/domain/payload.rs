//! Command payloads accepted by the task runtime.
//!
//! Payloads are plain immutable values. Optional fields left unset mean "no
//! change"; the runtime only reads them and turns them into
//! [`FieldChange`]s.

use super::{
    FieldChange, GroupId, NewTask, PayloadError, PrincipalId, TaskCriteria, TaskId, TaskStatus,
};
use chrono::{DateTime, Utc};

/// Parses the task identifier carried by a payload.
pub(crate) fn require_task_id(raw: &str) -> Result<TaskId, PayloadError> {
    TaskId::new(raw).map_err(|_| PayloadError::MissingTaskId)
}

fn require_name(raw: &str) -> Result<String, PayloadError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(PayloadError::BlankName);
    }
    Ok(name.to_owned())
}

fn parse_parent(raw: &str, own_id: Option<&TaskId>) -> Result<TaskId, PayloadError> {
    let parent = TaskId::new(raw).map_err(|_| PayloadError::BlankParentTaskId)?;
    if own_id == Some(&parent) {
        return Err(PayloadError::SelfParent(parent.as_str().to_owned()));
    }
    Ok(parent)
}

fn parse_users(raw: &[String]) -> Result<Vec<PrincipalId>, PayloadError> {
    raw.iter()
        .map(|user| PrincipalId::new(user.as_str()).map_err(|_| PayloadError::BlankCandidate))
        .collect()
}

fn parse_groups(raw: &[String]) -> Result<Vec<GroupId>, PayloadError> {
    raw.iter()
        .map(|group| GroupId::new(group.as_str()).map_err(|_| PayloadError::BlankCandidate))
        .collect()
}

/// Partial update of a task's descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskPayload {
    task_id: String,
    name: Option<String>,
    description: Option<String>,
    priority: Option<i32>,
    due_date: Option<DateTime<Utc>>,
    parent_task_id: Option<String>,
}

impl UpdateTaskPayload {
    /// Creates an update for `task_id` that changes nothing yet.
    #[must_use]
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            name: None,
            description: None,
            priority: None,
            due_date: None,
            parent_task_id: None,
        }
    }

    /// Sets the new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the new priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the new due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the new parent task.
    #[must_use]
    pub fn with_parent_task_id(mut self, parent_task_id: impl Into<String>) -> Self {
        self.parent_task_id = Some(parent_task_id.into());
        self
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Returns the requested name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the requested description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Translates the set fields into store changes.
    ///
    /// Changes come out in a fixed order: name, description, priority, due
    /// date, parent task.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] when no field is set, the name is blank, or
    /// the parent reference is blank or points at the task itself.
    pub fn field_changes(&self) -> Result<Vec<FieldChange>, PayloadError> {
        let own_id = TaskId::new(self.task_id.as_str()).ok();
        let mut changes = Vec::new();
        if let Some(name) = &self.name {
            changes.push(FieldChange::Name(require_name(name)?));
        }
        if let Some(description) = &self.description {
            changes.push(FieldChange::Description(description.clone()));
        }
        if let Some(priority) = self.priority {
            changes.push(FieldChange::Priority(priority));
        }
        if let Some(due_date) = self.due_date {
            changes.push(FieldChange::DueDate(due_date));
        }
        if let Some(parent) = &self.parent_task_id {
            changes.push(FieldChange::ParentTaskId(parse_parent(
                parent,
                own_id.as_ref(),
            )?));
        }
        if changes.is_empty() {
            return Err(PayloadError::EmptyUpdate);
        }
        Ok(changes)
    }
}

/// Hands a task to a named assignee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignTaskPayload {
    task_id: String,
    assignee: String,
}

impl AssignTaskPayload {
    /// Creates an assignment of `task_id` to `assignee`.
    #[must_use]
    pub fn new(task_id: impl Into<String>, assignee: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            assignee: assignee.into(),
        }
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Returns the validated assignee.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::BlankAssignee`] when the assignee is blank.
    pub fn assignee(&self) -> Result<PrincipalId, PayloadError> {
        PrincipalId::new(self.assignee.as_str()).map_err(|_| PayloadError::BlankAssignee)
    }
}

/// Claims an unassigned task for the current principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimTaskPayload {
    task_id: String,
}

impl ClaimTaskPayload {
    /// Creates a claim for `task_id`.
    #[must_use]
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
        }
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }
}

/// Gives a task back so another candidate may claim it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTaskPayload {
    task_id: String,
}

impl ReleaseTaskPayload {
    /// Creates a release for `task_id`.
    #[must_use]
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
        }
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }
}

/// Marks a task as completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteTaskPayload {
    task_id: String,
}

impl CompleteTaskPayload {
    /// Creates a completion for `task_id`.
    #[must_use]
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
        }
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }
}

/// Withdraws a task, optionally recording why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelTaskPayload {
    task_id: String,
    reason: Option<String>,
}

impl CancelTaskPayload {
    /// Creates a cancellation for `task_id`.
    #[must_use]
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            reason: None,
        }
    }

    /// Sets the cancellation reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Returns the cancellation reason.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// Creates a standalone task owned by the current principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskPayload {
    name: String,
    description: Option<String>,
    assignee: Option<String>,
    priority: Option<i32>,
    due_date: Option<DateTime<Utc>>,
    parent_task_id: Option<String>,
    candidate_users: Vec<String>,
    candidate_groups: Vec<String>,
}

impl CreateTaskPayload {
    /// Creates a payload with the required name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            assignee: None,
            priority: None,
            due_date: None,
            parent_task_id: None,
            candidate_users: Vec::new(),
            candidate_groups: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the parent task.
    #[must_use]
    pub fn with_parent_task_id(mut self, parent_task_id: impl Into<String>) -> Self {
        self.parent_task_id = Some(parent_task_id.into());
        self
    }

    /// Sets the candidate users.
    #[must_use]
    pub fn with_candidate_users(mut self, users: impl IntoIterator<Item = String>) -> Self {
        self.candidate_users = users.into_iter().collect();
        self
    }

    /// Sets the candidate groups.
    #[must_use]
    pub fn with_candidate_groups(mut self, groups: impl IntoIterator<Item = String>) -> Self {
        self.candidate_groups = groups.into_iter().collect();
        self
    }

    /// Validates the payload into creation input.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] when the name, assignee, parent, or any
    /// candidate is blank.
    pub fn to_new_task(&self) -> Result<NewTask, PayloadError> {
        let assignee = self
            .assignee
            .as_deref()
            .map(|raw| PrincipalId::new(raw).map_err(|_| PayloadError::BlankAssignee))
            .transpose()?;
        let parent_task_id = self
            .parent_task_id
            .as_deref()
            .map(|raw| parse_parent(raw, None))
            .transpose()?;

        Ok(NewTask {
            name: require_name(&self.name)?,
            description: self.description.clone(),
            assignee,
            priority: self.priority,
            due_date: self.due_date,
            parent_task_id,
            candidate_users: parse_users(&self.candidate_users)?,
            candidate_groups: parse_groups(&self.candidate_groups)?,
        })
    }
}

/// Adds or removes candidate users of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUsersPayload {
    task_id: String,
    users: Vec<String>,
}

impl CandidateUsersPayload {
    /// Creates a payload naming `users` for `task_id`.
    #[must_use]
    pub fn new(task_id: impl Into<String>, users: impl IntoIterator<Item = String>) -> Self {
        Self {
            task_id: task_id.into(),
            users: users.into_iter().collect(),
        }
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Returns the validated users.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::EmptyCandidates`] for an empty list and
    /// [`PayloadError::BlankCandidate`] for a blank entry.
    pub fn users(&self) -> Result<Vec<PrincipalId>, PayloadError> {
        if self.users.is_empty() {
            return Err(PayloadError::EmptyCandidates);
        }
        parse_users(&self.users)
    }
}

/// Adds or removes candidate groups of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGroupsPayload {
    task_id: String,
    groups: Vec<String>,
}

impl CandidateGroupsPayload {
    /// Creates a payload naming `groups` for `task_id`.
    #[must_use]
    pub fn new(task_id: impl Into<String>, groups: impl IntoIterator<Item = String>) -> Self {
        Self {
            task_id: task_id.into(),
            groups: groups.into_iter().collect(),
        }
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Returns the validated groups.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::EmptyCandidates`] for an empty list and
    /// [`PayloadError::BlankCandidate`] for a blank entry.
    pub fn groups(&self) -> Result<Vec<GroupId>, PayloadError> {
        if self.groups.is_empty() {
            return Err(PayloadError::EmptyCandidates);
        }
        parse_groups(&self.groups)
    }
}

/// Filters for listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetTasksPayload {
    assignee: Option<String>,
    status: Option<TaskStatus>,
    parent_task_id: Option<String>,
}

impl GetTasksPayload {
    /// Creates a payload without filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to tasks with the given assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Restricts to tasks in the given status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to children of the given task.
    #[must_use]
    pub fn with_parent_task_id(mut self, parent_task_id: impl Into<String>) -> Self {
        self.parent_task_id = Some(parent_task_id.into());
        self
    }

    /// Translates the filters into store criteria.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] when the assignee or parent filter is blank.
    pub fn to_criteria(&self) -> Result<TaskCriteria, PayloadError> {
        let mut criteria = TaskCriteria::new();
        if let Some(assignee) = &self.assignee {
            let assignee =
                PrincipalId::new(assignee.as_str()).map_err(|_| PayloadError::BlankAssignee)?;
            criteria = criteria.with_assignee(assignee);
        }
        if let Some(status) = self.status {
            criteria = criteria.with_status(status);
        }
        if let Some(parent) = &self.parent_task_id {
            criteria = criteria.with_parent(parse_parent(parent, None)?);
        }
        Ok(criteria)
    }
}

/// Window into a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pageable {
    skip: usize,
    max_items: Option<usize>,
}

impl Pageable {
    /// Creates a window skipping `skip` items and returning at most
    /// `max_items`.
    #[must_use]
    pub const fn of(skip: usize, max_items: usize) -> Self {
        Self {
            skip,
            max_items: Some(max_items),
        }
    }

    /// Returns the number of leading items to skip.
    #[must_use]
    pub const fn skip(self) -> usize {
        self.skip
    }

    /// Returns the requested page size, if any.
    #[must_use]
    pub const fn max_items(self) -> Option<usize> {
        self.max_items
    }
}

/// One page of a listing plus the unpaged total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    total_items: usize,
}

impl<T> Page<T> {
    /// Creates a page.
    #[must_use]
    pub const fn new(items: Vec<T>, total_items: usize) -> Self {
        Self { items, total_items }
    }

    /// Returns the items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the number of matches before paging.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Consumes the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
