//! Query criteria understood by task store adapters.

use super::{GroupId, Principal, PrincipalId, Task, TaskId, TaskStatus};

/// Conjunctive filter over tasks. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCriteria {
    task_id: Option<TaskId>,
    assignee: Option<PrincipalId>,
    owner: Option<PrincipalId>,
    status: Option<TaskStatus>,
    parent_task_id: Option<TaskId>,
    involving: Option<Involvement>,
}

/// Restricts results to tasks a principal takes part in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Involvement {
    principal: PrincipalId,
    groups: Vec<GroupId>,
}

impl Involvement {
    /// Returns the principal whose tasks are selected.
    #[must_use]
    pub const fn principal(&self) -> &PrincipalId {
        &self.principal
    }

    /// Returns the groups the principal belongs to.
    #[must_use]
    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    fn matches(&self, task: &Task) -> bool {
        task.is_assigned_to(&self.principal)
            || task.is_owned_by(&self.principal)
            || task.candidate_users().contains(&self.principal)
            || task
                .candidate_groups()
                .iter()
                .any(|group| self.groups.contains(group))
    }
}

impl TaskCriteria {
    /// Creates criteria matching every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates criteria matching a single task.
    #[must_use]
    pub fn by_id(id: TaskId) -> Self {
        Self {
            task_id: Some(id),
            ..Self::default()
        }
    }

    /// Restricts to tasks with the given assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: PrincipalId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Restricts to tasks with the given owner.
    #[must_use]
    pub fn with_owner(mut self, owner: PrincipalId) -> Self {
        self.owner = Some(owner);
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
    pub fn with_parent(mut self, parent: TaskId) -> Self {
        self.parent_task_id = Some(parent);
        self
    }

    /// Restricts to tasks where `principal` is assignee, owner, candidate
    /// user, or a member of a candidate group.
    #[must_use]
    pub fn visible_to(mut self, principal: &Principal) -> Self {
        self.involving = Some(Involvement {
            principal: principal.id().clone(),
            groups: principal.groups().to_vec(),
        });
        self
    }

    /// Returns the task identifier filter.
    #[must_use]
    pub const fn task_id(&self) -> Option<&TaskId> {
        self.task_id.as_ref()
    }

    /// Returns the assignee filter.
    #[must_use]
    pub const fn assignee(&self) -> Option<&PrincipalId> {
        self.assignee.as_ref()
    }

    /// Returns the owner filter.
    #[must_use]
    pub const fn owner(&self) -> Option<&PrincipalId> {
        self.owner.as_ref()
    }

    /// Returns the status filter.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the parent task filter.
    #[must_use]
    pub const fn parent_task_id(&self) -> Option<&TaskId> {
        self.parent_task_id.as_ref()
    }

    /// Returns the visibility restriction.
    #[must_use]
    pub const fn involving(&self) -> Option<&Involvement> {
        self.involving.as_ref()
    }

    /// Evaluates the criteria against a task snapshot.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.task_id.as_ref().is_none_or(|id| task.id() == id)
            && self
                .assignee
                .as_ref()
                .is_none_or(|assignee| task.is_assigned_to(assignee))
            && self
                .owner
                .as_ref()
                .is_none_or(|owner| task.is_owned_by(owner))
            && self.status.is_none_or(|status| task.status() == status)
            && self
                .parent_task_id
                .as_ref()
                .is_none_or(|parent| task.parent_task_id() == Some(parent))
            && self
                .involving
                .as_ref()
                .is_none_or(|involvement| involvement.matches(task))
    }
}
