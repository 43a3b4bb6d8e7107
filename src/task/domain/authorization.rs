//! Authorization rules for task commands.
//!
//! Every rule is a total predicate over the caller and the current task
//! snapshot, so the guard can be exercised without a store or event bus.

use super::{Principal, Task, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Mutating command kinds subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCommand {
    /// Change descriptive fields.
    Update,
    /// Take an unassigned task.
    Claim,
    /// Give an assigned task back.
    Release,
    /// Finish a task.
    Complete,
    /// Withdraw a task.
    Cancel,
    /// Hand a task to a named assignee.
    Assign,
    /// Add or remove candidate users or groups.
    ManageCandidates,
}

impl TaskCommand {
    /// Returns the canonical command name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Claim => "claim",
            Self::Release => "release",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::Assign => "assign",
            Self::ManageCandidates => "manage_candidates",
        }
    }

    /// Returns the denial reported when the caller lacks the required
    /// relation to the task.
    #[must_use]
    pub const fn denial(self) -> Denial {
        match self {
            Self::Update => Denial::NotAssigneeForUpdate,
            Self::Claim => Denial::NotClaimable,
            Self::Release => Denial::NotAssigneeForRelease,
            Self::Complete => Denial::NotAssigneeForComplete,
            Self::Cancel => Denial::NotAssigneeOrOwnerForCancel,
            Self::Assign => Denial::NotOwnerForAssign,
            Self::ManageCandidates => Denial::NotAssigneeOrOwnerForCandidates,
        }
    }
}

impl fmt::Display for TaskCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a command was refused. Each variant has one fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Denial {
    /// Update attempted by someone other than the assignee.
    #[error("You cannot update a task where you are not the assignee")]
    NotAssigneeForUpdate,

    /// Claim attempted on an assigned task or by a non-candidate.
    #[error("You cannot claim a task that is assigned or where you are not a candidate")]
    NotClaimable,

    /// Release attempted by someone other than the assignee.
    #[error("You cannot release a task where you are not the assignee")]
    NotAssigneeForRelease,

    /// Completion attempted by someone other than the assignee.
    #[error("You cannot complete a task where you are not the assignee")]
    NotAssigneeForComplete,

    /// Cancellation attempted by someone who is neither assignee nor owner.
    #[error("You cannot cancel a task where you are not the assignee or owner")]
    NotAssigneeOrOwnerForCancel,

    /// Assignment attempted by someone who is neither owner nor elevated.
    #[error("You cannot assign a task where you are not the owner")]
    NotOwnerForAssign,

    /// Candidate change attempted by someone who is neither assignee nor owner.
    #[error("You cannot change candidates of a task where you are not the assignee or owner")]
    NotAssigneeOrOwnerForCandidates,

    /// The task is completed or cancelled.
    #[error("You cannot modify a task that is already completed or cancelled")]
    TaskClosed,

    /// The task is suspended by the workflow engine.
    #[error("You cannot modify a suspended task")]
    TaskSuspended,
}

/// Stateless authorization rules for task commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGuard;

impl AuthorizationGuard {
    /// Checks whether `principal` may run `command` against `task`.
    ///
    /// The relation check runs before the status check, so a caller without
    /// the required relation always sees the same denial.
    ///
    /// # Errors
    ///
    /// Returns the command's [`Denial`] when the relation predicate fails,
    /// [`Denial::TaskClosed`] for completed or cancelled tasks, and
    /// [`Denial::TaskSuspended`] for suspended tasks.
    pub fn check(command: TaskCommand, principal: &Principal, task: &Task) -> Result<(), Denial> {
        if !Self::permits(command, principal, task) {
            return Err(command.denial());
        }
        let status = task.status();
        if status.is_closed() {
            return Err(Denial::TaskClosed);
        }
        if status == TaskStatus::Suspended {
            return Err(Denial::TaskSuspended);
        }
        Ok(())
    }

    /// Evaluates the relation predicate for `command` alone.
    #[must_use]
    pub fn permits(command: TaskCommand, principal: &Principal, task: &Task) -> bool {
        let is_assignee = task.is_assigned_to(principal.id());
        match command {
            TaskCommand::Update | TaskCommand::Release | TaskCommand::Complete => is_assignee,
            TaskCommand::Claim => {
                task.assignee().is_none()
                    && (!task.has_candidates() || task.is_candidate(principal))
            }
            TaskCommand::Cancel | TaskCommand::ManageCandidates => {
                is_assignee || task.is_owned_by(principal.id())
            }
            TaskCommand::Assign => {
                task.is_owned_by(principal.id()) || principal.has_elevated_capability()
            }
        }
    }
}
