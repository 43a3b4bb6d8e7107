//! Domain model for the task runtime.
//!
//! Task snapshots, command payloads, events, and the authorization rules
//! live here, free of any store or dispatch concern.

mod authorization;
mod change;
mod criteria;
mod error;
mod event;
mod ids;
mod payload;
mod principal;
mod task;

pub use authorization::{AuthorizationGuard, Denial, TaskCommand};
pub use change::{FieldChange, TaskField};
pub use criteria::{Involvement, TaskCriteria};
pub use error::{ParseTaskStatusError, PayloadError, TaskDomainError};
pub use event::{TaskEvent, TaskEventKind};
pub use ids::{GroupId, PrincipalId, TaskId};
pub use payload::{
    AssignTaskPayload, CancelTaskPayload, CandidateGroupsPayload, CandidateUsersPayload,
    ClaimTaskPayload, CompleteTaskPayload, CreateTaskPayload, GetTasksPayload, Page, Pageable,
    ReleaseTaskPayload, UpdateTaskPayload,
};
pub(crate) use payload::require_task_id;
pub use principal::Principal;
pub use task::{NewTask, Task, TaskStatus};
