//! Task runtime: authorization-checked commands over the external task store.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{EventBus, TaskRuntimeConfig};
use crate::task::{
    domain::{
        AssignTaskPayload, AuthorizationGuard, CancelTaskPayload, CandidateGroupsPayload,
        CandidateUsersPayload, ClaimTaskPayload, CompleteTaskPayload, CreateTaskPayload, Denial,
        FieldChange, GetTasksPayload, GroupId, Page, Pageable, PayloadError, Principal,
        PrincipalId, ReleaseTaskPayload, Task, TaskCommand, TaskEvent, TaskEventKind, TaskId,
        TaskStatus, UpdateTaskPayload, require_task_id,
    },
    ports::{CurrentPrincipal, IdentityError, ListenerError, TaskQueryPort, TaskStoreError},
};

/// Errors returned by task runtime commands.
#[derive(Debug, Error)]
pub enum TaskRuntimeError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The current principal may not run the command on this task.
    #[error(transparent)]
    IllegalState(#[from] Denial),

    /// The payload is incomplete or contradictory.
    #[error(transparent)]
    Validation(#[from] PayloadError),

    /// The store detected a concurrent modification; the command may be
    /// retried.
    #[error("task {0} was modified concurrently")]
    Conflict(TaskId),

    /// The store failed.
    #[error(transparent)]
    Store(TaskStoreError),

    /// The current principal could not be resolved.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// A listener failed after the store change committed.
    #[error("{kind} event for task {task_id} was not fully delivered: {source}")]
    Listener {
        /// Task whose change was already committed.
        task_id: TaskId,
        /// Kind of the undelivered event.
        kind: TaskEventKind,
        /// The listener failure.
        #[source]
        source: ListenerError,
    },
}

impl TaskRuntimeError {
    /// Returns `true` when repeating the command may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<TaskStoreError> for TaskRuntimeError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(id) => Self::NotFound(id),
            TaskStoreError::Conflict(id) => Self::Conflict(id),
            other => Self::Store(other),
        }
    }
}

/// Result type for task runtime operations.
pub type TaskRuntimeResult<T> = Result<T, TaskRuntimeError>;

/// Mediates task commands between callers and the task store.
///
/// Every mutating command follows the same sequence:
/// 1. Loads the task through [`TaskRuntime::task`]
/// 2. Resolves the current principal
/// 3. Applies the command's authorization rule
/// 4. Issues one store change per affected field
/// 5. Publishes exactly one event carrying the resulting snapshot
///
/// Denied or invalid commands never reach step 4. The store offers no
/// transactions, so a listener failure in step 5 is reported to the caller
/// after the change has committed.
///
/// # Example
///
/// ```ignore
/// use task_runtime::task::services::{EventBus, TaskRuntime};
/// use task_runtime::task::domain::UpdateTaskPayload;
///
/// let runtime = TaskRuntime::new(store, identity, EventBus::empty(), clock);
/// let task = runtime
///     .update(&UpdateTaskPayload::new("task-1").with_description("new description"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct TaskRuntime<S, P, C>
where
    S: TaskQueryPort,
    P: CurrentPrincipal,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    identity: Arc<P>,
    events: EventBus,
    clock: Arc<C>,
    config: TaskRuntimeConfig,
}

impl<S, P, C> TaskRuntime<S, P, C>
where
    S: TaskQueryPort,
    P: CurrentPrincipal,
    C: Clock + Send + Sync,
{
    /// Creates a runtime with the default configuration.
    #[must_use]
    pub const fn new(store: Arc<S>, identity: Arc<P>, events: EventBus, clock: Arc<C>) -> Self {
        Self {
            store,
            identity,
            events,
            clock,
            config: TaskRuntimeConfig::new(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: TaskRuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &TaskRuntimeConfig {
        &self.config
    }

    /// Reads a task without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuntimeError::NotFound`] when the store has no such task,
    /// or the store failure.
    pub async fn task(&self, id: &TaskId) -> TaskRuntimeResult<Task> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskRuntimeError::NotFound(id.clone()))
    }

    /// Lists tasks matching `payload`, one page at a time.
    ///
    /// Principals without elevated capability only see tasks they are
    /// assignee, owner, or candidate of.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuntimeError`] when a filter is invalid, the principal
    /// cannot be resolved, or the store fails.
    pub async fn tasks(
        &self,
        payload: &GetTasksPayload,
        pageable: Pageable,
    ) -> TaskRuntimeResult<Page<Task>> {
        let mut criteria = payload.to_criteria()?;
        let principal = self.identity.current()?;
        if !principal.has_elevated_capability() {
            criteria = criteria.visible_to(&principal);
        }

        let matches = self.store.find_by_criteria(&criteria).await?;
        let total_items = matches.len();
        let page_size = self.config.page_size(pageable.max_items());
        let items: Vec<Task> = matches
            .into_iter()
            .skip(pageable.skip())
            .take(page_size)
            .collect();
        debug!(
            principal = %principal.id(),
            total_items,
            returned = items.len(),
            "listed tasks"
        );
        Ok(Page::new(items, total_items))
    }

    /// Creates a task owned by the current principal.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuntimeError::Validation`] for an invalid payload, and
    /// identity, store, or listener failures.
    pub async fn create(&self, payload: &CreateTaskPayload) -> TaskRuntimeResult<Task> {
        let input = payload.to_new_task()?;
        self.check_name_length(&input.name)?;
        let principal = self.identity.current()?;

        let task = Task::create(
            TaskId::generate(),
            input,
            principal.id().clone(),
            &*self.clock,
        );
        self.store.insert(&task).await?;
        info!(task_id = %task.id(), owner = %principal.id(), "task created");

        self.publish(TaskEventKind::Created, &task, &principal)?;
        Ok(task)
    }

    /// Changes the descriptive fields set in `payload`; other fields stay
    /// untouched.
    ///
    /// Only the assignee may update a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuntimeError::IllegalState`] with
    /// [`Denial::NotAssigneeForUpdate`] when the caller is not the assignee,
    /// including when the task has no assignee.
    pub async fn update(&self, payload: &UpdateTaskPayload) -> TaskRuntimeResult<Task> {
        let task_id = require_task_id(payload.task_id())?;
        let changes = payload.field_changes()?;
        for change in &changes {
            if let FieldChange::Name(name) = change {
                self.check_name_length(name)?;
            }
        }

        self.execute(TaskCommand::Update, TaskEventKind::Updated, &task_id, |_, _| {
            changes
        })
        .await
    }

    /// Hands the task to the assignee named in `payload`.
    ///
    /// Allowed for the owner and for principals with elevated capability.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuntimeError::IllegalState`] with
    /// [`Denial::NotOwnerForAssign`] otherwise.
    pub async fn assign(&self, payload: &AssignTaskPayload) -> TaskRuntimeResult<Task> {
        let task_id = require_task_id(payload.task_id())?;
        let assignee = payload.assignee()?;

        self.execute(
            TaskCommand::Assign,
            TaskEventKind::Assigned,
            &task_id,
            move |_, _| {
                vec![
                    FieldChange::Assignee(Some(assignee)),
                    FieldChange::Status(TaskStatus::Assigned),
                    FieldChange::ClaimedDate(None),
                ]
            },
        )
        .await
    }

    /// Assigns an unassigned task to the current principal.
    ///
    /// Claiming is not idempotent: a task that already has an assignee is
    /// refused every time, even for the assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuntimeError::IllegalState`] with [`Denial::NotClaimable`]
    /// when the task is assigned or the caller is not a candidate.
    pub async fn claim(&self, payload: &ClaimTaskPayload) -> TaskRuntimeResult<Task> {
        let task_id = require_task_id(payload.task_id())?;
        let claimed_at = self.clock.utc();

        self.execute(
            TaskCommand::Claim,
            TaskEventKind::Claimed,
            &task_id,
            move |_, principal| {
                vec![
                    FieldChange::Assignee(Some(principal.id().clone())),
                    FieldChange::Status(TaskStatus::Claimed),
                    FieldChange::ClaimedDate(Some(claimed_at)),
                ]
            },
        )
        .await
    }

    /// Gives the task back so candidates may claim it again.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuntimeError::IllegalState`] with
    /// [`Denial::NotAssigneeForRelease`] when the caller is not the assignee.
    pub async fn release(&self, payload: &ReleaseTaskPayload) -> TaskRuntimeResult<Task> {
        let task_id = require_task_id(payload.task_id())?;

        self.execute(
            TaskCommand::Release,
            TaskEventKind::Released,
            &task_id,
            |_, _| {
                vec![
                    FieldChange::Assignee(None),
                    FieldChange::Status(TaskStatus::Created),
                    FieldChange::ClaimedDate(None),
                ]
            },
        )
        .await
    }

    /// Completes the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuntimeError::IllegalState`] with
    /// [`Denial::NotAssigneeForComplete`] when the caller is not the assignee.
    pub async fn complete(&self, payload: &CompleteTaskPayload) -> TaskRuntimeResult<Task> {
        let task_id = require_task_id(payload.task_id())?;

        self.execute(
            TaskCommand::Complete,
            TaskEventKind::Completed,
            &task_id,
            |_, _| vec![FieldChange::Status(TaskStatus::Completed)],
        )
        .await
    }

    /// Cancels the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuntimeError::IllegalState`] with
    /// [`Denial::NotAssigneeOrOwnerForCancel`] when the caller is neither
    /// assignee nor owner.
    pub async fn cancel(&self, payload: &CancelTaskPayload) -> TaskRuntimeResult<Task> {
        let task_id = require_task_id(payload.task_id())?;
        if let Some(reason) = payload.reason() {
            debug!(task_id = %task_id, reason, "cancellation requested");
        }

        self.execute(
            TaskCommand::Cancel,
            TaskEventKind::Cancelled,
            &task_id,
            |_, _| vec![FieldChange::Status(TaskStatus::Cancelled)],
        )
        .await
    }

    /// Adds candidate users, keeping existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuntimeError::IllegalState`] with
    /// [`Denial::NotAssigneeOrOwnerForCandidates`] when the caller is neither
    /// assignee nor owner.
    pub async fn add_candidate_users(
        &self,
        payload: &CandidateUsersPayload,
    ) -> TaskRuntimeResult<Task> {
        let task_id = require_task_id(payload.task_id())?;
        let users = payload.users()?;

        self.execute(
            TaskCommand::ManageCandidates,
            TaskEventKind::CandidateUsersAdded,
            &task_id,
            move |task, _| {
                let mut merged = task.candidate_users().to_vec();
                merged.extend(users);
                vec![FieldChange::CandidateUsers(merged)]
            },
        )
        .await
    }

    /// Removes candidate users.
    ///
    /// # Errors
    ///
    /// Same as [`TaskRuntime::add_candidate_users`].
    pub async fn delete_candidate_users(
        &self,
        payload: &CandidateUsersPayload,
    ) -> TaskRuntimeResult<Task> {
        let task_id = require_task_id(payload.task_id())?;
        let users = payload.users()?;

        self.execute(
            TaskCommand::ManageCandidates,
            TaskEventKind::CandidateUsersRemoved,
            &task_id,
            move |task, _| {
                let remaining = retain_absent(task.candidate_users(), &users);
                vec![FieldChange::CandidateUsers(remaining)]
            },
        )
        .await
    }

    /// Adds candidate groups, keeping existing ones.
    ///
    /// # Errors
    ///
    /// Same as [`TaskRuntime::add_candidate_users`].
    pub async fn add_candidate_groups(
        &self,
        payload: &CandidateGroupsPayload,
    ) -> TaskRuntimeResult<Task> {
        let task_id = require_task_id(payload.task_id())?;
        let groups = payload.groups()?;

        self.execute(
            TaskCommand::ManageCandidates,
            TaskEventKind::CandidateGroupsAdded,
            &task_id,
            move |task, _| {
                let mut merged = task.candidate_groups().to_vec();
                merged.extend(groups);
                vec![FieldChange::CandidateGroups(merged)]
            },
        )
        .await
    }

    /// Removes candidate groups.
    ///
    /// # Errors
    ///
    /// Same as [`TaskRuntime::add_candidate_users`].
    pub async fn delete_candidate_groups(
        &self,
        payload: &CandidateGroupsPayload,
    ) -> TaskRuntimeResult<Task> {
        let task_id = require_task_id(payload.task_id())?;
        let groups = payload.groups()?;

        self.execute(
            TaskCommand::ManageCandidates,
            TaskEventKind::CandidateGroupsRemoved,
            &task_id,
            move |task, _| {
                let remaining: Vec<GroupId> = retain_absent(task.candidate_groups(), &groups);
                vec![FieldChange::CandidateGroups(remaining)]
            },
        )
        .await
    }

    /// Returns the candidate users of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuntimeError::NotFound`] when the task does not exist.
    pub async fn user_candidates(&self, id: &TaskId) -> TaskRuntimeResult<Vec<PrincipalId>> {
        Ok(self.task(id).await?.candidate_users().to_vec())
    }

    /// Returns the candidate groups of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuntimeError::NotFound`] when the task does not exist.
    pub async fn group_candidates(&self, id: &TaskId) -> TaskRuntimeResult<Vec<GroupId>> {
        Ok(self.task(id).await?.candidate_groups().to_vec())
    }

    async fn execute<F>(
        &self,
        command: TaskCommand,
        kind: TaskEventKind,
        task_id: &TaskId,
        plan: F,
    ) -> TaskRuntimeResult<Task>
    where
        F: FnOnce(&Task, &Principal) -> Vec<FieldChange> + Send,
    {
        debug!(task_id = %task_id, command = %command, "running task command");
        let task = self.task(task_id).await?;
        let principal = self.identity.current()?;

        if let Err(denial) = AuthorizationGuard::check(command, &principal, &task) {
            warn!(
                task_id = %task_id,
                command = %command,
                principal = %principal.id(),
                reason = %denial,
                "task command denied"
            );
            return Err(denial.into());
        }

        let changes = plan(&task, &principal);
        let snapshot = self.commit(task, &changes).await?;
        info!(
            task_id = %task_id,
            command = %command,
            principal = %principal.id(),
            fields = changes.len(),
            "task command committed"
        );

        self.publish(kind, &snapshot, &principal)?;
        Ok(snapshot)
    }

    /// Sends each change to the store in order and folds it into the snapshot.
    async fn commit(&self, mut snapshot: Task, changes: &[FieldChange]) -> TaskRuntimeResult<Task> {
        for (applied, change) in changes.iter().enumerate() {
            if let Err(err) = self.store.apply_field_change(snapshot.id(), change).await {
                warn!(
                    task_id = %snapshot.id(),
                    field = %change.field(),
                    applied,
                    retryable = err.is_retryable(),
                    error = %err,
                    "store rejected field change"
                );
                return Err(err.into());
            }
            snapshot.apply(change);
        }
        Ok(snapshot)
    }

    fn publish(
        &self,
        kind: TaskEventKind,
        snapshot: &Task,
        principal: &Principal,
    ) -> TaskRuntimeResult<()> {
        let event = TaskEvent::new(kind, snapshot.clone(), principal.id().clone(), &*self.clock);
        let delivered = self
            .events
            .publish(&event)
            .map_err(|source| TaskRuntimeError::Listener {
                task_id: snapshot.id().clone(),
                kind,
                source,
            })?;
        debug!(task_id = %snapshot.id(), kind = %kind, delivered, "task event published");
        Ok(())
    }

    fn check_name_length(&self, name: &str) -> Result<(), PayloadError> {
        let length = name.chars().count();
        let max = self.config.max_name_length;
        if length > max {
            return Err(PayloadError::NameTooLong { length, max });
        }
        Ok(())
    }
}

/// Returns the entries of `current` that are not in `removed`.
fn retain_absent<T: Clone + PartialEq>(current: &[T], removed: &[T]) -> Vec<T> {
    current
        .iter()
        .filter(|entry| !removed.contains(entry))
        .cloned()
        .collect()
}
