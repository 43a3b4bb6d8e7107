//! Shared test helpers for in-memory task runtime integration tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use task_runtime::task::{
    adapters::memory::{InMemoryTaskStore, RecordingListener, StaticPrincipal},
    domain::{FieldChange, Principal, PrincipalId, Task, TaskId, TaskStatus},
    ports::{TaskEventListener, TaskQueryPort},
    services::{EventBus, TaskRuntime},
};

/// Runtime type wired to the in-memory adapters.
pub type MemoryRuntime = TaskRuntime<InMemoryTaskStore, StaticPrincipal, DefaultClock>;

/// Builds a principal from a raw identifier.
pub fn principal(raw: &str) -> Principal {
    Principal::new(PrincipalId::new(raw).expect("valid principal id"))
}

/// Builds a task the way the external store would hold it.
pub fn stored_task(id: &str, owner: Option<&str>, assignee: Option<&str>) -> Task {
    let created = Utc
        .with_ymd_and_hms(2024, 1, 15, 8, 0, 0)
        .single()
        .expect("valid timestamp");
    let mut task = Task::new(TaskId::new(id).expect("valid task id"), "Sign contract", created);
    if let Some(owner) = owner {
        task = task.with_owner(PrincipalId::new(owner).expect("valid owner"));
    }
    if let Some(assignee) = assignee {
        task = task
            .with_change(&FieldChange::Assignee(Some(
                PrincipalId::new(assignee).expect("valid assignee"),
            )))
            .with_change(&FieldChange::Status(TaskStatus::Assigned));
    }
    task
}

/// Seeds the store with `task`.
pub async fn seed(store: &InMemoryTaskStore, task: &Task) {
    store.insert(task).await.expect("seeding should succeed");
}

/// Provides a fresh in-memory store for each test.
#[fixture]
pub fn store() -> InMemoryTaskStore {
    InMemoryTaskStore::new()
}

/// Creates a runtime with `caller` signed in whose bus delivers every event
/// kind to `listeners` in order.
pub fn runtime_for(
    store: &InMemoryTaskStore,
    caller: &str,
    listeners: &[Arc<RecordingListener>],
) -> MemoryRuntime {
    let bus = listeners
        .iter()
        .fold(EventBus::builder(), |builder, listener| {
            builder.on_all(Arc::clone(listener) as Arc<dyn TaskEventListener>)
        })
        .build();
    TaskRuntime::new(
        Arc::new(store.clone()),
        Arc::new(StaticPrincipal::new(principal(caller))),
        bus,
        Arc::new(DefaultClock),
    )
}
