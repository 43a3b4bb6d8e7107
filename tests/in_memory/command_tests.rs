//! Command-level integration tests through the public runtime API.

use std::sync::Arc;

use rstest::rstest;
use task_runtime::task::{
    adapters::memory::{InMemoryTaskStore, RecordingListener},
    domain::{
        ClaimTaskPayload, FieldChange, ReleaseTaskPayload, TaskEventKind, TaskId,
        UpdateTaskPayload,
    },
    services::TaskRuntimeError,
};

use super::helpers::{runtime_for, seed, store, stored_task};

#[rstest]
#[case("U1")]
#[case("owner")]
#[case("someone-else")]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unassigned_task_is_rejected_for_everyone(
    #[case] caller: &str,
    store: InMemoryTaskStore,
) {
    seed(&store, &stored_task("T1", Some("owner"), None)).await;
    let listener = Arc::new(RecordingListener::new());
    let runtime = runtime_for(&store, caller, &[Arc::clone(&listener)]);

    let result = runtime
        .update(&UpdateTaskPayload::new("T1").with_description("x"))
        .await;

    let message = result.expect_err("update should be rejected").to_string();
    assert_eq!(
        message,
        "You cannot update a task where you are not the assignee"
    );
    assert!(store.applied_changes().expect("readable log").is_empty());
    assert!(listener.events().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_update_mutates_only_the_description(store: InMemoryTaskStore) {
    let before = stored_task("T1", Some("owner"), Some("U1"));
    seed(&store, &before).await;
    let listener = Arc::new(RecordingListener::new());
    let runtime = runtime_for(&store, "U1", &[Arc::clone(&listener)]);

    let updated = runtime
        .update(&UpdateTaskPayload::new("T1").with_description("new description"))
        .await
        .expect("update should succeed");

    let task_id = TaskId::new("T1").expect("valid task id");
    assert_eq!(
        store.applied_changes().expect("readable log"),
        vec![(
            task_id.clone(),
            FieldChange::Description("new description".to_owned())
        )]
    );
    assert_eq!(updated.description(), Some("new description"));
    assert_eq!(updated.name(), before.name());
    assert_eq!(updated.priority(), before.priority());
    assert_eq!(updated.assignee(), before.assignee());
    assert_eq!(
        runtime.task(&task_id).await.expect("lookup should succeed"),
        updated
    );

    let events = listener.events();
    assert_eq!(events.len(), 1);
    let event = events.first().expect("one event");
    assert_eq!(event.kind(), TaskEventKind::Updated);
    assert_eq!(event.entity(), &updated);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn release_by_non_assignee_leaves_task_untouched(store: InMemoryTaskStore) {
    seed(&store, &stored_task("T1", Some("owner"), Some("U1"))).await;
    let runtime = runtime_for(&store, "owner", &[]);

    let result = runtime.release(&ReleaseTaskPayload::new("T1")).await;

    assert!(matches!(result, Err(TaskRuntimeError::IllegalState(_))));
    assert!(store.applied_changes().expect("readable log").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_claims_by_another_principal_fail_identically(store: InMemoryTaskStore) {
    seed(&store, &stored_task("T1", None, None)).await;
    runtime_for(&store, "U1", &[])
        .claim(&ClaimTaskPayload::new("T1"))
        .await
        .expect("first claim should succeed");
    let rival = runtime_for(&store, "U2", &[]);

    let first = rival
        .claim(&ClaimTaskPayload::new("T1"))
        .await
        .expect_err("claim should be rejected")
        .to_string();
    let second = rival
        .claim(&ClaimTaskPayload::new("T1"))
        .await
        .expect_err("claim should be rejected")
        .to_string();

    assert_eq!(first, second);
    assert_eq!(
        first,
        "You cannot claim a task that is assigned or where you are not a candidate"
    );
}
