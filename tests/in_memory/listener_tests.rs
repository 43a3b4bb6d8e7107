//! Event delivery integration tests.

use std::sync::Arc;

use rstest::rstest;
use task_runtime::task::{
    adapters::memory::{InMemoryTaskStore, RecordingListener},
    domain::{CompleteTaskPayload, TaskEventKind},
};

use super::helpers::{runtime_for, seed, store, stored_task};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_listener_receives_the_returned_snapshot(store: InMemoryTaskStore) {
    seed(&store, &stored_task("T1", Some("owner"), Some("U1"))).await;
    let listeners: Vec<Arc<RecordingListener>> =
        (0..3).map(|_| Arc::new(RecordingListener::new())).collect();
    let runtime = runtime_for(&store, "U1", &listeners);

    let completed = runtime
        .complete(&CompleteTaskPayload::new("T1"))
        .await
        .expect("completion should succeed");

    for listener in &listeners {
        let events = listener.events();
        assert_eq!(events.len(), 1);
        let event = events.first().expect("one event");
        assert_eq!(event.kind(), TaskEventKind::Completed);
        assert_eq!(event.entity(), &completed);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn denied_command_reaches_no_listener(store: InMemoryTaskStore) {
    seed(&store, &stored_task("T1", Some("owner"), Some("U1"))).await;
    let listener = Arc::new(RecordingListener::new());
    let runtime = runtime_for(&store, "U2", &[Arc::clone(&listener)]);

    let result = runtime.complete(&CompleteTaskPayload::new("T1")).await;

    assert!(result.is_err());
    assert!(listener.events().is_empty());
}
