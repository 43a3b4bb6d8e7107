//! Shared world state for task command BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use task_runtime::task::{
    adapters::memory::{InMemoryTaskStore, RecordingListener, StaticPrincipal},
    domain::{Principal, PrincipalId, Task},
    ports::TaskEventListener,
    services::{EventBus, TaskRuntime, TaskRuntimeError},
};

/// Runtime type used by the BDD world.
pub type TestTaskRuntime = TaskRuntime<InMemoryTaskStore, StaticPrincipal, DefaultClock>;

/// Scenario world for task command behaviour tests.
pub struct TaskRuntimeWorld {
    pub store: InMemoryTaskStore,
    pub identity: Arc<StaticPrincipal>,
    pub listener: Arc<RecordingListener>,
    pub runtime: TestTaskRuntime,
    pub last_result: Option<Result<Task, TaskRuntimeError>>,
    pub claim_failures: Vec<String>,
}

impl TaskRuntimeWorld {
    /// Creates a world with nobody signed in and an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = InMemoryTaskStore::new();
        let identity = Arc::new(StaticPrincipal::anonymous());
        let listener = Arc::new(RecordingListener::new());
        let events = EventBus::builder()
            .on_all(Arc::clone(&listener) as Arc<dyn TaskEventListener>)
            .build();
        let runtime = TaskRuntime::new(
            Arc::new(store.clone()),
            Arc::clone(&identity),
            events,
            Arc::new(DefaultClock),
        );

        Self {
            store,
            identity,
            listener,
            runtime,
            last_result: None,
            claim_failures: Vec::new(),
        }
    }

    /// Signs `raw` in as the calling principal.
    pub fn sign_in(&self, raw: &str) -> Result<(), eyre::Report> {
        let id = PrincipalId::new(raw)?;
        self.identity.sign_in(Principal::new(id))?;
        Ok(())
    }
}

impl Default for TaskRuntimeWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskRuntimeWorld {
    TaskRuntimeWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
