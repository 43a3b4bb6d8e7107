//! Application services for the task runtime.

mod config;
mod event_bus;
mod runtime;

pub use config::TaskRuntimeConfig;
pub use event_bus::{EventBus, EventBusBuilder};
pub use runtime::{TaskRuntime, TaskRuntimeError, TaskRuntimeResult};
