//! Port contracts for the task runtime.
//!
//! Ports define infrastructure-agnostic interfaces the runtime depends on.

pub mod identity;
pub mod listener;
pub mod store;

pub use identity::{CurrentPrincipal, IdentityError};
pub use listener::{ListenerError, TaskEventListener};
pub use store::{TaskQueryPort, TaskStoreError, TaskStoreResult};
