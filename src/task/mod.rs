//! Task command layer.
//!
//! Mediates between callers and an external task store: every mutating
//! command loads the current task, checks the caller's relation to it,
//! applies field changes through the store port, and publishes one event to
//! the registered listeners. The module follows hexagonal architecture:
//!
//! - Domain types and authorization rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
