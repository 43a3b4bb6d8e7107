//! Task runtime: the command layer between callers and a task store.
//!
//! This crate enforces who may change a task, translates command payloads
//! into single-field store mutations, and notifies registered listeners of
//! every committed change. It never persists data, manages transactions, or
//! authenticates callers itself; those are external collaborators reached
//! through ports.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Task snapshots, payloads, events, and authorization rules
//! - **Ports**: Abstract trait interfaces for the store, identity, and
//!   listeners
//! - **Adapters**: Concrete implementations of ports (in-memory)
//! - **Services**: The runtime orchestrator and event bus
//!
//! # Modules
//!
//! - [`task`]: Task commands, authorization, and event dispatch

pub mod task;
