//! Adapter implementations for task runtime ports.

pub mod memory;
