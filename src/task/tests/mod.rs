//! Unit tests for the task runtime.

mod config_tests;
