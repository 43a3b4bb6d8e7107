//! Identifier types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a task record held by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::BlankTaskId`] when the value is empty or
    /// whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        non_blank(value.into())
            .map(Self)
            .ok_or(TaskDomainError::BlankTaskId)
    }

    /// Generates a fresh identifier for a task created through the runtime.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an authenticated user, as resolved by the identity subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Creates a validated principal identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::BlankPrincipalId`] when the value is empty
    /// or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        non_blank(value.into())
            .map(Self)
            .ok_or(TaskDomainError::BlankPrincipalId)
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PrincipalId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a group of principals, used for candidate assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Creates a validated group identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::BlankGroupId`] when the value is empty or
    /// whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        non_blank(value.into())
            .map(Self)
            .ok_or(TaskDomainError::BlankGroupId)
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trims the value, returning `None` when nothing is left.
fn non_blank(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.len() == raw.len() {
        return Some(raw);
    }
    Some(trimmed.to_owned())
}
