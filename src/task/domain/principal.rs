//! The authenticated caller as seen by the task runtime.

use super::{GroupId, PrincipalId};
use serde::{Deserialize, Serialize};

/// Identity of the caller issuing a task command.
///
/// Resolved by the identity subsystem; the runtime never authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: PrincipalId,
    groups: Vec<GroupId>,
    elevated: bool,
}

impl Principal {
    /// Creates a principal without group memberships or elevated capability.
    #[must_use]
    pub const fn new(id: PrincipalId) -> Self {
        Self {
            id,
            groups: Vec::new(),
            elevated: false,
        }
    }

    /// Sets the groups the principal belongs to.
    #[must_use]
    pub fn with_groups(mut self, groups: impl IntoIterator<Item = GroupId>) -> Self {
        self.groups = groups.into_iter().collect();
        self
    }

    /// Grants the administrative capability used to assign foreign tasks and
    /// list every task.
    #[must_use]
    pub const fn with_elevated_capability(mut self) -> Self {
        self.elevated = true;
        self
    }

    /// Returns the principal identifier.
    #[must_use]
    pub const fn id(&self) -> &PrincipalId {
        &self.id
    }

    /// Returns the groups the principal belongs to.
    #[must_use]
    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    /// Returns `true` when the principal belongs to `group`.
    #[must_use]
    pub fn is_member_of(&self, group: &GroupId) -> bool {
        self.groups.contains(group)
    }

    /// Returns `true` when the principal holds the administrative capability.
    #[must_use]
    pub const fn has_elevated_capability(&self) -> bool {
        self.elevated
    }
}
