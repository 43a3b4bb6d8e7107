//! Identity port resolving the principal behind the current call.

use crate::task::domain::Principal;
use thiserror::Error;

/// Supplies the authenticated caller of the command in progress.
#[cfg_attr(test, mockall::automock)]
pub trait CurrentPrincipal: Send + Sync {
    /// Returns the current principal.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when no caller is authenticated or the
    /// identity subsystem fails.
    fn current(&self) -> Result<Principal, IdentityError>;
}

/// Errors returned by identity implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// No principal is attached to the current call.
    #[error("no authenticated principal")]
    Unauthenticated,

    /// The identity subsystem failed.
    #[error("identity lookup failed: {0}")]
    Lookup(String),
}
