//! Fixed, switchable identity for tests and single-user embedding.

use std::sync::RwLock;

use crate::task::{
    domain::Principal,
    ports::{CurrentPrincipal, IdentityError},
};

/// Identity source returning whichever principal was last signed in.
#[derive(Debug, Default)]
pub struct StaticPrincipal {
    current: RwLock<Option<Principal>>,
}

impl StaticPrincipal {
    /// Creates a source with `principal` signed in.
    #[must_use]
    pub const fn new(principal: Principal) -> Self {
        Self {
            current: RwLock::new(Some(principal)),
        }
    }

    /// Creates a source with nobody signed in.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Replaces the signed-in principal.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Lookup`] when the lock is poisoned.
    pub fn sign_in(&self, principal: Principal) -> Result<(), IdentityError> {
        let mut current = self
            .current
            .write()
            .map_err(|err| IdentityError::Lookup(err.to_string()))?;
        *current = Some(principal);
        Ok(())
    }

    /// Signs the current principal out.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Lookup`] when the lock is poisoned.
    pub fn sign_out(&self) -> Result<(), IdentityError> {
        let mut current = self
            .current
            .write()
            .map_err(|err| IdentityError::Lookup(err.to_string()))?;
        *current = None;
        Ok(())
    }
}

impl CurrentPrincipal for StaticPrincipal {
    fn current(&self) -> Result<Principal, IdentityError> {
        let current = self
            .current
            .read()
            .map_err(|err| IdentityError::Lookup(err.to_string()))?;
        current.clone().ok_or(IdentityError::Unauthenticated)
    }
}
