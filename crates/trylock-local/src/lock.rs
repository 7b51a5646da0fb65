//! In-process try-lock keyed by name.

use trylock_core::error::{LockError, LockResult};
use trylock_core::traits::TryMutex;

use crate::registry::LockRegistry;

/// A try-lock on a name within one [`LockRegistry`].
///
/// This is cooperative advisory locking: another handle for the same name
/// that still believes it is the owner can release the entry out from under
/// this one, which surfaces here as [`LockError::AlreadyUnlocked`].
#[derive(Debug)]
pub struct LocalMutex {
    registry: LockRegistry,
    name: String,
    is_owner: bool,
}

impl LocalMutex {
    /// Creates an unowned handle for `name` in `registry`.
    pub fn new(registry: LockRegistry, name: impl Into<String>) -> Self {
        Self {
            registry,
            name: name.into(),
            is_owner: false,
        }
    }

    /// Returns the registry this handle locks against.
    pub fn registry(&self) -> &LockRegistry {
        &self.registry
    }
}

impl TryMutex for LocalMutex {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_owner(&self) -> bool {
        self.is_owner
    }

    async fn try_lock(&mut self) -> LockResult<()> {
        if !self.registry.insert(&self.name) {
            return Err(LockError::AlreadyLocked);
        }

        self.is_owner = true;
        Ok(())
    }

    async fn try_unlock(&mut self) -> LockResult<()> {
        if !self.is_owner {
            return Err(LockError::NotOwner);
        }

        if !self.registry.remove(&self.name) {
            return Err(LockError::AlreadyUnlocked);
        }

        self.is_owner = false;
        Ok(())
    }
}
