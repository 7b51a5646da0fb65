//! Registry of lock names held within this process.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use trylock_core::traits::LockProvider;

use crate::lock::LocalMutex;

/// Set of currently held lock names.
///
/// Cloning is cheap and yields a handle to the same registry; independent
/// registries are created with [`LockRegistry::new`]. The registry records
/// only that a name is occupied, not which handle occupies it.
#[derive(Debug, Clone, Default)]
pub struct LockRegistry {
    held: Arc<Mutex<HashSet<String>>>,
}

impl LockRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `name` is currently held.
    pub fn is_locked(&self, name: &str) -> bool {
        self.held().contains(name)
    }

    /// Returns the number of held names.
    pub fn len(&self) -> usize {
        self.held().len()
    }

    /// Returns `true` if no name is held.
    pub fn is_empty(&self) -> bool {
        self.held().is_empty()
    }

    /// Marks `name` as held. Returns `false` if it already was.
    pub(crate) fn insert(&self, name: &str) -> bool {
        let mut held = self.held();
        if held.contains(name) {
            return false;
        }
        held.insert(name.to_owned())
    }

    /// Clears `name`. Returns `false` if it was not held.
    pub(crate) fn remove(&self, name: &str) -> bool {
        self.held().remove(name)
    }

    // Each critical section is a single set operation, so a poisoned guard
    // still protects a consistent set.
    fn held(&self) -> MutexGuard<'_, HashSet<String>> {
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LockProvider for LockRegistry {
    type Lock = LocalMutex;

    fn create_lock(&self, name: &str) -> Self::Lock {
        LocalMutex::new(self.clone(), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let registry = LockRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.insert("a"));
        assert!(!registry.insert("a"));
        assert!(registry.is_locked("a"));
        assert_eq!(registry.len(), 1);

        assert!(registry.remove("a"));
        assert!(!registry.remove("a"));
        assert!(!registry.is_locked("a"));
    }

    #[test]
    fn test_clones_share_state() {
        let registry = LockRegistry::new();
        let other = registry.clone();

        registry.insert("shared");
        assert!(other.is_locked("shared"));
    }

    #[test]
    fn test_independent_registries() {
        let first = LockRegistry::new();
        let second = LockRegistry::new();

        first.insert("name");
        assert!(!second.is_locked("name"));
        assert!(second.insert("name"));
    }
}
