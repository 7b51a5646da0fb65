//! Mock provider for testing provider abstraction.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use trylock::{LockError, LockProvider, LockResult, TryMutex};

/// Lock that reports contention for its first `busy_for` attempts.
pub struct MockMutex {
    name: String,
    busy_for: u32,
    attempts: Arc<AtomicU32>,
    owner: bool,
}

impl TryMutex for MockMutex {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_owner(&self) -> bool {
        self.owner
    }

    async fn try_lock(&mut self) -> LockResult<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.busy_for {
            return Err(LockError::AlreadyLocked);
        }
        self.owner = true;
        Ok(())
    }

    async fn try_unlock(&mut self) -> LockResult<()> {
        if !self.owner {
            return Err(LockError::NotOwner);
        }
        self.owner = false;
        Ok(())
    }
}

/// Mock provider whose locks succeed after a fixed number of busy attempts.
pub struct MockLockProvider {
    busy_for: u32,
    attempts: Arc<AtomicU32>,
}

impl MockLockProvider {
    /// Creates a provider whose locks are busy for `busy_for` attempts.
    pub fn new(busy_for: u32) -> Self {
        Self {
            busy_for,
            attempts: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Total `try_lock` calls across all locks created by this provider.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl LockProvider for MockLockProvider {
    type Lock = MockMutex;

    fn create_lock(&self, name: &str) -> Self::Lock {
        MockMutex {
            name: name.to_string(),
            busy_for: self.busy_for,
            attempts: self.attempts.clone(),
            owner: false,
        }
    }
}
