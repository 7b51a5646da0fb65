//! In-process [`LeaseStore`] with expiry, for tests and single-process use.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use trylock_core::error::LockResult;

use crate::store::LeaseStore;

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// Lease store kept in memory.
///
/// Expired keys are treated as absent and purged on the next write. Clones
/// share the same key space.
#[derive(Debug, Clone, Default)]
pub struct MemoryLeaseStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryLeaseStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored at `key` if it has not expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        self.entries()
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone())
    }

    /// Returns whether `key` exists and has not expired.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remaining time-to-live of `key`, if present.
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries()
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.expires_at - now)
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LeaseStore for MemoryLeaseStore {
    const BACKEND: &'static str = "memory";

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> LockResult<bool> {
        let now = Instant::now();
        let mut entries = self.entries();

        entries.retain(|_, entry| entry.expires_at > now);
        if entries.contains_key(key) {
            return Ok(false);
        }

        entries.insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at: now + ttl,
            },
        );
        Ok(true)
    }

    async fn delete(&self, key: &str) -> LockResult<()> {
        self.entries().remove(key);
        Ok(())
    }
}
