//! Lease-based distributed try-lock.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use fred::prelude::RedisClient;
use rand::Rng;
use tokio::time::Instant;
use tracing::instrument;
use trylock_core::error::{LockError, LockResult};
use trylock_core::traits::TryMutex;

use crate::key::lock_key;
use crate::store::LeaseStore;

/// Lease lock backed by a Redis client.
pub type RedisMutex = LeaseMutex<RedisClient>;

/// A distributed try-lock held as a store key with a time-to-live.
///
/// The key's existence in the store is the only source of truth for
/// ownership. The handle also remembers when it acquired so that a release
/// attempted after the lease ran out is reported as [`LockError::Expired`]
/// instead of deleting a key that may now belong to someone else.
#[derive(Debug)]
pub struct LeaseMutex<S> {
    store: S,
    name: String,
    key: String,
    expiry: Duration,
    token: String,
    acquired_at: Option<Instant>,
}

impl<S: LeaseStore> LeaseMutex<S> {
    /// Creates an unowned handle for `name` using the default key prefix.
    pub fn new(store: S, name: impl Into<String>, expiry: Duration) -> Self {
        let name = name.into();
        Self {
            store,
            key: lock_key(None, &name),
            name,
            expiry,
            token: create_lock_token(),
            acquired_at: None,
        }
    }

    /// Places the key under `prefix` instead of the default prefix.
    pub fn with_key_prefix(mut self, prefix: &str) -> Self {
        self.key = lock_key(Some(prefix), &self.name);
        self
    }

    /// Returns the store key guarding this lock.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the lease duration.
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Returns the value written to the key on acquisition.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the lease time left, or `None` when not owned.
    ///
    /// This is the local estimate; the store may expire the key slightly
    /// earlier or later.
    pub fn remaining(&self) -> Option<Duration> {
        self.acquired_at
            .map(|at| self.expiry.saturating_sub(at.elapsed()))
    }
}

impl<S: LeaseStore> TryMutex for LeaseMutex<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_owner(&self) -> bool {
        self.acquired_at.is_some()
    }

    #[instrument(level = "trace", skip(self), fields(lock.name = %self.name, lock.key = %self.key, backend = S::BACKEND))]
    async fn try_lock(&mut self) -> LockResult<()> {
        // The server lease starts before the reply arrives
        let requested_at = Instant::now();
        if !self
            .store
            .set_if_absent(&self.key, &self.token, self.expiry)
            .await?
        {
            return Err(LockError::AlreadyLocked);
        }

        self.acquired_at = Some(requested_at);
        Ok(())
    }

    #[instrument(level = "trace", skip(self), fields(lock.name = %self.name, lock.key = %self.key, backend = S::BACKEND))]
    async fn try_unlock(&mut self) -> LockResult<()> {
        let Some(acquired_at) = self.acquired_at else {
            return Err(LockError::NotOwner);
        };

        if acquired_at.elapsed() >= self.expiry {
            return Err(LockError::Expired);
        }

        self.store.delete(&self.key).await?;

        self.acquired_at = None;
        Ok(())
    }
}

/// Generates a value unique to one lock handle.
///
/// Format: `{process_id}_{counter}_{random}`
fn create_lock_token() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);

    let random: u64 = rand::thread_rng().r#gen();

    format!("{}_{}_{:016x}", process::id(), counter, random)
}
