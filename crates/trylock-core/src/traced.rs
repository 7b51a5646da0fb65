//! Side-observer that reports lock outcomes through `tracing`.

use tracing::{debug, error, warn};

use crate::error::{LockError, LockResult};
use crate::traits::TryMutex;

/// Decorator that logs every `try_lock` / `try_unlock` outcome.
///
/// Results are passed through untouched.
#[derive(Debug)]
pub struct Traced<M> {
    inner: M,
}

impl<M: TryMutex> Traced<M> {
    /// Wraps `inner`.
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    /// Returns a reference to the wrapped lock.
    pub fn get_ref(&self) -> &M {
        &self.inner
    }

    /// Unwraps the decorator, returning the wrapped lock.
    pub fn into_inner(self) -> M {
        self.inner
    }
}

fn report(name: &str, operation: &'static str, result: &LockResult<()>) {
    match result {
        Ok(()) => debug!(lock.name = %name, operation, "lock operation succeeded"),
        Err(e) if e.is_contention() => {
            debug!(lock.name = %name, operation, error = %e, "lock is held elsewhere")
        }
        Err(LockError::NotOwner) => {
            debug!(lock.name = %name, operation, "release attempted by non-owner")
        }
        Err(e) if e.is_unsafe_release() => warn!(
            lock.name = %name,
            operation,
            error = %e,
            "lock was no longer held at release; critical section unconfirmed"
        ),
        Err(e) => error!(lock.name = %name, operation, error = %e, "lock operation failed"),
    }
}

impl<M: TryMutex> TryMutex for Traced<M> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_owner(&self) -> bool {
        self.inner.is_owner()
    }

    async fn try_lock(&mut self) -> LockResult<()> {
        let result = self.inner.try_lock().await;
        report(self.inner.name(), "try_lock", &result);
        result
    }

    async fn try_unlock(&mut self) -> LockResult<()> {
        let result = self.inner.try_unlock().await;
        report(self.inner.name(), "try_unlock", &result);
        result
    }
}
