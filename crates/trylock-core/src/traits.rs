//! Core traits for try-locks.

use std::future::Future;

use crate::error::LockResult;
use crate::retry::{RetryMutex, RetryPolicy};
use crate::traced::Traced;

// ============================================================================
// Mutex Trait
// ============================================================================

/// A non-blocking mutual exclusion lock over a named critical section.
///
/// A value of this type is a single handle: it owns one name and remembers
/// whether it currently holds the lock. Neither operation ever waits for the
/// lock to become free, and nothing is released implicitly on drop.
///
/// # Example
///
/// ```rust,ignore
/// let mut lock = registry.create_lock("nightly-report");
/// if lock.try_lock().await.is_ok() {
///     build_report().await;
///     lock.try_unlock().await?;
/// }
/// ```
pub trait TryMutex: Send + Sync {
    /// Returns the name identifying the critical section.
    fn name(&self) -> &str;

    /// Returns whether this handle believes it holds the lock.
    fn is_owner(&self) -> bool;

    /// Attempts a single acquisition.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - This handle now holds the lock
    /// * `Err(LockError::AlreadyLocked)` - Someone else holds it
    /// * `Err(...)` - Backend-specific failure
    fn try_lock(&mut self) -> impl Future<Output = LockResult<()>> + Send;

    /// Releases a lock previously acquired by this handle.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The lock was released
    /// * `Err(LockError::NotOwner)` - This handle never acquired it
    /// * `Err(LockError::AlreadyUnlocked)` / `Err(LockError::Expired)` - The
    ///   underlying resource was no longer held; treat the critical section
    ///   as unconfirmed
    fn try_unlock(&mut self) -> impl Future<Output = LockResult<()>> + Send;
}

// ============================================================================
// Provider Traits
// ============================================================================

/// Factory for creating lock handles by name.
///
/// Providers carry backend configuration (registry, store client, lease,
/// key prefix) so application code stays backend-agnostic.
pub trait LockProvider: Send + Sync {
    /// The lock type created by this provider.
    type Lock: TryMutex;

    /// Creates a fresh, unowned handle for the given name.
    fn create_lock(&self, name: &str) -> Self::Lock;
}

// ============================================================================
// Convenience Extensions
// ============================================================================

/// Composition helpers available on every [`TryMutex`].
pub trait TryMutexExt: TryMutex + Sized {
    /// Wraps this lock so `try_lock` polls up to `policy.max_tries` times.
    fn with_retry(self, policy: RetryPolicy) -> RetryMutex<Self> {
        RetryMutex::new(self, policy)
    }

    /// Wraps this lock so every outcome is reported through `tracing`.
    fn traced(self) -> Traced<Self> {
        Traced::new(self)
    }
}

impl<T: TryMutex> TryMutexExt for T {}

/// Extension trait providing convenience methods for lock providers.
pub trait LockProviderExt: LockProvider {
    /// Creates a lock by name already wrapped in a retry decorator.
    fn create_retrying_lock(&self, name: &str, policy: RetryPolicy) -> RetryMutex<Self::Lock> {
        RetryMutex::new(self.create_lock(name), policy)
    }
}

// Blanket implementation for all LockProviders
impl<T: LockProvider> LockProviderExt for T {}
