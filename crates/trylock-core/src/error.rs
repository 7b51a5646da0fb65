//! Error types for try-lock operations.

use thiserror::Error;

/// Errors that can occur during lock operations.
#[derive(Error, Debug)]
pub enum LockError {
    /// The name or key is currently held by someone else.
    #[error("already locked")]
    AlreadyLocked,

    /// This handle owned the lock but the underlying entry is already gone.
    #[error("already unlocked")]
    AlreadyUnlocked,

    /// This handle never successfully acquired the lock.
    #[error("not owner")]
    NotOwner,

    /// The lease elapsed before release was attempted.
    ///
    /// Work done under the lock may have overlapped with another owner.
    #[error("lock lease expired")]
    Expired,

    /// Every bounded acquisition attempt failed.
    #[error("max try exceeded after {attempts} attempts")]
    MaxTryExceeded {
        /// Number of attempts made.
        attempts: u32,
        /// Failure reported by the final attempt.
        #[source]
        last: Option<Box<LockError>>,
    },

    /// Connecting to the backing store failed.
    #[error("connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The lock or provider was configured incorrectly.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Backend-specific error, passed through from the store client.
    #[error("backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LockError {
    /// Returns `true` when the failure means "someone else holds the lock"
    /// rather than "the store could not be reached".
    pub fn is_contention(&self) -> bool {
        match self {
            LockError::AlreadyLocked => true,
            LockError::MaxTryExceeded {
                last: Some(last), ..
            } => last.is_contention(),
            _ => false,
        }
    }

    /// Returns `true` when a release reported that the critical section may
    /// have run concurrently with another owner.
    pub fn is_unsafe_release(&self) -> bool {
        matches!(self, LockError::Expired | LockError::AlreadyUnlocked)
    }
}

/// Result type for lock operations.
pub type LockResult<T> = Result<T, LockError>;
