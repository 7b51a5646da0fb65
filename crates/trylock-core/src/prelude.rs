//! Convenience prelude for try-lock types.

pub use crate::error::{LockError, LockResult};
pub use crate::retry::{RetryMutex, RetryPolicy};
pub use crate::traced::Traced;
pub use crate::traits::{LockProvider, LockProviderExt, TryMutex, TryMutexExt};
