//! The store operations a lease lock needs, and their Redis implementation.

use std::future::Future;
use std::time::Duration;

use fred::prelude::*;
use trylock_core::error::{LockError, LockResult};

/// A shared key-value store with server-side key expiry.
///
/// Only two operations are required. `set_if_absent` must be a single atomic
/// step at the store; it is the mutual-exclusion primitive.
pub trait LeaseStore: Send + Sync {
    /// Short backend name recorded on tracing spans.
    const BACKEND: &'static str;

    /// Sets `key` to `value` with the given time-to-live, only if `key` does
    /// not exist. Returns whether the key was set.
    fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> impl Future<Output = LockResult<bool>> + Send;

    /// Deletes `key`. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> impl Future<Output = LockResult<()>> + Send;
}

/// Converts a lease to the `PX` argument, rounding up to whole milliseconds.
///
/// The server lease must never be shorter than the one the handle checks
/// against locally.
pub(crate) fn expiry_millis(ttl: Duration) -> LockResult<i64> {
    let millis = ttl.as_nanos().div_ceil(1_000_000);
    if millis == 0 {
        return Err(LockError::InvalidConfiguration(
            "lock expiry must be greater than zero".to_string(),
        ));
    }

    i64::try_from(millis).map_err(|_| {
        LockError::InvalidConfiguration(format!("lock expiry {ttl:?} is too large"))
    })
}

impl LeaseStore for RedisClient {
    const BACKEND: &'static str = "redis";

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> LockResult<bool> {
        let expiry_millis = expiry_millis(ttl)?;

        // SET NX returns Some(value) if key was set, None if key already exists
        let result: Option<String> = self
            .set(
                key,
                value,
                Some(Expiration::PX(expiry_millis)),
                Some(SetOptions::NX),
                false,
            )
            .await
            .map_err(|e| LockError::Backend(Box::new(e)))?;

        Ok(result.is_some())
    }

    async fn delete(&self, key: &str) -> LockResult<()> {
        let _: i64 = self
            .del(key)
            .await
            .map_err(|e| LockError::Backend(Box::new(e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_millis_rounds_up() {
        assert_eq!(expiry_millis(Duration::from_micros(500)).unwrap(), 1);
        assert_eq!(expiry_millis(Duration::from_micros(1500)).unwrap(), 2);
        assert_eq!(expiry_millis(Duration::from_secs(30)).unwrap(), 30_000);
    }

    #[test]
    fn test_expiry_millis_rejects_unrepresentable_leases() {
        assert!(matches!(
            expiry_millis(Duration::ZERO),
            Err(LockError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            expiry_millis(Duration::MAX),
            Err(LockError::InvalidConfiguration(_))
        ));
    }
}
