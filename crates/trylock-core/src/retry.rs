//! Bounded polling on top of any [`TryMutex`].

use std::time::Duration;

use crate::error::{LockError, LockResult};
use crate::traits::TryMutex;

/// How many times to attempt acquisition and how long to wait in between.
///
/// The delay is fixed; there is no backoff or jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of acquisition attempts.
    pub max_tries: u32,
    /// Delay between two consecutive failed attempts.
    pub interval: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt bound and fixed delay.
    pub const fn new(max_tries: u32, interval: Duration) -> Self {
        Self {
            max_tries,
            interval,
        }
    }

    /// Upper bound on the time spent sleeping by one `try_lock` call.
    pub fn max_wait(&self) -> Duration {
        self.interval.saturating_mul(self.max_tries.saturating_sub(1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(100))
    }
}

/// Decorator that turns a single `try_lock` into a bounded polling loop.
///
/// Release is not retried.
#[derive(Debug)]
pub struct RetryMutex<M> {
    inner: M,
    policy: RetryPolicy,
}

impl<M: TryMutex> RetryMutex<M> {
    /// Wraps `inner` with the given policy.
    pub fn new(inner: M, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Returns the retry policy.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
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

impl<M: TryMutex> TryMutex for RetryMutex<M> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_owner(&self) -> bool {
        self.inner.is_owner()
    }

    async fn try_lock(&mut self) -> LockResult<()> {
        let mut last = None;

        for attempt in 1..=self.policy.max_tries {
            match self.inner.try_lock().await {
                Ok(()) => return Ok(()),
                Err(e) => last = Some(Box::new(e)),
            }

            // No sleep after the final attempt
            if attempt < self.policy.max_tries {
                tokio::time::sleep(self.policy.interval).await;
            }
        }

        Err(LockError::MaxTryExceeded {
            attempts: self.policy.max_tries,
            last,
        })
    }

    async fn try_unlock(&mut self) -> LockResult<()> {
        self.inner.try_unlock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TryMutexExt;
    use std::collections::VecDeque;
    use tokio::time::Instant;

    /// Lock whose acquisition outcomes are scripted up front.
    struct ScriptedMutex {
        outcomes: VecDeque<bool>,
        attempts: u32,
        owner: bool,
    }

    impl ScriptedMutex {
        fn new(outcomes: impl IntoIterator<Item = bool>) -> Self {
            Self {
                outcomes: outcomes.into_iter().collect(),
                attempts: 0,
                owner: false,
            }
        }

        fn always_fails() -> Self {
            Self::new([])
        }
    }

    impl TryMutex for ScriptedMutex {
        fn name(&self) -> &str {
            "scripted"
        }

        fn is_owner(&self) -> bool {
            self.owner
        }

        async fn try_lock(&mut self) -> LockResult<()> {
            self.attempts += 1;
            if self.outcomes.pop_front().unwrap_or(false) {
                self.owner = true;
                Ok(())
            } else {
                Err(LockError::AlreadyLocked)
            }
        }

        async fn try_unlock(&mut self) -> LockResult<()> {
            if !self.owner {
                return Err(LockError::NotOwner);
            }
            self.owner = false;
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_attempts_and_sleeps_between_them() {
        let mut lock = ScriptedMutex::always_fails()
            .with_retry(RetryPolicy::new(3, Duration::from_millis(10)));

        let start = Instant::now();
        let err = lock.try_lock().await.unwrap_err();
        let elapsed = start.elapsed();

        assert!(matches!(err, LockError::MaxTryExceeded { attempts: 3, .. }));
        assert!(err.is_contention());
        assert!(elapsed >= Duration::from_millis(20));
        assert!(elapsed < Duration::from_millis(30));
        assert_eq!(lock.get_ref().attempts, 3);
        assert!(!lock.is_owner());
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_on_first_success() {
        let mut lock =
            RetryMutex::new(ScriptedMutex::new([false, true]), RetryPolicy::new(5, Duration::from_millis(10)));

        lock.try_lock().await.unwrap();

        assert!(lock.is_owner());
        assert_eq!(lock.get_ref().attempts, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unlock_is_not_retried() {
        let mut lock = ScriptedMutex::always_fails()
            .with_retry(RetryPolicy::new(4, Duration::from_millis(10)));

        let start = Instant::now();
        assert!(matches!(lock.try_unlock().await, Err(LockError::NotOwner)));
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(lock.into_inner().attempts, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_tries_makes_no_attempt() {
        let mut lock = ScriptedMutex::new([true]).with_retry(RetryPolicy::new(0, Duration::from_secs(1)));

        let err = lock.try_lock().await.unwrap_err();

        assert!(matches!(
            err,
            LockError::MaxTryExceeded {
                attempts: 0,
                last: None
            }
        ));
        assert_eq!(lock.get_ref().attempts, 0);
    }

    #[test]
    fn test_policy_max_wait() {
        assert_eq!(
            RetryPolicy::new(3, Duration::from_millis(10)).max_wait(),
            Duration::from_millis(20)
        );
        assert_eq!(RetryPolicy::new(0, Duration::from_secs(1)).max_wait(), Duration::ZERO);
        assert_eq!(RetryPolicy::default().max_tries, 3);
    }

    #[test]
    fn test_policy_max_wait_saturates() {
        let policy = RetryPolicy::new(u32::MAX, Duration::MAX / 2);
        assert_eq!(policy.max_wait(), Duration::MAX);
    }
}
