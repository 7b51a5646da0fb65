//! Non-blocking try-locks for a single process or a fleet of processes.
//!
//! Every lock is a handle implementing [`TryMutex`]: `try_lock` either
//! acquires immediately or fails, and `try_unlock` must be called explicitly.
//! Waiting is approximated by wrapping a handle in a [`RetryMutex`] that polls
//! a bounded number of times with a fixed delay.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use trylock::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = RedisLockProvider::builder()
//!         .url("redis://localhost:6379")
//!         .expiry(Duration::from_secs(10))
//!         .key_prefix("billing:")
//!         .build()
//!         .await?;
//!
//!     let mut lock = provider
//!         .create_lock("invoice-run")
//!         .with_retry(RetryPolicy::new(5, Duration::from_millis(200)));
//!
//!     if lock.try_lock().await.is_ok() {
//!         // Critical section
//!         lock.try_unlock().await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Backends
//!
//! ## In-process
//!
//! Names are held in a [`LockRegistry`]. Handles only contend with handles
//! created from the same registry (or a clone of it).
//!
//! ```rust,no_run
//! use trylock::*;
//!
//! let registry = LockRegistry::new();
//! let lock = registry.create_lock("cache-refresh");
//! ```
//!
//! ## Redis
//!
//! A lock is a key written with `SET NX PX`. The server expires the key when
//! the lease runs out; releasing after that point reports
//! [`LockError::Expired`].
//!
//! # Crate Organization
//!
//! This is a meta-crate that re-exports types from:
//! - `trylock-core`: Core traits, errors, retry and tracing decorators
//! - `trylock-local`: In-process backend
//! - `trylock-redis`: Redis backend
//!
//! For fine-grained control, you can depend on individual crates instead.

// Re-export core types and traits
pub use trylock_core::*;

// Re-export in-process backend
#[allow(ambiguous_glob_reexports)]
pub use trylock_local::*;

// Re-export redis backend
#[allow(ambiguous_glob_reexports)]
pub use trylock_redis::*;
