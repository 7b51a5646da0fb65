//! Redis backend for try-locks.
//!
//! A lock is a key written with `SET NX PX`: the write succeeds for exactly
//! one caller and the server expires the key once the lease runs out.

pub mod key;
pub mod lock;
pub mod memory;
pub mod provider;
pub mod store;

pub use key::{lock_key, DEFAULT_KEY_PREFIX};
pub use lock::{LeaseMutex, RedisMutex};
pub use memory::MemoryLeaseStore;
pub use provider::{RedisLockProvider, RedisLockProviderBuilder, DEFAULT_EXPIRY};
pub use store::LeaseStore;
