//! In-process backend for try-locks.
//!
//! Locks are keyed by name inside an explicitly constructed [`LockRegistry`];
//! handles created from different registries never contend.

pub mod lock;
pub mod registry;

pub use lock::LocalMutex;
pub use registry::LockRegistry;
