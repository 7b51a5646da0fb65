//! Core traits, errors and decorators for non-blocking try-locks.

pub mod error;
pub mod prelude;
pub mod retry;
pub mod traced;
pub mod traits;

pub use error::{LockError, LockResult};
pub use prelude::*;
