//! Store key derivation for lock names.

/// Prefix used when no key prefix is configured.
pub const DEFAULT_KEY_PREFIX: &str = "redis_lock:";

/// Builds the store key for `name`.
///
/// Every cooperating process must use the same prefix for the lock to be
/// shared. An empty prefix counts as unset.
pub fn lock_key(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}{name}"),
        _ => format!("{DEFAULT_KEY_PREFIX}{name}"),
    }
}
