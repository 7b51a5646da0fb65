//! Redis lock provider implementation.

use std::time::Duration;

use fred::prelude::*;
use trylock_core::error::{LockError, LockResult};
use trylock_core::traits::LockProvider;

use crate::lock::LeaseMutex;
use crate::store::LeaseStore;

/// Lease applied when none is configured.
pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(30);

/// Builder for Redis lock provider configuration.
pub struct RedisLockProviderBuilder {
    url: Option<String>,
    client: Option<RedisClient>,
    expiry: Duration,
    key_prefix: Option<String>,
}

impl RedisLockProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: None,
            client: None,
            expiry: DEFAULT_EXPIRY,
            key_prefix: None,
        }
    }

    /// Sets the Redis server URL to connect to.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Uses an existing, already connected Redis client.
    ///
    /// Takes precedence over [`url`](Self::url).
    pub fn client(mut self, client: RedisClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the lease duration of every lock created by the provider.
    pub fn expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    /// Sets the prefix prepended to every lock key.
    ///
    /// All processes sharing a lock must use the same prefix.
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Builds the provider, connecting to the server if a URL was given.
    pub async fn build(self) -> LockResult<RedisLockProvider> {
        let client = match (self.client, self.url) {
            (Some(client), _) => client,
            (None, Some(url)) => connect(&url).await?,
            (None, None) => {
                return Err(LockError::InvalidConfiguration(
                    "no Redis client or URL provided".to_string(),
                ))
            }
        };

        Ok(RedisLockProvider {
            store: client,
            expiry: self.expiry,
            key_prefix: self.key_prefix,
        })
    }
}

impl Default for RedisLockProviderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn connect(url: &str) -> LockResult<RedisClient> {
    let config = RedisConfig::from_url(url).map_err(|e| {
        LockError::Connection(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid Redis URL: {}", e),
        )))
    })?;

    let client = RedisClient::new(config, None, None, None);
    client.connect();
    client.wait_for_connect().await.map_err(|e| {
        LockError::Connection(Box::new(std::io::Error::other(format!(
            "failed to connect to Redis: {}",
            e
        ))))
    })?;

    Ok(client)
}

/// Provider for lease-based distributed locks.
///
/// Holds one long-lived store connection shared by every lock it creates.
pub struct RedisLockProvider<S = RedisClient> {
    store: S,
    expiry: Duration,
    key_prefix: Option<String>,
}

impl RedisLockProvider {
    /// Returns a new builder for configuring the provider.
    pub fn builder() -> RedisLockProviderBuilder {
        RedisLockProviderBuilder::new()
    }

    /// Creates a provider using the specified Redis URL.
    pub async fn new(url: impl Into<String>) -> LockResult<Self> {
        Self::builder().url(url).build().await
    }
}

impl<S: LeaseStore + Clone> RedisLockProvider<S> {
    /// Creates a provider over any lease store with the default lease and
    /// key prefix.
    pub fn from_store(store: S) -> Self {
        Self {
            store,
            expiry: DEFAULT_EXPIRY,
            key_prefix: None,
        }
    }

    /// Sets the lease duration.
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    /// Sets the key prefix.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the lease duration.
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Returns the configured key prefix, if any.
    pub fn key_prefix(&self) -> Option<&str> {
        self.key_prefix.as_deref()
    }
}

impl<S: LeaseStore + Clone> LockProvider for RedisLockProvider<S> {
    type Lock = LeaseMutex<S>;

    fn create_lock(&self, name: &str) -> Self::Lock {
        let lock = LeaseMutex::new(self.store.clone(), name, self.expiry);
        match &self.key_prefix {
            Some(prefix) => lock.with_key_prefix(prefix),
            None => lock,
        }
    }
}
