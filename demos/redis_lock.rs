//! Acquires a Redis-backed lease lock, does some work, and releases it.
//!
//! Run with `REDIS_URL=redis://localhost:6379 cargo run --example redis_lock`.

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use trylock::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let provider = RedisLockProvider::builder()
        .url(url)
        .expiry(Duration::from_secs(5))
        .key_prefix("demo:")
        .build()
        .await?;

    let mut lock = provider
        .create_lock("nightly-job")
        .with_retry(RetryPolicy::new(10, Duration::from_millis(200)))
        .traced();

    if let Err(e) = lock.try_lock().await {
        println!("could not acquire {}: {e}", lock.name());
        return Ok(());
    }

    println!("acquired {}", lock.name());
    tokio::time::sleep(Duration::from_secs(1)).await;

    match lock.try_unlock().await {
        Ok(()) => println!("released {}", lock.name()),
        Err(e) if e.is_unsafe_release() => println!("lease lost before release; results unconfirmed"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
