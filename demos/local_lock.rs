//! Several tasks race for one in-process lock; losers poll with a retry
//! policy until the winner releases.
//!
//! Run with `RUST_LOG=debug cargo run --example local_lock`.

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use trylock::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = LockRegistry::new();
    let policy = RetryPolicy::new(20, Duration::from_millis(25));

    let workers: Vec<_> = (0..4)
        .map(|id| {
            let registry = registry.clone();
            tokio::spawn(async move {
                let mut lock = registry.create_retrying_lock("report", policy).traced();
                match lock.try_lock().await {
                    Ok(()) => {
                        println!("worker {id} acquired the lock");
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        lock.try_unlock().await
                    }
                    Err(e) => {
                        println!("worker {id} gave up: {e}");
                        Ok(())
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.await??;
    }

    Ok(())
}
