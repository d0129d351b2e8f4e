//! Dedicated thread pool for bcrypt
//!
//! Password hashing is CPU-bound and must stay off the actix workers.

use lazy_static::lazy_static;
use std::sync::Arc;
use tokio::runtime::Runtime;

lazy_static! {
    /// Runtime reserved for blocking hash work
    pub static ref HASH_POOL: Arc<Runtime> = Arc::new(
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .max_blocking_threads(8)
            .thread_name("hash-worker")
            .enable_all()
            .build()
            .expect("Failed to create hash thread pool")
    );
}

/// Runs a blocking closure on the hash pool
///
/// # Example
/// ```rust,ignore
/// let hashed = spawn_hash_blocking(move || bcrypt::hash(password, cost)).await?;
/// ```
pub async fn spawn_hash_blocking<F, R>(f: F) -> Result<R, tokio::task::JoinError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    HASH_POOL.spawn_blocking(f).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_pool_works() {
        let result = spawn_hash_blocking(|| {
            std::thread::sleep(std::time::Duration::from_millis(10));
            42
        }).await;

        assert_eq!(result.unwrap(), 42);
    }
}
