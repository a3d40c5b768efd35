use std::sync::atomic::{AtomicU64, Ordering};

use fred::prelude::*;

use crate::TestError;

static KEY_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Redis test setup with automatic cleanup
///
/// Manages a Redis connection pool and a key unique to the test. The key is deleted when
/// the struct is dropped.
pub struct RedisTest {
    pub redis_pool: Pool,
    key: String,
}

impl RedisTest {
    pub async fn new() -> Result<Self, TestError> {
        let redis_config = Config::from_url("redis://127.0.0.1:6379")?;
        let redis_pool = Pool::new(redis_config, None, None, None, 5)?;
        redis_pool.init().await?;

        Ok(RedisTest {
            redis_pool,
            key: Self::generate_unique_key(),
        })
    }

    /// Key unique to this test instance so tests can run in parallel
    pub fn key(&self) -> String {
        self.key.clone()
    }

    fn generate_unique_key() -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        let sequence = KEY_COUNTER.fetch_add(1, Ordering::Relaxed);

        format!(
            "test:{}:{}:{}:invoice:lock",
            std::process::id(),
            nanos,
            sequence
        )
    }
}

impl Drop for RedisTest {
    fn drop(&mut self) {
        // Spawn instead of blocking to avoid "runtime within runtime" errors
        let pool = self.redis_pool.clone();
        let key = self.key.clone();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let _: Result<(), fred::error::Error> = pool.del(&key).await;
            });
        }
    }
}
