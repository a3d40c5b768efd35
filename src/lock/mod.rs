//! Lock ensuring at most one invoice job runs at a time.
//!
//! A single process uses [`RunLock::Local`]. Deployments running several instances against
//! the same database share a [`RunLock::Redis`] lock instead, the Redis key expires after a
//! TTL so a crashed holder doesn't block every later run.

mod lua;

use std::{sync::Arc, time::Duration};

use fred::prelude::*;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::Error;
use lua::{ACQUIRE_LOCK_SCRIPT, RELEASE_LOCK_SCRIPT};

pub const DEFAULT_LOCK_KEY: &str = "ore-ledger:invoice-job:lock";
/// Longer than any run is expected to take
pub const DEFAULT_LOCK_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Clone)]
pub enum RunLock {
    Local(Arc<Mutex<()>>),
    Redis {
        pool: Pool,
        key: String,
        ttl: Duration,
    },
}

/// Proof of holding the run lock, release it with [`RunLockGuard::release`]
pub enum RunLockGuard {
    Local(OwnedMutexGuard<()>),
    Redis {
        pool: Pool,
        key: String,
        token: String,
    },
}

impl RunLock {
    pub fn local() -> Self {
        Self::Local(Arc::new(Mutex::new(())))
    }

    pub fn redis(pool: Pool) -> Self {
        Self::redis_with_key(pool, DEFAULT_LOCK_KEY, DEFAULT_LOCK_TTL)
    }

    pub fn redis_with_key(pool: Pool, key: &str, ttl: Duration) -> Self {
        Self::Redis {
            pool,
            key: key.to_string(),
            ttl,
        }
    }

    /// Attempts to take the lock without waiting
    ///
    /// # Returns
    /// - `Ok(Some(guard))` - Lock acquired
    /// - `Ok(None)` - Lock is held elsewhere
    /// - `Err(Error::RedisError)` - Redis could not be reached
    pub async fn try_acquire(&self) -> Result<Option<RunLockGuard>, Error> {
        match self {
            Self::Local(mutex) => Ok(mutex
                .clone()
                .try_lock_owned()
                .ok()
                .map(RunLockGuard::Local)),
            Self::Redis { pool, key, ttl } => {
                let token = generate_token();

                let acquired: i64 = pool
                    .eval(
                        ACQUIRE_LOCK_SCRIPT,
                        vec![key],
                        vec![token.clone(), ttl.as_millis().to_string()],
                    )
                    .await?;

                if acquired != 1 {
                    return Ok(None);
                }

                Ok(Some(RunLockGuard::Redis {
                    pool: pool.clone(),
                    key: key.clone(),
                    token,
                }))
            }
        }
    }
}

impl RunLockGuard {
    pub async fn release(self) -> Result<(), Error> {
        match self {
            Self::Local(guard) => {
                drop(guard);
                Ok(())
            }
            Self::Redis { pool, key, token } => {
                let released: i64 = pool
                    .eval(RELEASE_LOCK_SCRIPT, vec![&key], vec![token])
                    .await?;

                if released == 0 {
                    tracing::warn!("Run lock {} expired before it was released", key);
                }

                Ok(())
            }
        }
    }
}

/// Random token identifying a single acquisition
fn generate_token() -> String {
    format!("{}:{:016x}", std::process::id(), rand::random::<u64>())
}
