//! Tests for the Redis run lock, requires Redis on 127.0.0.1:6379.

use std::time::Duration;

use fred::prelude::*;
use ore_ledger::lock::RunLock;
use ore_ledger_test_utils::{prelude::*, redis::RedisTest};

/// Expect a held lock to refuse a second acquisition until released
#[tokio::test]
async fn lock_is_exclusive() -> Result<(), TestError> {
    let redis = RedisTest::new().await?;
    let lock = RunLock::redis_with_key(
        redis.redis_pool.clone(),
        &redis.key(),
        Duration::from_secs(60),
    );

    let guard = lock.try_acquire().await.unwrap();
    let contended = lock.try_acquire().await.unwrap();

    assert!(guard.is_some());
    assert!(contended.is_none());

    guard.unwrap().release().await.unwrap();

    let reacquired = lock.try_acquire().await.unwrap();
    assert!(reacquired.is_some());
    reacquired.unwrap().release().await.unwrap();

    Ok(())
}

/// Expect a lock to become available again once its TTL expires
#[tokio::test]
async fn lock_expires_after_ttl() -> Result<(), TestError> {
    let redis = RedisTest::new().await?;
    let lock = RunLock::redis_with_key(
        redis.redis_pool.clone(),
        &redis.key(),
        Duration::from_millis(100),
    );

    let guard = lock.try_acquire().await.unwrap();
    assert!(guard.is_some());

    tokio::time::sleep(Duration::from_millis(250)).await;

    let after_expiry = lock.try_acquire().await.unwrap();
    assert!(after_expiry.is_some());

    Ok(())
}

/// Expect releasing an expired lock to leave the next holder's lock in place
#[tokio::test]
async fn stale_release_keeps_new_holder() -> Result<(), TestError> {
    let redis = RedisTest::new().await?;
    let lock = RunLock::redis_with_key(
        redis.redis_pool.clone(),
        &redis.key(),
        Duration::from_millis(100),
    );

    let stale = lock.try_acquire().await.unwrap().unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;
    let current = lock.try_acquire().await.unwrap();
    assert!(current.is_some());

    stale.release().await.unwrap();

    let holder: Option<String> = redis.redis_pool.get(redis.key()).await?;
    assert!(holder.is_some());

    Ok(())
}
