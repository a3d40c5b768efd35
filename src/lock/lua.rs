//! Lua scripts for the Redis run lock

// Lua script to take the lock if nobody holds it
//
// KEYS[1]: lock key
// ARGV[1]: token identifying the holder
// ARGV[2]: time to live in milliseconds
//
// Returns:
//   1 if the lock was acquired
//   0 if the lock is held by someone else
pub static ACQUIRE_LOCK_SCRIPT: &str = r#"
local acquired = redis.call('SET', KEYS[1], ARGV[1], 'NX', 'PX', tonumber(ARGV[2]))
if acquired then
    return 1
end
return 0
"#;

// Lua script to release the lock only if it is still held with our token
// A holder whose lock expired must not delete the lock of the next holder
//
// KEYS[1]: lock key
// ARGV[1]: token identifying the holder
//
// Returns:
//   1 if the lock was released
//   0 if the lock expired or belongs to someone else
pub static RELEASE_LOCK_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
end
return 0
"#;
