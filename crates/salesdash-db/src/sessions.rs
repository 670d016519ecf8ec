//! Redis-backed refresh-session registry
//!
//! One slot per user under `refresh:{user_id}`. `put` overwrites with a
//! fresh TTL; `rotate` is a Lua compare-and-swap so concurrent refreshes
//! with the same stale token have at most one winner. An expired key is
//! indistinguishable from one that was never set.

use async_trait::async_trait;
use deadpool_redis::{redis, Pool as RedisPool};
use std::time::Duration;
use uuid::Uuid;

use salesdash_auth::{AuthError, AuthResult, SessionRegistry};

const KEY_PREFIX: &str = "refresh:";

/// Swap the slot only when it still holds the expected token
const ROTATE_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    redis.call('SET', KEYS[1], ARGV[2], 'EX', ARGV[3])
    return 1
else
    return 0
end
"#;

/// Refresh-session store over a Redis pool
#[derive(Clone)]
pub struct RefreshSessionStore {
    pool: RedisPool,
}

impl RefreshSessionStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(user_id: Uuid) -> String {
        format!("{}{}", KEY_PREFIX, user_id)
    }

    async fn conn(&self) -> AuthResult<deadpool_redis::Connection> {
        self.pool.get().await.map_err(|e| {
            tracing::error!(error = %e, "Redis pool exhausted or unreachable");
            AuthError::Store(format!("Redis pool: {}", e))
        })
    }
}

#[async_trait]
impl SessionRegistry for RefreshSessionStore {
    async fn put(&self, user_id: Uuid, token: &str, ttl: Duration) -> AuthResult<()> {
        let mut conn = self.conn().await?;

        redis::cmd("SET")
            .arg(Self::key(user_id))
            .arg(token)
            .arg("EX")
            .arg(ttl.as_secs())
            .query_async::<_, ()>(&mut *conn)
            .await
            .map_err(|e| AuthError::Store(format!("Redis SET: {}", e)))?;

        Ok(())
    }

    async fn get(&self, user_id: Uuid) -> AuthResult<Option<String>> {
        let mut conn = self.conn().await?;

        let value: Option<String> = redis::cmd("GET")
            .arg(Self::key(user_id))
            .query_async(&mut *conn)
            .await
            .map_err(|e| AuthError::Store(format!("Redis GET: {}", e)))?;

        Ok(value)
    }

    async fn rotate(
        &self,
        user_id: Uuid,
        expected: &str,
        replacement: &str,
        ttl: Duration,
    ) -> AuthResult<bool> {
        let mut conn = self.conn().await?;

        let swapped: i64 = redis::cmd("EVAL")
            .arg(ROTATE_SCRIPT)
            .arg(1)
            .arg(Self::key(user_id))
            .arg(expected)
            .arg(replacement)
            .arg(ttl.as_secs())
            .query_async(&mut *conn)
            .await
            .map_err(|e| AuthError::Store(format!("Redis EVAL: {}", e)))?;

        Ok(swapped == 1)
    }
}
