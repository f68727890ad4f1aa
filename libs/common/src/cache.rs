//! Redis pool backing the shared session store
//!
//! Sessions live in Redis rather than process memory so that any server
//! instance can validate any live session. The pool exposes just the
//! primitives the session manager needs: write-with-expiry, read, and an
//! idempotent remove.

use redis::{AsyncCommands, Client};
use tracing::info;

use crate::error::StoreResult;

/// Redis connection configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379")
    pub url: String,
}

impl RedisConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL`: Redis connection URL (default: "redis://localhost:6379")
    pub fn from_env() -> StoreResult<Self> {
        let url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        Ok(RedisConfig { url })
    }
}

/// Redis connection handle shared across request handlers.
#[derive(Clone)]
pub struct RedisPool {
    client: Client,
}

impl RedisPool {
    /// Open a Redis client against the configured URL.
    pub async fn new(config: &RedisConfig) -> StoreResult<Self> {
        let client = Client::open(config.url.clone())?;
        info!("Redis client initialized with URL: {}", config.url);
        Ok(RedisPool { client })
    }

    async fn connection(&self) -> StoreResult<redis::aio::MultiplexedConnection> {
        let conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn)
    }

    /// Store a value under `key`, expiring after `ttl_seconds`.
    pub async fn put_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let _: () = conn.set_ex(key, value, ttl_seconds).await?;
        Ok(())
    }

    /// Fetch the value stored under `key`, if it exists and has not expired.
    pub async fn fetch(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    /// Remove `key`. Returns whether a key was actually deleted; removing
    /// an absent key is not an error.
    pub async fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut conn = self.connection().await?;
        let deleted: u64 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    /// Check Redis reachability with a PING.
    pub async fn health_check(&self) -> StoreResult<bool> {
        let mut conn = self.connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }
}
