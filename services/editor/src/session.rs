//! Session management backed by the shared Redis store
//!
//! A session binds an opaque token to a snapshot of the identity taken at
//! login. The snapshot lives in Redis so any server instance can validate
//! any live session. Expiry is a fixed TTL from creation; there is no
//! sliding renewal, and Redis key expiry is the cleanup ceiling.

use common::cache::RedisPool;
use common::error::StoreResult;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::SessionUser;

/// Lifetime of a session, fixed at creation. Matches the 24-hour cookie
/// window of the session cookie itself.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Name of the session cookie carrying the opaque token.
pub const SESSION_COOKIE: &str = "sid";

fn session_key(token: &str) -> String {
    format!("session:{}", token)
}

/// Manager for authenticated browser sessions.
#[derive(Clone)]
pub struct SessionManager {
    redis_pool: RedisPool,
    ttl_seconds: u64,
}

impl SessionManager {
    pub fn new(redis_pool: RedisPool, ttl_seconds: u64) -> Self {
        Self {
            redis_pool,
            ttl_seconds,
        }
    }

    /// Session TTL from the `SESSION_TTL_SECS` environment variable,
    /// defaulting to 24 hours.
    pub fn ttl_from_env() -> u64 {
        std::env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SESSION_TTL_SECS)
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Mint a new session bound to the given identity snapshot and return
    /// its opaque token.
    pub async fn create_session(&self, user: &SessionUser) -> StoreResult<String> {
        let token = Uuid::new_v4().to_string();
        let snapshot = serde_json::to_string(user)
            .map_err(|e| common::error::StoreError::Serialization(e.to_string()))?;

        self.redis_pool
            .put_with_expiry(&session_key(&token), &snapshot, self.ttl_seconds)
            .await?;

        info!("Created session for user: {}", user.id);
        Ok(token)
    }

    /// Resolve a token to its identity snapshot.
    ///
    /// A missing, expired, or corrupted session yields `None`: downstream
    /// authorization treats all of those uniformly as anonymous.
    pub async fn validate(&self, token: &str) -> StoreResult<Option<SessionUser>> {
        let Some(snapshot) = self.redis_pool.fetch(&session_key(token)).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<SessionUser>(&snapshot) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Discarding corrupted session snapshot: {}", e);
                Ok(None)
            }
        }
    }

    /// Destroy a session. Idempotent: destroying an absent session
    /// succeeds silently.
    pub async fn destroy(&self, token: &str) -> StoreResult<()> {
        let deleted = self.redis_pool.remove(&session_key(token)).await?;
        if deleted {
            info!("Destroyed session");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::cache::RedisConfig;
    use serial_test::serial;

    #[test]
    fn session_keys_are_namespaced() {
        assert_eq!(session_key("abc"), "session:abc");
    }

    #[test]
    #[serial]
    fn ttl_defaults_to_24_hours() {
        unsafe {
            std::env::remove_var("SESSION_TTL_SECS");
        }
        assert_eq!(SessionManager::ttl_from_env(), 86_400);
    }

    #[test]
    #[serial]
    fn ttl_honours_env_override() {
        unsafe {
            std::env::set_var("SESSION_TTL_SECS", "60");
        }
        assert_eq!(SessionManager::ttl_from_env(), 60);
        unsafe {
            std::env::remove_var("SESSION_TTL_SECS");
        }
    }

    async fn manager() -> SessionManager {
        let config = RedisConfig {
            url: "redis://localhost:6379".to_string(),
        };
        let pool = RedisPool::new(&config).await.unwrap();
        SessionManager::new(pool, 5)
    }

    fn snapshot() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            profile_image: None,
        }
    }

    // The tests below need a local Redis; run with `cargo test -- --ignored`.

    #[tokio::test]
    #[ignore]
    async fn create_then_validate_returns_snapshot() {
        let manager = manager().await;
        let user = snapshot();

        let token = manager.create_session(&user).await.unwrap();
        let resolved = manager.validate(&token).await.unwrap();
        assert_eq!(resolved, Some(user));
    }

    #[tokio::test]
    #[ignore]
    async fn unknown_token_is_anonymous() {
        let manager = manager().await;
        let resolved = manager.validate("no-such-token").await.unwrap();
        assert_eq!(resolved, None);
    }

    #[tokio::test]
    #[ignore]
    async fn corrupted_snapshot_is_anonymous() {
        let config = RedisConfig {
            url: "redis://localhost:6379".to_string(),
        };
        let pool = RedisPool::new(&config).await.unwrap();
        let manager = SessionManager::new(pool.clone(), 5);

        // A snapshot that is not valid JSON must behave like no session
        let token = "corrupted-snapshot-token";
        pool.put_with_expiry(&session_key(token), "not-json", 5)
            .await
            .unwrap();

        assert_eq!(manager.validate(token).await.unwrap(), None);

        pool.remove(&session_key(token)).await.unwrap();
    }

    #[tokio::test]
    #[ignore]
    async fn destroy_is_idempotent() {
        let manager = manager().await;
        let token = manager.create_session(&snapshot()).await.unwrap();

        manager.destroy(&token).await.unwrap();
        // Second destroy of the same token must also succeed
        manager.destroy(&token).await.unwrap();

        assert_eq!(manager.validate(&token).await.unwrap(), None);
    }
}
