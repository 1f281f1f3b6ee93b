//! Redis-backed session store
//!
//! One session record per user, keyed `session:{user_id}`, holding the
//! currently valid refresh token. The key carries a TTL matching the
//! refresh token expiry, so Redis expires stale sessions on its own. A
//! missing key means "signed out", not an error.

use anyhow::Result;
use redis::{AsyncCommands, Client};
use tracing::info;
use uuid::Uuid;

/// Configuration for the session store
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379")
    pub url: String,
    /// Session lifetime in seconds
    pub ttl_seconds: u64,
}

impl SessionConfig {
    /// Create a new SessionConfig from environment variables
    ///
    /// # Environment Variables
    /// - `REDIS_URL`: Redis connection URL (default: "redis://localhost:6379")
    /// - `SESSION_TTL_SECONDS`: Session lifetime (default: 604800, 7 days)
    pub fn from_env() -> Result<Self> {
        let url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let ttl_seconds = std::env::var("SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()
            .unwrap_or(604800);

        Ok(SessionConfig { url, ttl_seconds })
    }
}

/// Session store for user sessions in Redis
#[derive(Clone)]
pub struct SessionStore {
    client: Client,
    ttl_seconds: u64,
}

impl SessionStore {
    /// Initialize a new session store
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let client = Client::open(config.url.clone())?;
        info!("Session store initialized with URL: {}", config.url);
        Ok(SessionStore {
            client,
            ttl_seconds: config.ttl_seconds,
        })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        let conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn)
    }

    fn key(user_id: Uuid) -> String {
        format!("session:{}", user_id)
    }

    /// Create or replace the session for a user
    pub async fn create(&self, user_id: Uuid, refresh_token: &str) -> Result<()> {
        info!("Creating session for user: {}", user_id);

        let mut conn = self.connection().await?;
        let _: () = conn
            .set_ex(Self::key(user_id), refresh_token, self.ttl_seconds)
            .await?;

        Ok(())
    }

    /// Get the refresh token held for a user, if a session exists
    pub async fn get(&self, user_id: Uuid) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let token: Option<String> = conn.get(Self::key(user_id)).await?;
        Ok(token)
    }

    /// Delete the session for a user
    pub async fn delete(&self, user_id: Uuid) -> Result<()> {
        info!("Deleting session for user: {}", user_id);

        let mut conn = self.connection().await?;
        let _: u64 = conn.del(Self::key(user_id)).await?;

        Ok(())
    }

    /// Check whether the given refresh token matches the stored session
    pub async fn is_valid(&self, user_id: Uuid, refresh_token: &str) -> Result<bool> {
        let stored = self.get(user_id).await?;

        match stored {
            Some(token) => Ok(token == refresh_token),
            None => Ok(false),
        }
    }

    /// Check if Redis is reachable
    pub async fn health_check(&self) -> Result<bool> {
        let mut conn = self.connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn store() -> SessionStore {
        SessionStore::new(&SessionConfig {
            url: "redis://localhost:6379".to_string(),
            ttl_seconds: 60,
        })
        .expect("Failed to create session store")
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running Redis instance"]
    async fn create_get_delete_round_trip() -> Result<()> {
        let store = store();
        let user_id = Uuid::new_v4();

        store.create(user_id, "refresh-token").await?;
        assert_eq!(store.get(user_id).await?, Some("refresh-token".to_string()));
        assert!(store.is_valid(user_id, "refresh-token").await?);
        assert!(!store.is_valid(user_id, "another-token").await?);

        store.delete(user_id).await?;
        assert_eq!(store.get(user_id).await?, None);
        assert!(!store.is_valid(user_id, "refresh-token").await?);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running Redis instance"]
    async fn missing_session_reads_as_signed_out() -> Result<()> {
        let store = store();
        assert_eq!(store.get(Uuid::new_v4()).await?, None);
        Ok(())
    }
}
