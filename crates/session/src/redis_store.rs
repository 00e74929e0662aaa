//! Redis-backed session store on a `deadpool-redis` pool.

use async_trait::async_trait;
use deadpool_redis::{Config as PoolConfig, Connection, Pool, Runtime};
use redis::AsyncCommands;

use crate::error::SessionError;
use crate::store::{session_key, SessionStore, SessionTtl, SESSION_KEY_PREFIX};

/// Keys examined per `SCAN` round trip.
const SCAN_BATCH_SIZE: usize = 100;

#[derive(Clone)]
pub struct RedisSessionStore {
    pool: Pool,
}

impl RedisSessionStore {
    /// Build the pool and verify the server answers `PING`.
    pub async fn connect(url: &str) -> Result<Self, SessionError> {
        let pool = PoolConfig::from_url(url).create_pool(Some(Runtime::Tokio1))?;
        let store = Self { pool };
        store.ping().await?;
        tracing::info!("Session store connected");
        Ok(store)
    }

    /// Close the pool. Later calls fail with a pool error.
    pub fn disconnect(&self) {
        self.pool.close();
        tracing::info!("Session store disconnected");
    }

    async fn conn(&self) -> Result<Connection, SessionError> {
        Ok(self.pool.get().await?)
    }

    /// All session keys, walked with `SCAN` so the server is never blocked.
    async fn scan_session_keys(&self, conn: &mut Connection) -> Result<Vec<String>, SessionError> {
        let pattern = format!("{SESSION_KEY_PREFIX}*");
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH_SIZE)
                .query_async(&mut *conn)
                .await?;
            keys.extend(batch);
            cursor = next;
            if cursor == 0 {
                break;
            }
        }
        Ok(keys)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set(&self, token: &str, user_id: &str, ttl_secs: u64) -> Result<(), SessionError> {
        let mut conn = self.conn().await?;
        let _: () = conn.set_ex(session_key(token), user_id, ttl_secs).await?;
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<String>, SessionError> {
        let mut conn = self.conn().await?;
        Ok(conn.get(session_key(token)).await?)
    }

    async fn delete(&self, token: &str) -> Result<(), SessionError> {
        let mut conn = self.conn().await?;
        let _: () = conn.del(session_key(token)).await?;
        Ok(())
    }

    async fn expire(&self, token: &str, ttl_secs: u64) -> Result<bool, SessionError> {
        let mut conn = self.conn().await?;
        let secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Ok(conn.expire(session_key(token), secs).await?)
    }

    async fn ttl(&self, token: &str) -> Result<SessionTtl, SessionError> {
        let mut conn = self.conn().await?;
        let reply: i64 = conn.ttl(session_key(token)).await?;
        Ok(SessionTtl::from_redis(reply))
    }

    async fn sessions_for_user(&self, user_id: &str) -> Result<Vec<String>, SessionError> {
        let mut conn = self.conn().await?;
        let keys = self.scan_session_keys(&mut conn).await?;

        let mut tokens = Vec::new();
        for key in keys {
            // A key can expire between SCAN and GET; that reads as None.
            let owner: Option<String> = conn.get(&key).await?;
            if owner.as_deref() == Some(user_id) {
                if let Some(token) = key.strip_prefix(SESSION_KEY_PREFIX) {
                    tokens.push(token.to_string());
                }
            }
        }
        Ok(tokens)
    }

    async fn delete_user_sessions(&self, user_id: &str) -> Result<usize, SessionError> {
        let tokens = self.sessions_for_user(user_id).await?;
        if tokens.is_empty() {
            return Ok(0);
        }
        let keys: Vec<String> = tokens.iter().map(|t| session_key(t)).collect();
        let mut conn = self.conn().await?;
        let removed: usize = conn.del(keys).await?;
        tracing::info!(user_id, removed, "Deleted user sessions");
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), SessionError> {
        let mut conn = self.conn().await?;
        let _: String = redis::cmd("PING").query_async(&mut *conn).await?;
        Ok(())
    }
}
