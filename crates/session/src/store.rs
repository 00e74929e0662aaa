use async_trait::async_trait;

use crate::error::SessionError;

/// Namespace for session keys in a shared key-value store.
pub const SESSION_KEY_PREFIX: &str = "session:";

pub fn session_key(token: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{token}")
}

/// A fresh, unguessable session token.
pub fn generate_session_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Remaining lifetime of a session key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTtl {
    /// Expires in this many seconds.
    Expires(u64),
    /// Exists with no expiry.
    Persistent,
    /// No such session.
    Missing,
}

impl SessionTtl {
    /// Decode the Redis `TTL` reply (`-1` no expiry, `-2` missing).
    pub fn from_redis(reply: i64) -> Self {
        match reply {
            -2 => Self::Missing,
            -1 => Self::Persistent,
            secs => Self::Expires(u64::try_from(secs).unwrap_or(0)),
        }
    }
}

/// Token to user-id store with per-key expiry.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store `user_id` under `token`, replacing any previous value.
    async fn set(&self, token: &str, user_id: &str, ttl_secs: u64) -> Result<(), SessionError>;

    async fn get(&self, token: &str) -> Result<Option<String>, SessionError>;

    async fn delete(&self, token: &str) -> Result<(), SessionError>;

    /// Reset the TTL. Returns `false` when the session does not exist.
    async fn expire(&self, token: &str, ttl_secs: u64) -> Result<bool, SessionError>;

    async fn ttl(&self, token: &str) -> Result<SessionTtl, SessionError>;

    /// Tokens of every live session belonging to `user_id`.
    async fn sessions_for_user(&self, user_id: &str) -> Result<Vec<String>, SessionError>;

    /// Log `user_id` out everywhere. Returns the number of sessions removed.
    async fn delete_user_sessions(&self, user_id: &str) -> Result<usize, SessionError>;

    async fn ping(&self) -> Result<(), SessionError>;
}
