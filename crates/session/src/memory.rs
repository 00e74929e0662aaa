//! In-process session store for tests and single-node development.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::SessionError;
use crate::store::{SessionStore, SessionTtl};

#[derive(Debug, Clone)]
struct Entry {
    user_id: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Sessions in a `HashMap`. Expired entries are dropped when read and
/// swept on every `set`.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet dropped.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn set(&self, token: &str, user_id: &str, ttl_secs: u64) -> Result<(), SessionError> {
        let now = Instant::now();
        let entry = Entry {
            user_id: user_id.to_string(),
            expires_at: now + Duration::from_secs(ttl_secs),
        };
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| e.is_live(now));
        let swept = before - entries.len();
        if swept > 0 {
            tracing::debug!(swept, "Dropped expired sessions");
        }
        entries.insert(token.to_string(), entry);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<String>, SessionError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get(token) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.user_id.clone())),
            Some(_) => {
                entries.remove(token);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, token: &str) -> Result<(), SessionError> {
        self.entries.write().await.remove(token);
        Ok(())
    }

    async fn expire(&self, token: &str, ttl_secs: u64) -> Result<bool, SessionError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.get_mut(token).filter(|e| e.is_live(now)) else {
            entries.remove(token);
            return Ok(false);
        };
        if ttl_secs == 0 {
            // Same as Redis: a non-positive TTL deletes the key.
            entries.remove(token);
        } else {
            entry.expires_at = now + Duration::from_secs(ttl_secs);
        }
        Ok(true)
    }

    async fn ttl(&self, token: &str) -> Result<SessionTtl, SessionError> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(match entries.get(token) {
            Some(entry) if entry.is_live(now) => {
                SessionTtl::Expires(entry.expires_at.duration_since(now).as_secs())
            }
            _ => SessionTtl::Missing,
        })
    }

    async fn sessions_for_user(&self, user_id: &str) -> Result<Vec<String>, SessionError> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|(_, e)| e.is_live(now) && e.user_id == user_id)
            .map(|(token, _)| token.clone())
            .collect())
    }

    async fn delete_user_sessions(&self, user_id: &str) -> Result<usize, SessionError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let mut removed = 0;
        entries.retain(|_, e| {
            let owned = e.user_id == user_id;
            if owned && e.is_live(now) {
                removed += 1;
            }
            !owned
        });
        tracing::debug!(user_id, removed, "Deleted user sessions");
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), SessionError> {
        Ok(())
    }
}
