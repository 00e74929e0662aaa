//! Session token store.
//!
//! A session maps an opaque token (the `session` cookie value) to a backend
//! user id, with a TTL. The store is constructed once at startup and
//! handed to request handlers through application state.

pub mod error;
pub mod memory;
pub mod redis_store;
pub mod store;

pub use error::SessionError;
pub use memory::MemorySessionStore;
pub use redis_store::RedisSessionStore;
pub use store::{generate_session_token, session_key, SessionStore, SessionTtl, SESSION_KEY_PREFIX};
