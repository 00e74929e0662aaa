use std::sync::Arc;

use aibuilder_backend::{BackendClient, KakaoClient};
use aibuilder_session::SessionStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Session store (Redis in production, in-memory in tests).
    pub sessions: Arc<dyn SessionStore>,
    /// Business backend client.
    pub backend: BackendClient,
    /// Kakao identity provider client.
    pub kakao: KakaoClient,
    pub config: Arc<ServerConfig>,
}
