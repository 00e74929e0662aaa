//! Session-cookie authentication extractor for Axum handlers.

use aibuilder_core::error::CoreError;
use aibuilder_core::types::UserId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::session_cookie::read_session_token;
use crate::state::AppState;

/// User resolved from the `session` cookie through the session store.
///
/// Every successful extraction slides the session's expiry forward by the
/// configured TTL.
///
/// ```ignore
/// async fn my_handler(user: SessionUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: UserId,
    pub token: String,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = read_session_token(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing session cookie".into()))
        })?;

        let user_id = state.sessions.get(&token).await?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        // The key can vanish between GET and EXPIRE; the request still
        // carries a session that was valid when it arrived.
        if !state
            .sessions
            .expire(&token, state.config.session_ttl_secs)
            .await?
        {
            tracing::debug!(user_id = %user_id, "Session expired while being refreshed");
        }

        Ok(SessionUser { user_id, token })
    }
}
