//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signin/local      -> signin_local
/// POST /signup/local      -> signup_local
/// GET  /kakao/callback    -> kakao_callback
/// POST /logout            -> logout
/// POST /logout/all        -> logout_all (requires session)
/// GET  /me                -> me (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin/local", post(auth::signin_local))
        .route("/signup/local", post(auth::signup_local))
        .route("/kakao/callback", get(auth::kakao_callback))
        .route("/logout", post(auth::logout))
        .route("/logout/all", post(auth::logout_all))
        .route("/me", get(auth::me))
}
