//! Handlers for the `/auth` resource (local sign-in/up, Kakao callback,
//! logout, current session).

use aibuilder_backend::BackendError;
use aibuilder_core::auth::{
    classify_oauth_failure, generic_failure_message, local_signin_failure, AuthFlow,
    KAKAO_PROVIDER,
};
use aibuilder_core::error::CoreError;
use aibuilder_core::types::UserId;
use aibuilder_session::{generate_session_token, SessionTtl};
use axum::extract::{Query, State};
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::session::SessionUser;
use crate::response::{AuthResponse, DataResponse};
use crate::session_cookie::{clear_session_cookie, read_session_token, session_cookie};
use crate::state::AppState;

const CREDENTIALS_REQUIRED: &str = "Email and password are required";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signin/local`.
///
/// Missing fields deserialize as empty strings so they fail validation
/// with a 400 instead of being rejected by the JSON extractor.
#[derive(Debug, Deserialize, Validate)]
pub struct LocalSigninRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for `POST /auth/signup/local`.
#[derive(Debug, Deserialize, Validate)]
pub struct LocalSignupRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Query string of `GET /auth/kakao/callback`.
#[derive(Debug, Deserialize)]
pub struct KakaoCallbackQuery {
    pub access_token: Option<String>,
    #[serde(rename = "type")]
    pub flow: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub user_id: UserId,
    /// Seconds until the session expires; `None` for a session without expiry.
    pub expires_in_secs: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutAllResponse {
    pub success: bool,
    pub sessions_removed: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signin/local
///
/// Delegate the credential check to the backend. On success a session is
/// stored, the cookie is set and the token is also returned in the body.
pub async fn signin_local(
    State(state): State<AppState>,
    Json(input): Json<LocalSigninRequest>,
) -> AppResult<Response> {
    if input.validate().is_err() {
        return Ok(auth_failure(StatusCode::BAD_REQUEST, CREDENTIALS_REQUIRED, None));
    }

    let reply = state.backend.signin_local(&input.email, &input.password).await?;

    if !reply.success {
        let failure = local_signin_failure(reply.code(), reply.message());
        tracing::info!(status = failure.status, code = ?failure.code, "Local sign-in refused");
        let status = StatusCode::from_u16(failure.status).unwrap_or(StatusCode::BAD_REQUEST);
        return Ok(auth_failure(status, failure.message, failure.code));
    }

    let user_id = reply
        .user_id()
        .ok_or_else(|| AppError::InternalError("Sign-in reply carried no user id".into()))?;
    let token = start_session(&state, &user_id).await?;
    tracing::info!(user_id = %user_id, "Local sign-in succeeded");

    let body = AuthResponse {
        session_token: Some(token.clone()),
        ..AuthResponse::ok()
    };
    Ok((
        [(SET_COOKIE, login_cookie(&state, &token))],
        Json(body),
    )
        .into_response())
}

/// POST /api/v1/auth/signup/local
pub async fn signup_local(
    State(state): State<AppState>,
    Json(input): Json<LocalSignupRequest>,
) -> AppResult<Response> {
    if input.validate().is_err() {
        return Ok(auth_failure(StatusCode::BAD_REQUEST, CREDENTIALS_REQUIRED, None));
    }

    let name = input.name.as_deref().filter(|n| !n.trim().is_empty());
    let reply = state
        .backend
        .signup_local(&input.email, &input.password, name)
        .await?;

    if reply.success {
        tracing::info!("Local sign-up succeeded");
        return Ok(Json(AuthResponse::ok()).into_response());
    }

    let message = match reply.message() {
        Some(m) if !m.trim().is_empty() => m.to_string(),
        _ => generic_failure_message(Some("회원가입에 실패했습니다."), reply.code()),
    };
    tracing::info!(code = ?reply.code(), "Local sign-up refused");
    Ok(auth_failure(
        StatusCode::BAD_REQUEST,
        message,
        reply.code().map(str::to_string),
    ))
}

/// GET /api/v1/auth/kakao/callback?access_token=..&type=signin|signup
///
/// Resolve the Kakao account, then sign in or sign up with the backend.
/// Success sets the cookie and redirects to the dashboard. Failures the
/// user can act on redirect to the interstitial page.
pub async fn kakao_callback(
    State(state): State<AppState>,
    Query(query): Query<KakaoCallbackQuery>,
) -> AppResult<Response> {
    let Some(access_token) = query.access_token.filter(|t| !t.is_empty()) else {
        return Ok(auth_failure(StatusCode::BAD_REQUEST, "Missing access_token", None));
    };

    let flow = match query.flow.unwrap_or_default().parse::<AuthFlow>() {
        Ok(flow) => flow,
        Err(e) => {
            let message = match e {
                CoreError::Validation(msg) => msg,
                other => other.to_string(),
            };
            return Ok(auth_failure(StatusCode::BAD_REQUEST, message, None));
        }
    };

    let profile = match state.kakao.fetch_profile(&access_token).await {
        Ok(profile) => profile,
        Err(BackendError::Api { status, .. }) => {
            tracing::info!(status, "Kakao rejected access token");
            return Ok(auth_failure(StatusCode::UNAUTHORIZED, "Invalid access token", None));
        }
        Err(e) => return Err(e.into()),
    };
    let provider_user_id = profile.provider_user_id();

    let reply = match flow {
        AuthFlow::Signin => state.backend.signin_oauth(KAKAO_PROVIDER, &provider_user_id).await?,
        AuthFlow::Signup => state.backend.signup_oauth(KAKAO_PROVIDER, &provider_user_id).await?,
    };

    if !reply.success {
        let code = reply.code().unwrap_or_default();
        if let Some(interstitial) = classify_oauth_failure(flow, code) {
            tracing::info!(%flow, code, goto = %interstitial.goto, "Kakao auth redirected to interstitial");
            return Ok((StatusCode::FOUND, [(LOCATION, interstitial.location())]).into_response());
        }
        tracing::warn!(%flow, code, "Kakao auth failed");
        return Ok(auth_failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            generic_failure_message(reply.message(), reply.code()),
            None,
        ));
    }

    let user_id = reply
        .user_id()
        .ok_or_else(|| AppError::InternalError("OAuth reply carried no user id".into()))?;
    let token = start_session(&state, &user_id).await?;
    tracing::info!(user_id = %user_id, %flow, "Kakao auth succeeded");

    Ok((
        StatusCode::FOUND,
        [
            (LOCATION, state.config.dashboard_path.clone()),
            (SET_COOKIE, login_cookie(&state, &token)),
        ],
    )
        .into_response())
}

/// POST /api/v1/auth/logout
///
/// Drops the session behind the cookie, if any, and always clears the
/// cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    if let Some(token) = read_session_token(&headers) {
        state.sessions.delete(&token).await?;
        tracing::info!("Session ended");
    }
    Ok((
        [(SET_COOKIE, clear_session_cookie(state.config.secure_cookies))],
        Json(AuthResponse::ok()),
    )
        .into_response())
}

/// POST /api/v1/auth/logout/all
///
/// Ends every session of the current user, on every device.
pub async fn logout_all(State(state): State<AppState>, user: SessionUser) -> AppResult<Response> {
    let removed = state.sessions.delete_user_sessions(&user.user_id).await?;
    tracing::info!(user_id = %user.user_id, removed, "All sessions ended");
    Ok((
        [(SET_COOKIE, clear_session_cookie(state.config.secure_cookies))],
        Json(LogoutAllResponse {
            success: true,
            sessions_removed: removed,
        }),
    )
        .into_response())
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: SessionUser,
) -> AppResult<Json<DataResponse<SessionInfo>>> {
    let expires_in_secs = match state.sessions.ttl(&user.token).await? {
        SessionTtl::Expires(secs) => Some(secs),
        SessionTtl::Persistent => None,
        SessionTtl::Missing => {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Session expired".into(),
            )))
        }
    };
    Ok(Json(DataResponse {
        data: SessionInfo {
            user_id: user.user_id,
            expires_in_secs,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn start_session(state: &AppState, user_id: &str) -> AppResult<String> {
    let token = generate_session_token();
    state
        .sessions
        .set(&token, user_id, state.config.session_ttl_secs)
        .await?;
    Ok(token)
}

fn login_cookie(state: &AppState, token: &str) -> String {
    session_cookie(
        token,
        state.config.session_ttl_secs,
        state.config.secure_cookies,
    )
}

fn auth_failure(status: StatusCode, message: impl Into<String>, code: Option<String>) -> Response {
    (status, Json(AuthResponse::failure(message, code))).into_response()
}
