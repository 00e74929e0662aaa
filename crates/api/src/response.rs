//! Shared response envelope types for API handlers.
//!
//! Editor and app responses use a `{ "data": ... }` envelope. Auth
//! responses keep the `{ "success": ... }` shape the web client expects.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: devices }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "success": bool, ... }` body returned by the auth endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl AuthResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            session_token: None,
            message: None,
            code: None,
        }
    }

    pub fn failure(message: impl Into<String>, code: Option<String>) -> Self {
        Self {
            success: false,
            session_token: None,
            message: Some(message.into()),
            code,
        }
    }
}
