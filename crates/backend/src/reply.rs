//! Envelope of the backend's auth endpoints.
//!
//! The backend is not consistent about where it puts failure details:
//! local sign-in puts `code`/`message` at the top level, other endpoints
//! nest them under `error`. Likewise the user id is either `user.id` or
//! `data.user.id`, as a number or a string. [`BackendReply`] accepts all of
//! these and exposes one view.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct ReplyUser {
    #[serde(default)]
    id: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct ReplyData {
    #[serde(default)]
    user: Option<ReplyUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct ReplyError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BackendReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    user: Option<ReplyUser>,
    #[serde(default)]
    data: Option<ReplyData>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<ReplyError>,
}

impl BackendReply {
    /// Id of the signed-in user, rendered as a string.
    pub fn user_id(&self) -> Option<String> {
        let user = self
            .user
            .as_ref()
            .or_else(|| self.data.as_ref().and_then(|d| d.user.as_ref()))?;
        match &user.id {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code
            .as_deref()
            .or_else(|| self.error.as_ref().and_then(|e| e.code.as_deref()))
    }

    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or_else(|| self.error.as_ref().and_then(|e| e.message.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(value: serde_json::Value) -> BackendReply {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn local_success_numeric_id() {
        let r = reply(json!({ "success": true, "user": { "id": 42 } }));
        assert!(r.success);
        assert_eq!(r.user_id().as_deref(), Some("42"));
    }

    #[test]
    fn oauth_success_nested_id() {
        let r = reply(json!({ "success": true, "data": { "user": { "id": "u-1" } } }));
        assert_eq!(r.user_id().as_deref(), Some("u-1"));
    }

    #[test]
    fn top_level_error_fields() {
        let r = reply(json!({ "success": false, "code": "USER_NOT_FOUND", "message": "nope" }));
        assert!(!r.success);
        assert_eq!(r.code(), Some("USER_NOT_FOUND"));
        assert_eq!(r.message(), Some("nope"));
    }

    #[test]
    fn nested_error_fields() {
        let r = reply(json!({ "success": false, "error": { "code": "OAUTH_USER_NOT_FOUND", "message": "x" } }));
        assert_eq!(r.code(), Some("OAUTH_USER_NOT_FOUND"));
        assert_eq!(r.message(), Some("x"));
    }

    #[test]
    fn empty_body_is_failure_without_details() {
        let r = reply(json!({}));
        assert!(!r.success);
        assert_eq!(r.user_id(), None);
        assert_eq!(r.code(), None);
    }
}
