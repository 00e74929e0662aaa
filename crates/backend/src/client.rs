//! REST client for the business backend.

use std::time::Duration;

use aibuilder_core::editor::EditorConfig;
use serde::Deserialize;

use crate::error::BackendError;
use crate::reply::BackendReply;

/// Header carrying the acting user's id on app endpoints.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Response of `POST /api/v1/apps`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedApp {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
}

/// HTTP client for the backend service.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// * `base_url` - e.g. `http://localhost:8000`, without a trailing slash.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- auth ----

    pub async fn signin_local(&self, email: &str, password: &str) -> Result<BackendReply, BackendError> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.post_auth("/api/v1/auth/signin/local", &body).await
    }

    pub async fn signup_local(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<BackendReply, BackendError> {
        let mut body = serde_json::json!({ "email": email, "password": password });
        if let Some(name) = name {
            body["name"] = serde_json::Value::from(name);
        }
        self.post_auth("/api/v1/auth/signup/local", &body).await
    }

    pub async fn signin_oauth(&self, provider: &str, provider_user_id: &str) -> Result<BackendReply, BackendError> {
        let body = serde_json::json!({ "provider": provider, "provider_user_id": provider_user_id });
        self.post_auth("/api/v1/auth/signin/oauth", &body).await
    }

    pub async fn signup_oauth(&self, provider: &str, provider_user_id: &str) -> Result<BackendReply, BackendError> {
        let body = serde_json::json!({ "provider": provider, "provider_user_id": provider_user_id });
        self.post_auth("/api/v1/auth/signup/oauth", &body).await
    }

    // ---- apps ----

    /// Saved configuration of an app. `Ok(None)` when the backend has no
    /// such app.
    pub async fn get_app_config(&self, user_id: &str, app_id: &str) -> Result<Option<EditorConfig>, BackendError> {
        let response = self
            .client
            .get(self.url(&format!("/api/v1/apps/{app_id}/config")))
            .header(USER_ID_HEADER, user_id)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::ensure_success(response).await?;
        let config = response
            .json::<EditorConfig>()
            .await
            .map_err(|e| BackendError::Decode(format!("app config: {e}")))?;
        Ok(Some(config))
    }

    /// Create an app from `config`. Returns the backend-assigned id.
    pub async fn create_app(&self, user_id: &str, config: &EditorConfig) -> Result<String, BackendError> {
        let response = self
            .client
            .post(self.url("/api/v1/apps"))
            .header(USER_ID_HEADER, user_id)
            .json(config)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let created = response
            .json::<CreatedApp>()
            .await
            .map_err(|e| BackendError::Decode(format!("created app: {e}")))?;
        Ok(created.id)
    }

    pub async fn update_app(&self, user_id: &str, app_id: &str, config: &EditorConfig) -> Result<(), BackendError> {
        let response = self
            .client
            .put(self.url(&format!("/api/v1/apps/{app_id}/config")))
            .header(USER_ID_HEADER, user_id)
            .json(config)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Auth endpoints report failures in the body, often with a 4xx
    /// status, so the body is decoded whatever the status. Only a body that
    /// is not a reply envelope is an error.
    async fn post_auth(&self, path: &str, body: &serde_json::Value) -> Result<BackendReply, BackendError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<BackendReply>(&text) {
            Ok(reply) => {
                if !reply.success {
                    tracing::debug!(
                        path,
                        status = status.as_u16(),
                        code = reply.code().unwrap_or("-"),
                        "Backend refused auth request"
                    );
                }
                Ok(reply)
            }
            Err(_) if !status.is_success() => Err(BackendError::Api {
                status: status.as_u16(),
                body: text,
            }),
            Err(e) => Err(BackendError::Decode(format!("auth reply: {e}"))),
        }
    }

    /// Pass a 2xx response through; turn anything else into
    /// [`BackendError::Api`] with the body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("expected string or number id, got {other}"))),
    }
}
