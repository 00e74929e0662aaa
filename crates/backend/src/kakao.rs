//! Kakao identity provider: resolve an access token to a Kakao user.

use std::time::Duration;

use serde::Deserialize;

use crate::error::BackendError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KakaoProfile {
    pub id: i64,
}

impl KakaoProfile {
    /// The id the backend knows this Kakao account by.
    pub fn provider_user_id(&self) -> String {
        self.id.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct KakaoClient {
    client: reqwest::Client,
    api_url: String,
}

impl KakaoClient {
    /// * `api_url` - normally `https://kapi.kakao.com`.
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url))
    }

    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `GET /v2/user/me` with the token as a bearer credential. A rejected
    /// token comes back as [`BackendError::Api`] with a 401 status.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<KakaoProfile, BackendError> {
        let response = self
            .client
            .get(format!("{}/v2/user/me", self.api_url))
            .bearer_auth(access_token)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded;charset=utf-8",
            )
            .send()
            .await?;

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

        response
            .json::<KakaoProfile>()
            .await
            .map_err(|e| BackendError::Decode(format!("kakao profile: {e}")))
    }
}
