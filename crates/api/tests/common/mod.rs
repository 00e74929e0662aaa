//! Shared fixtures for the HTTP integration tests.
//!
//! Every test gets the production router (same middleware stack as
//! `main.rs`) over an in-memory session store, with the business backend
//! and the Kakao API replaced by wiremock servers.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use aibuilder_api::config::{ServerConfig, DEFAULT_SESSION_TTL_SECS};
use aibuilder_api::router::build_app_router;
use aibuilder_api::state::AppState;
use aibuilder_backend::{BackendClient, KakaoClient};
use aibuilder_session::{generate_session_token, MemorySessionStore, SessionStore};
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::MockServer;

pub const TEST_ORIGIN: &str = "http://localhost:3000";

pub struct TestApp {
    pub router: Router,
    pub sessions: Arc<MemorySessionStore>,
    pub backend: MockServer,
    pub kakao: MockServer,
}

impl TestApp {
    /// Store a session for `user_id` and return its token.
    pub async fn login(&self, user_id: &str) -> String {
        let token = generate_session_token();
        self.sessions
            .set(&token, user_id, DEFAULT_SESSION_TTL_SECS)
            .await
            .unwrap();
        token
    }
}

/// Build a test `ServerConfig` pointing at the mock servers.
pub fn test_config(backend_url: &str, kakao_api_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        backend_url: backend_url.to_string(),
        backend_timeout_secs: 5,
        kakao_api_url: kakao_api_url.to_string(),
        redis_url: "memory://".to_string(),
        secure_cookies: false,
        session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        dashboard_path: "/dashboard".to_string(),
    }
}

pub async fn spawn_app() -> TestApp {
    let backend = MockServer::start().await;
    let kakao = MockServer::start().await;
    let config = test_config(&backend.uri(), &kakao.uri());

    let sessions = Arc::new(MemorySessionStore::new());
    let state = AppState {
        sessions: sessions.clone() as Arc<dyn SessionStore>,
        backend: BackendClient::new(&config.backend_url, Duration::from_secs(5)).unwrap(),
        kakao: KakaoClient::new(&config.kakao_api_url, Duration::from_secs(5)).unwrap(),
        config: Arc::new(config),
    };

    TestApp {
        router: build_app_router(state),
        sessions,
        backend,
        kakao,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_with_session(app: &TestApp, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(header::COOKIE, format!("session={token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &TestApp, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body, None)).await
}

pub async fn post_json_with_session(
    app: &TestApp,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body, Some(token))).await
}

pub async fn put_json_with_session(
    app: &TestApp,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, body, Some(token))).await
}

fn json_request(
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("session={token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn header_str<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}
