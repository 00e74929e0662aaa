/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Business backend base URL.
    pub backend_url: String,
    /// Timeout for outbound HTTP calls in seconds (default: `10`).
    pub backend_timeout_secs: u64,
    /// Kakao API base URL.
    pub kakao_api_url: String,
    /// Session store URL. `memory://` selects the in-process store.
    pub redis_url: String,
    /// Add `Secure` to the session cookie (`APP_ENV=production`).
    pub secure_cookies: bool,
    /// Session lifetime in seconds (default: 30 days).
    pub session_ttl_secs: u64,
    /// Where a successful OAuth login lands.
    pub dashboard_path: String,
}

/// Thirty days.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `BACKEND_URL`           | `http://localhost:8000`    |
    /// | `BACKEND_TIMEOUT_SECS`  | `10`                       |
    /// | `KAKAO_API_URL`         | `https://kapi.kakao.com`   |
    /// | `REDIS_URL`             | `redis://localhost:6379`   |
    /// | `APP_ENV`               | `development`              |
    /// | `SESSION_TTL_SECS`      | `2592000`                  |
    /// | `DASHBOARD_PATH`        | `/dashboard`               |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let backend_url =
            std::env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:8000".into());

        let backend_timeout_secs: u64 = std::env::var("BACKEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("BACKEND_TIMEOUT_SECS must be a valid u64");

        let kakao_api_url =
            std::env::var("KAKAO_API_URL").unwrap_or_else(|_| "https://kapi.kakao.com".into());

        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".into());

        let secure_cookies = std::env::var("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let session_ttl_secs: u64 = std::env::var("SESSION_TTL_SECS")
            .map(|v| v.parse().expect("SESSION_TTL_SECS must be a valid u64"))
            .unwrap_or(DEFAULT_SESSION_TTL_SECS);

        let dashboard_path =
            std::env::var("DASHBOARD_PATH").unwrap_or_else(|_| "/dashboard".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            backend_url,
            backend_timeout_secs,
            kakao_api_url,
            redis_url,
            secure_cookies,
            session_ttl_secs,
            dashboard_path,
        }
    }

    /// `REDIS_URL=memory://` keeps sessions in process (single node only).
    pub fn uses_memory_sessions(&self) -> bool {
        self.redis_url.starts_with("memory://")
    }
}
