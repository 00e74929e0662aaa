use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use aibuilder_api::config::ServerConfig;
use aibuilder_api::router::build_app_router;
use aibuilder_api::state::AppState;
use aibuilder_backend::{BackendClient, KakaoClient};
use aibuilder_session::{MemorySessionStore, RedisSessionStore, SessionStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aibuilder_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Session store ---
    let (sessions, redis): (Arc<dyn SessionStore>, Option<RedisSessionStore>) =
        if config.uses_memory_sessions() {
            tracing::warn!("Using in-memory session store; sessions are lost on restart");
            (Arc::new(MemorySessionStore::new()), None)
        } else {
            let store = RedisSessionStore::connect(&config.redis_url)
                .await
                .expect("Failed to connect to session store");
            (Arc::new(store.clone()), Some(store))
        };

    // --- Outbound clients ---
    let outbound_timeout = Duration::from_secs(config.backend_timeout_secs);
    let backend = BackendClient::new(&config.backend_url, outbound_timeout)
        .expect("Failed to build backend client");
    let kakao = KakaoClient::new(&config.kakao_api_url, outbound_timeout)
        .expect("Failed to build Kakao client");
    tracing::info!(backend_url = %config.backend_url, "Backend client ready");

    // --- App state ---
    let state = AppState {
        sessions,
        backend,
        kakao,
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_app_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    if let Some(store) = redis {
        store.disconnect();
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
