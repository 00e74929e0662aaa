//! Route definitions for the `/apps` resource. All routes require a session.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::apps;
use crate::state::AppState;

/// Routes mounted at `/apps`.
///
/// ```text
/// POST /                 -> create
/// GET  /{app_id}/config  -> get_config
/// PUT  /{app_id}/config  -> update_config
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(apps::create))
        .route(
            "/{app_id}/config",
            get(apps::get_config).put(apps::update_config),
        )
}
