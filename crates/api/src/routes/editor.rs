//! Route definitions for the `/editor` resource. All routes require a session.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::editor;
use crate::state::AppState;

/// Routes mounted at `/editor`.
///
/// ```text
/// GET  /defaults             -> defaults
/// GET  /devices              -> devices
/// POST /sections/{section}   -> update_section
/// POST /edit                 -> edit
/// POST /controls             -> controls
/// POST /preview              -> preview (text/html)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/defaults", get(editor::defaults))
        .route("/devices", get(editor::devices))
        .route("/sections/{section}", post(editor::update_section))
        .route("/edit", post(editor::edit))
        .route("/controls", post(editor::controls))
        .route("/preview", post(editor::preview))
}
