pub mod apps;
pub mod auth;
pub mod editor;
pub mod health;
pub mod redirect;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signin/local                 local sign-in (public)
/// /auth/signup/local                 local sign-up (public)
/// /auth/kakao/callback               Kakao OAuth callback (public)
/// /auth/logout                       end the current session
/// /auth/logout/all                   end every session of the user
/// /auth/me                           current session
///
/// /editor/defaults                   default configuration
/// /editor/devices                    preview viewports
/// /editor/sections/{section}         merge a section patch
/// /editor/edit                       apply one form edit
/// /editor/controls                   form controls of a section
/// /editor/preview                    preview iframe markup
///
/// /apps                              create (POST)
/// /apps/{app_id}/config              load (GET), save (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/editor", editor::router())
        .nest("/apps", apps::router())
}
