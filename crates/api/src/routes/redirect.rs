use axum::routing::get;
use axum::Router;

use crate::handlers::redirect;
use crate::state::AppState;

/// Root-level `/redirect` interstitial page.
pub fn router() -> Router<AppState> {
    Router::new().route("/redirect", get(redirect::interstitial))
}
