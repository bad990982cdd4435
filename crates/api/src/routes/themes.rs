//! Route definitions for the theme catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::themes;
use crate::state::AppState;

/// Theme catalog routes mounted at `/themes`.
///
/// ```text
/// GET /          -> list_themes
/// GET /{id}      -> get_theme
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(themes::list_themes))
        .route("/{id}", get(themes::get_theme))
}
