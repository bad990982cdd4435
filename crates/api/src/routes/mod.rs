pub mod health;
pub mod popups;
pub mod sessions;
pub mod themes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /themes                                          list catalog tokens
/// /themes/{id}                                     get one token
///
/// /popups/normalize                                normalize a raw set (POST)
/// /popups/resolve                                  resolve + lay out a set (POST)
///
/// /sessions                                        open a visitor session (POST)
/// /sessions/{id}/eligibility                       run the popup gate (POST)
/// /sessions/{id}/seen                              record a dismissal (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/themes", themes::router())
        .nest("/popups", popups::router())
        .nest("/sessions", sessions::router())
}
