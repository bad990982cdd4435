//! Route definitions for visitor sessions.

use axum::routing::post;
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Visitor session routes mounted at `/sessions`.
///
/// ```text
/// POST /                     -> create_session
/// POST /{id}/eligibility     -> evaluate_eligibility
/// POST /{id}/seen            -> record_seen
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sessions::create_session))
        .route("/{id}/eligibility", post(sessions::evaluate_eligibility))
        .route("/{id}/seen", post(sessions::record_seen))
}
