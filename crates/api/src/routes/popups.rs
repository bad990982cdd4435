//! Route definitions for popup set processing.

use axum::routing::post;
use axum::Router;

use crate::handlers::popups;
use crate::state::AppState;

/// Popup processing routes mounted at `/popups`.
///
/// ```text
/// POST /normalize    -> normalize_popup_set
/// POST /resolve      -> resolve_popup_set
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/normalize", post(popups::normalize_popup_set))
        .route("/resolve", post(popups::resolve_popup_set))
}
