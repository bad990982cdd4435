//! Handlers for the theme catalog.
//!
//! Read-only: the catalog is built once at startup.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/themes
///
/// List every theme token in catalog order. The first entry is the
/// fallback applied to items naming an unknown theme.
pub async fn list_themes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: state.catalog.tokens().to_vec(),
    }))
}

/// GET /api/v1/themes/{id}
///
/// Exact lookup; unknown ids are a 404 rather than the fallback token.
pub async fn get_theme(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let token = state.catalog.find(&id)?.clone();
    Ok(Json(DataResponse { data: token }))
}
