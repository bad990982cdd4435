//! Handlers for popup set normalization and resolution.
//!
//! Used by the authoring tool: inputs are raw, possibly malformed popup
//! sets; outputs are what a renderer would receive.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use promo_core::carousel::CarouselState;
use promo_core::dispatch::{navigation_chrome, plan_slides, NavigationChrome, SlidePlan};
use promo_core::popup::{PopupItem, PopupSet};
use promo_core::safety::{normalize_popup_set_with, Normalized};
use promo_core::theme::{resolve_all, ResolvedDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /popups/normalize`.
#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub set: PopupSet,
    pub modified: bool,
    pub warnings: Vec<String>,
}

/// Body of `POST /popups/resolve`.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub popup_set: Value,
    /// Slide to mark as current, e.g. the one selected in the editor.
    #[serde(default)]
    pub current_index: usize,
}

/// A resolved slide and its place in the carousel.
#[derive(Debug, Serialize)]
pub struct SlideView {
    pub descriptor: ResolvedDescriptor,
    pub plan: SlidePlan,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub slides: Vec<SlideView>,
    pub chrome: NavigationChrome,
    pub modified: bool,
    pub warnings: Vec<String>,
}

/// Normalize `raw` with the server's URL policy, logging any repairs.
pub(crate) fn normalize(state: &AppState, raw: &Value) -> Normalized<PopupSet> {
    let normalized = normalize_popup_set_with(raw, &state.url_policy);
    if normalized.modified {
        tracing::warn!(
            warnings = normalized.warnings.len(),
            items = normalized.value.items.len(),
            "Popup set repaired during normalization"
        );
    }
    normalized
}

/// Resolve `items` and lay them out around `current_index`.
pub(crate) fn build_slides(
    state: &AppState,
    items: &[PopupItem],
    current_index: usize,
) -> (Vec<SlideView>, NavigationChrome) {
    let descriptors = resolve_all(items, &state.catalog);
    let carousel = CarouselState {
        current_index,
        is_animating: false,
    };
    let plans = plan_slides(&descriptors, carousel);
    let chrome = navigation_chrome(descriptors.len(), carousel);
    let slides = descriptors
        .into_iter()
        .zip(plans)
        .map(|(descriptor, plan)| SlideView { descriptor, plan })
        .collect();
    (slides, chrome)
}

/// POST /api/v1/popups/normalize
///
/// Always succeeds for any JSON body; malformed input becomes an empty or
/// repaired set and the repairs are listed in `warnings`.
pub async fn normalize_popup_set(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let Normalized {
        value,
        modified,
        warnings,
    } = normalize(&state, &raw);

    Ok(Json(DataResponse {
        data: NormalizeResponse {
            set: value,
            modified,
            warnings,
        },
    }))
}

/// POST /api/v1/popups/resolve
///
/// Resolve every item of the set, active or not, as the editor preview does.
pub async fn resolve_popup_set(
    State(state): State<AppState>,
    Json(input): Json<ResolveRequest>,
) -> AppResult<impl IntoResponse> {
    let normalized = normalize(&state, &input.popup_set);
    let items = &normalized.value.items;

    if !items.is_empty() && input.current_index >= items.len() {
        return Err(AppError::BadRequest(format!(
            "current_index {} is out of range for {} slides",
            input.current_index,
            items.len()
        )));
    }

    let (slides, chrome) = build_slides(&state, items, input.current_index);

    Ok(Json(DataResponse {
        data: ResolveResponse {
            slides,
            chrome,
            modified: normalized.modified,
            warnings: normalized.warnings,
        },
    }))
}
