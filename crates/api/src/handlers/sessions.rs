//! Handlers for visitor sessions and the once-per-session popup gate.
//!
//! The browser calls `eligibility` on each page view, shows the returned
//! slides after `delay_ms`, and calls `seen` when the visitor dismisses them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use promo_core::dispatch::{navigation_chrome, NavigationChrome};
use promo_core::eligibility::{
    compute_eligible, is_session_key, DismissReason, DisplayMode, PageContext, PRESENT_DELAY_MS,
};
use promo_core::error::CoreError;
use promo_core::popup::{DeviceClass, TargetPage};
use promo_core::types::Millis;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::popups::{build_slides, normalize, SlideView};
use crate::response::DataResponse;
use crate::sessions::SeenWrite;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PageContextInput {
    pub page: String,
    #[serde(default)]
    pub device: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EligibilityRequest {
    pub popup_set: Value,
    /// `live` (default) or `preview`.
    #[serde(default)]
    pub mode: Option<String>,
    pub context: PageContextInput,
}

#[derive(Debug, Serialize)]
pub struct EligibilityResponse {
    /// Whether the client should present the popup.
    pub present: bool,
    /// Why nothing is presented; absent when `present` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DismissReason>,
    /// Key to send back to `seen` once the visitor dismisses the popup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_key: Option<String>,
    /// How long to wait after page load before presenting.
    pub delay_ms: Millis,
    pub slides: Vec<SlideView>,
    pub chrome: NavigationChrome,
    pub warnings: Vec<String>,
}

impl EligibilityResponse {
    fn skipped(reason: DismissReason, session_key: Option<String>, warnings: Vec<String>) -> Self {
        Self {
            present: false,
            reason: Some(reason),
            session_key,
            delay_ms: 0,
            slides: Vec::new(),
            chrome: navigation_chrome(0, Default::default()),
            warnings,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SeenRequest {
    pub session_key: String,
}

#[derive(Debug, Serialize)]
pub struct SeenResponse {
    pub session_key: String,
    /// `false` when the key had already been recorded for this session.
    pub newly_recorded: bool,
    pub seen_count: usize,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_session_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid session id '{raw}'")))
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "VisitorSession",
        id: id.to_string(),
    })
}

fn parse_context(input: &PageContextInput) -> AppResult<PageContext> {
    let context = PageContext::new(TargetPage::parse_tag(&input.page)?);
    Ok(match input.device.as_deref() {
        Some(device) => context.with_device(DeviceClass::parse_tag(device)?),
        None => context,
    })
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions
///
/// Open a visitor session. Returns 503 when the server tracks its maximum
/// number of sessions.
pub async fn create_session(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (id, created_at) = state.sessions.create().await.ok_or_else(|| {
        AppError::Unavailable("Visitor session capacity reached, retry later".to_string())
    })?;

    tracing::info!(session_id = %id, "Visitor session created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SessionCreated { id, created_at },
        }),
    ))
}

/// POST /api/v1/sessions/{id}/eligibility
///
/// Filter the set for the page context and apply the once-per-session gate.
/// Preview mode presents every item immediately and never reads or writes
/// session state.
pub async fn evaluate_eligibility(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<EligibilityRequest>,
) -> AppResult<impl IntoResponse> {
    let id = parse_session_id(&id)?;
    let mode = match input.mode.as_deref() {
        Some(mode) => DisplayMode::parse_tag(mode)?,
        None => DisplayMode::Live,
    };
    let context = parse_context(&input.context)?;

    let normalized = normalize(&state, &input.popup_set);

    let Some(eligible) = compute_eligible(&normalized.value, mode, &context) else {
        // Unknown sessions are still an error in live mode.
        if mode == DisplayMode::Live && state.sessions.seen_count(id).await.is_none() {
            return Err(session_not_found(id));
        }
        tracing::debug!(session_id = %id, page = %context.page, "No eligible popup items");
        return Ok(Json(DataResponse {
            data: EligibilityResponse::skipped(
                DismissReason::NothingEligible,
                None,
                normalized.warnings,
            ),
        }));
    };

    let delay_ms = match mode {
        DisplayMode::Preview => 0,
        DisplayMode::Live => {
            let seen = state
                .sessions
                .has_seen(id, &eligible.session_key)
                .await
                .ok_or_else(|| session_not_found(id))?;
            if seen {
                tracing::debug!(
                    session_id = %id,
                    session_key = %eligible.session_key,
                    "Popup set already seen this session"
                );
                return Ok(Json(DataResponse {
                    data: EligibilityResponse::skipped(
                        DismissReason::AlreadySeen,
                        Some(eligible.session_key),
                        normalized.warnings,
                    ),
                }));
            }
            PRESENT_DELAY_MS
        }
    };

    let (slides, chrome) = build_slides(&state, &eligible.items, 0);

    Ok(Json(DataResponse {
        data: EligibilityResponse {
            present: true,
            reason: None,
            session_key: Some(eligible.session_key),
            delay_ms,
            slides,
            chrome,
            warnings: normalized.warnings,
        },
    }))
}

/// POST /api/v1/sessions/{id}/seen
///
/// Record that the visitor dismissed the set behind `session_key`.
/// Idempotent: repeated calls leave a single record. A session holds at most
/// `MAX_SEEN_KEYS_PER_SESSION` keys; new keys past that are rejected with 400.
pub async fn record_seen(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SeenRequest>,
) -> AppResult<impl IntoResponse> {
    let id = parse_session_id(&id)?;
    if !is_session_key(&input.session_key) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Malformed session key '{}'",
            input.session_key
        ))));
    }

    let write = state
        .sessions
        .mark_seen(id, &input.session_key)
        .await
        .ok_or_else(|| session_not_found(id))?;

    if write == SeenWrite::LimitReached {
        tracing::warn!(
            session_id = %id,
            limit = state.config.max_seen_keys_per_session,
            "Seen key rejected, session limit reached"
        );
        return Err(AppError::BadRequest(format!(
            "Session already holds the maximum of {} seen keys",
            state.config.max_seen_keys_per_session
        )));
    }

    let newly_recorded = write == SeenWrite::Recorded;
    let seen_count = state.sessions.seen_count(id).await.unwrap_or_default();

    if newly_recorded {
        tracing::info!(
            session_id = %id,
            session_key = %input.session_key,
            "Popup set marked as seen"
        );
    }

    Ok(Json(DataResponse {
        data: SeenResponse {
            session_key: input.session_key,
            newly_recorded,
            seen_count,
        },
    }))
}
