//! Success envelope shared by every `/api/v1` handler.
//!
//! Errors are rendered separately by [`crate::error::AppError`] as
//! `{ "error", "code" }`, so clients can tell the two apart by the top-level key.

use serde::Serialize;

/// `{ "data": T }` wrapper for successful responses.
///
/// [`crate::handlers::themes::get_theme`] wraps a single theme token this way;
/// the session handlers wrap eligibility and seen results.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
