/// Errors raised at the fallible edges of the engine (catalog construction,
/// strict tag parsing, explicit lookups).
///
/// Normalization, resolution, gating and navigation never fail; they degrade
/// to safe defaults instead.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}
