/// Opaque popup item identifier, stable across edits.
pub type ItemId = String;

/// Milliseconds on the caller's monotonic clock.
pub type Millis = u64;
