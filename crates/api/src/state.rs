use std::sync::Arc;

use promo_core::safety::UrlPolicy;
use promo_core::theme_catalog::ThemeCatalog;

use crate::config::ServerConfig;
use crate::sessions::SessionRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Theme tokens used to resolve popup items.
    pub catalog: Arc<ThemeCatalog>,
    /// URL rules applied while normalizing popup sets.
    pub url_policy: Arc<UrlPolicy>,
    /// Per-visitor seen-records.
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Build state from configuration using the built-in theme catalog.
    pub fn from_config(config: ServerConfig) -> Self {
        Self {
            catalog: Arc::new(ThemeCatalog::builtin().clone()),
            url_policy: Arc::new(UrlPolicy::new(&config.first_party_hosts)),
            sessions: Arc::new(SessionRegistry::new(
                config.max_sessions,
                config.max_seen_keys_per_session,
            )),
            config: Arc::new(config),
        }
    }
}
