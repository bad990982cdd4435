/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Idle time after which a visitor session is forgotten (default: `1800`).
    pub session_ttl_secs: u64,
    /// Upper bound on concurrently tracked visitor sessions (default: `10000`).
    pub max_sessions: usize,
    /// Upper bound on dismissed popup sets recorded per session (default: `256`).
    pub max_seen_keys_per_session: usize,
    /// Hosts whose protocol-relative URLs (`//host/...`) are accepted in
    /// popup content, from comma-separated `FIRST_PARTY_HOSTS`.
    pub first_party_hosts: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SESSION_TTL_SECS`     | `1800`                     |
    /// | `MAX_SESSIONS`         | `10000`                    |
    /// | `MAX_SEEN_KEYS_PER_SESSION` | `256`                 |
    /// | `FIRST_PARTY_HOSTS`    | (empty)                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session_ttl_secs: u64 = std::env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| "1800".into())
            .parse()
            .expect("SESSION_TTL_SECS must be a valid u64");

        let max_sessions: usize = std::env::var("MAX_SESSIONS")
            .unwrap_or_else(|_| "10000".into())
            .parse()
            .expect("MAX_SESSIONS must be a valid usize");

        let max_seen_keys_per_session: usize = std::env::var("MAX_SEEN_KEYS_PER_SESSION")
            .unwrap_or_else(|_| "256".into())
            .parse()
            .expect("MAX_SEEN_KEYS_PER_SESSION must be a valid usize");

        let first_party_hosts =
            split_list(&std::env::var("FIRST_PARTY_HOSTS").unwrap_or_default());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_ttl_secs,
            max_sessions,
            max_seen_keys_per_session,
            first_party_hosts,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
