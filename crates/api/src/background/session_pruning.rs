//! Periodic removal of idle visitor sessions.
//!
//! A visitor session ends when it has been idle for the configured TTL;
//! its seen-records go with it, so the next visit starts fresh.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::sessions::SessionRegistry;

/// How often the pruning job runs.
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Run the session pruning loop until `cancel` is triggered.
pub async fn run(sessions: Arc<SessionRegistry>, ttl_secs: u64, cancel: CancellationToken) {
    tracing::info!(
        ttl_secs,
        interval_secs = PRUNE_INTERVAL.as_secs(),
        "Session pruning job started"
    );

    let Some(ttl) = i64::try_from(ttl_secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
    else {
        tracing::error!(ttl_secs, "Session TTL out of range, pruning disabled");
        return;
    };
    let mut interval = tokio::time::interval(PRUNE_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session pruning job stopping");
                break;
            }
            _ = interval.tick() => {
                let Some(cutoff) = Utc::now().checked_sub_signed(ttl) else {
                    continue;
                };
                let pruned = sessions.prune_idle_since(cutoff).await;
                if pruned > 0 {
                    let remaining = sessions.session_count().await;
                    tracing::info!(pruned, remaining, "Session pruning: dropped idle sessions");
                } else {
                    tracing::debug!("Session pruning: nothing idle");
                }
            }
        }
    }
}
