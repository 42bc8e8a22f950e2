//! Application state

use morpho_core::store::DEFAULT_TTL;
use morpho_core::ResultStore;
use std::sync::Arc;
use std::time::Duration;

/// How often the background task drops expired results
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Conversion results awaiting download
    pub store: Arc<ResultStore>,
}

impl AppState {
    /// Create new application state
    ///
    /// The result TTL defaults to one hour and can be overridden with
    /// `MORPHO_RESULT_TTL_SECS`.
    pub fn new() -> Self {
        let ttl = std::env::var("MORPHO_RESULT_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TTL);

        tracing::debug!("Result store TTL: {:?}", ttl);

        Self {
            store: Arc::new(ResultStore::new(ttl)),
        }
    }

    /// Spawn the periodic sweep of expired results
    pub fn spawn_sweeper(&self) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                ticker.tick().await;
                let dropped = store.purge_expired();
                if dropped > 0 {
                    tracing::debug!("Dropped {} expired results", dropped);
                }
            }
        });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
