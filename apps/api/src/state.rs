use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::tracker::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Held for the whole of each tracker request, so intents are handled one at a time.
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = SessionStore::new(config.session_ttl);
        Self {
            config,
            sessions: Arc::new(Mutex::new(store)),
        }
    }
}
