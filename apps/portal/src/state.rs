use std::sync::Arc;

use crate::admin::sessions::ConsoleRegistry;
use crate::api_client::ApiClient;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub config: Config,
    /// Open admin consoles, keyed by the `x-console-session` header.
    pub consoles: Arc<ConsoleRegistry>,
}

impl AppState {
    pub fn new(api: ApiClient, config: Config) -> Self {
        let consoles = Arc::new(ConsoleRegistry::new(config.console_session_ttl));
        Self {
            api,
            config,
            consoles,
        }
    }
}
