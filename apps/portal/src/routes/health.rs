use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, the backend it talks to and console
/// session settings.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "pixwik-portal",
        "backend": state.config.backend_url,
        "api_base": state.api.base_url().as_str(),
        "console_sessions": state.consoles.len().await,
        "console_session_ttl_minutes": state.config.console_session_ttl.num_minutes(),
    }))
}
