use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_BACKEND_URL: &str = "https://careersbackend.pixwik.com";

/// Gateway configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend host; the API lives under `<backend_url>/api`.
    pub backend_url: String,
    pub backend_timeout: Duration,
    /// Idle admin console sessions are dropped after this long.
    pub console_session_ttl: chrono::Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            backend_url: std::env::var("BACKEND_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            backend_timeout: Duration::from_secs(parse_env("BACKEND_TIMEOUT_SECS", 30)?),
            console_session_ttl: chrono::Duration::minutes(parse_env(
                "CONSOLE_SESSION_TTL_MINUTES",
                120,
            )?),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
