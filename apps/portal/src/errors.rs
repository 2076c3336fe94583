use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::api_client::ApiError;

/// Gateway-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Console session expired")]
    SessionExpired,

    #[error("Forbidden")]
    Forbidden,

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("Backend error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wraps a failed backend call, keeping client-side (4xx) statuses and
    /// reporting everything else as a bad gateway.
    pub fn upstream(err: ApiError, fallback: &str) -> Self {
        AppError::Upstream {
            status: err.status().unwrap_or(502),
            message: err.message(fallback),
        }
    }

    /// Like [`AppError::upstream`], but only a plain-string `detail` from the
    /// backend is shown; anything else becomes `fallback`.
    pub fn upstream_detail(err: ApiError, fallback: &str) -> Self {
        AppError::Upstream {
            status: err.status().unwrap_or(502),
            message: err.detail_or(fallback),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::SessionExpired => (
                StatusCode::UNAUTHORIZED,
                "SESSION_EXPIRED",
                "Console session expired. Please sign in again.".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Access denied".to_string(),
            ),
            AppError::ConfirmationRequired(prompt) => (
                StatusCode::PRECONDITION_REQUIRED,
                "CONFIRMATION_REQUIRED",
                prompt.clone(),
            ),
            AppError::Upstream { status, message } => {
                let status = StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                if status == StatusCode::BAD_GATEWAY {
                    tracing::error!("Backend error: {message}");
                }
                (status, "UPSTREAM_ERROR", message.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
