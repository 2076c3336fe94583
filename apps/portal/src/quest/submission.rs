//! Delivers finished quests to the backend.

use async_trait::async_trait;
use serde_json::Value;

use super::wizard::ApplicationSink;
use crate::api_client::{ApiClient, ApiError};
use crate::models::application::{ApplicationPayload, ResumeUpload};

const SUBMISSION_FALLBACK: &str = "Submission failed. Please try again.";
const ROUTE_MISSING: &str = "API route not found (404). Please refresh and try again.";

/// Applicant-facing text for a failed submission. Only a plain-string
/// `detail` from the backend is shown verbatim.
pub fn submission_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Api { status: 404, .. } => ROUTE_MISSING.to_string(),
        ApiError::Api { .. } => err.detail_or(SUBMISSION_FALLBACK),
        other => other.message(SUBMISSION_FALLBACK),
    }
}

#[async_trait]
impl ApplicationSink for ApiClient {
    async fn submit_application(
        &self,
        payload: &ApplicationPayload,
        resume: &ResumeUpload,
    ) -> Result<Value, String> {
        self.post_application(payload, resume)
            .await
            .map_err(|e| submission_error_message(&e))
    }
}
