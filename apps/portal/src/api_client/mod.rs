/// Backend API client: the single point of entry for every call the portal
/// makes to the recruitment backend.
///
/// Every request carries the `ngrok-skip-browser-warning` header so tunnelled
/// deployments answer with JSON instead of an interstitial page. Authorized
/// requests add `Authorization: Bearer <token>`. No call is retried.
use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

pub mod admin;
pub mod candidate;
pub mod error_message;
pub mod public;

pub use error_message::extract_error_message;

const TUNNEL_HEADER: &str = "ngrok-skip-browser-warning";
const API_PREFIX: &str = "api";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status})")]
    Api { status: u16, body: Value },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The error as a browser HTTP client would have surfaced it.
    pub fn to_value(&self) -> Value {
        match self {
            ApiError::Api { status, body } => json!({
                "message": format!("Request failed with status code {status}"),
                "response": { "status": status, "data": body },
            }),
            other => json!({ "message": other.to_string() }),
        }
    }

    /// Human-readable message for inline display, with a per-call fallback.
    pub fn message(&self, fallback: &str) -> String {
        extract_error_message(&self.to_value(), fallback)
    }

    /// The backend's plain-string `detail`, or `fallback` for anything else.
    pub fn detail_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Api { body, .. } => body
                .get("detail")
                .and_then(Value::as_str)
                .filter(|detail| !detail.is_empty())
                .unwrap_or(fallback)
                .to_string(),
            _ => fallback.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    /// Builds a client for `<backend_url>/api`.
    pub fn new(backend_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base = Url::parse(backend_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{backend_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(backend_url.to_string()));
        }
        if let Ok(mut segments) = base.path_segments_mut() {
            segments.pop_if_empty().push(API_PREFIX);
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Appends path segments to the API base; each segment is percent-encoded.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str], token: Option<&str>) -> RequestBuilder {
        let url = self.url(segments);
        debug!("{} {}", method, url.path());
        let builder = self
            .client
            .request(method, url)
            .header(TUNNEL_HEADER, "true");
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) fn get(&self, segments: &[&str], token: Option<&str>) -> RequestBuilder {
        self.request(Method::GET, segments, token)
    }

    pub(crate) fn post(&self, segments: &[&str], token: Option<&str>) -> RequestBuilder {
        self.request(Method::POST, segments, token)
    }

    pub(crate) fn put(&self, segments: &[&str], token: Option<&str>) -> RequestBuilder {
        self.request(Method::PUT, segments, token)
    }

    pub(crate) fn delete(&self, segments: &[&str], token: Option<&str>) -> RequestBuilder {
        self.request(Method::DELETE, segments, token)
    }

    /// Sends the request and deserializes a successful JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let bytes = self.send_bytes(builder).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Sends the request and discards a successful body.
    pub(crate) async fn send_unit(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send_bytes(builder).await.map(|_| ())
    }

    /// Sends the request and returns the raw body of a successful response.
    pub(crate) async fn send_bytes(&self, builder: RequestBuilder) -> Result<Bytes, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let raw = response.bytes().await.unwrap_or_default();
            let body = serde_json::from_slice::<Value>(&raw)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&raw).into_owned()));
            warn!("Backend returned {}: {}", status, body);
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, routing::get, Json, Router};

    #[test]
    fn test_base_url_gets_api_prefix() {
        let client = ApiClient::new("https://careers.example.com/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url().as_str(), "https://careers.example.com/api");
    }

    #[test]
    fn test_url_segments_are_encoded() {
        let client = ApiClient::new("https://careers.example.com", Duration::from_secs(1)).unwrap();
        let url = client.url(&["admin", "sub-admins", "jane doe/ops", "disable"]);
        assert_eq!(
            url.as_str(),
            "https://careers.example.com/api/admin/sub-admins/jane%20doe%2Fops/disable"
        );
    }

    #[test]
    fn test_rejects_unparseable_backend() {
        assert!(matches!(
            ApiClient::new("not a url", Duration::from_secs(1)),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_api_error_message_uses_detail() {
        let err = ApiError::Api {
            status: 422,
            body: json!({"detail": [{"loc": ["body", "email"], "msg": "invalid"}]}),
        };
        assert_eq!(err.message("Login failed"), "email: invalid");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_api_error_without_detail_uses_status_message() {
        let err = ApiError::Api { status: 500, body: json!({}) };
        assert_eq!(err.message("x"), "Request failed with status code 500");
    }

    #[tokio::test]
    async fn test_requests_carry_tunnel_and_bearer_headers() {
        async fn echo(headers: HeaderMap) -> Json<Value> {
            let header = |name: &str| {
                headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            Json(json!({
                "tunnel": header("ngrok-skip-browser-warning"),
                "auth": header("authorization"),
            }))
        }

        let client = testing::spawn_backend(Router::new().route("/api/echo", get(echo))).await;
        let seen: Value = client
            .send_json(client.get(&["echo"], Some("tok-1")))
            .await
            .unwrap();
        assert_eq!(seen["tunnel"], "true");
        assert_eq!(seen["auth"], "Bearer tok-1");

        let anonymous: Value = client.send_json(client.get(&["echo"], None)).await.unwrap();
        assert_eq!(anonymous["auth"], Value::Null);
    }

    #[tokio::test]
    async fn test_error_body_is_kept_for_messages() {
        use axum::http::StatusCode;

        let router = Router::new().route(
            "/api/fail",
            get(|| async { (StatusCode::BAD_REQUEST, Json(json!({"detail": "Job slug taken"}))) }),
        );
        let client = testing::spawn_backend(router).await;
        let err = client.send_unit(client.get(&["fail"], None)).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.message("Failed to create job"), "Job slug taken");
    }
}
