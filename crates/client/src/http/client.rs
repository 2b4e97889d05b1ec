//! HTTP client with built-in classification, retry, and envelope unwrap.

use std::sync::Arc;
use std::time::Duration;

use mobistore_domain::{ApiError, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::session::Session;
use super::error_body::extract_error_message;

const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Shared request pipeline over a configured base URL
///
/// Every resource method funnels through [`HttpClient::execute`], so auth,
/// timeout, classification, and retry behavior are identical across the API
/// surface.
pub struct HttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
    session: Arc<Session>,
}

impl HttpClient {
    /// Create a new pipeline
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the underlying client cannot be built.
    pub fn new(config: ClientConfig, session: Arc<Session>) -> Result<Self> {
        // The per-attempt deadline is enforced with tokio::time::timeout in
        // execute_once, not with a reqwest-level timeout, so the deadline
        // also covers connection setup on every retry attempt.
        let inner = reqwest::Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { inner, config, session })
    }

    /// Execute a GET request and decode the unwrapped payload.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        decode(self.execute(Method::GET, path, None).await?)
    }

    /// Execute a POST request with a JSON body and decode the payload.
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body = to_body(body)?;
        decode(self.execute(Method::POST, path, Some(body)).await?)
    }

    /// Execute a bodyless POST, discarding the response payload.
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        self.execute(Method::POST, path, None).await.map(|_| ())
    }

    /// Execute a PUT request with a JSON body and decode the payload.
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body = to_body(body)?;
        decode(self.execute(Method::PUT, path, Some(body)).await?)
    }

    /// Execute a bodyless PUT and decode the payload.
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        decode(self.execute(Method::PUT, path, None).await?)
    }

    /// Execute a DELETE request, discarding the response payload.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path, None).await.map(|_| ())
    }

    /// Check if the backend is reachable
    ///
    /// Lightweight probe against `/health` with a short deadline and no
    /// retries; any failure maps to `false`.
    pub async fn check_health(&self) -> bool {
        let url = format!("{}/health", self.config.base_url);
        let probe = self.inner.get(&url).send();
        match tokio::time::timeout(Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS), probe).await {
            Ok(Ok(response)) => response.status().is_success(),
            Ok(Err(e)) => {
                warn!(error = %e, "Health check failed");
                false
            }
            Err(_) => {
                warn!("Health check timeout");
                false
            }
        }
    }

    /// Run one request through the full pipeline, retrying transient failures
    ///
    /// The delay before retry `n` is `retry_delay * n` (1 s, 2 s, 3 s at the
    /// defaults). Non-retryable kinds propagate immediately; after the budget
    /// is exhausted the last error is re-thrown unchanged.
    pub async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let mut attempt: usize = 0;
        loop {
            match self.execute_once(method.clone(), path, body.as_ref()).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.config.retry_delay.saturating_mul(attempt as u32);
                    warn!(
                        %method,
                        path,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One attempt: attach auth, bound with the deadline, classify, unwrap.
    async fn execute_once(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(%method, %url, "Sending request");

        let mut request = self
            .inner
            .request(method, &url)
            .header("Content-Type", "application/json");
        if let Some(token) = self.session.token().await {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        // Scoped deadline: the timer is dropped with the future on every
        // exit path, success or failure.
        let response = match tokio::time::timeout(self.config.timeout, request.send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(self.classify_transport_error(&err)),
            Err(_) => return Err(ApiError::timeout()),
        };

        let status = response.status();
        debug!(%url, status = status.as_u16(), "Received response");

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                // Session reset happens whether or not the caller inspects
                // the error.
                self.session.clear().await;
                return Err(ApiError::unauthorized());
            }

            let reason = status.canonical_reason().map(str::to_string);
            let body_text = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body_text)
                .or(reason)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

            return Err(self.classify_status(status, message));
        }

        let body_text = response.text().await.map_err(|_| ApiError::invalid_response())?;
        let payload: Value =
            serde_json::from_str(&body_text).map_err(|_| ApiError::invalid_response())?;
        Ok(unwrap_envelope(payload))
    }

    fn classify_transport_error(&self, err: &reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::timeout()
        } else if err.is_connect() {
            ApiError::unreachable(&self.config.base_url)
        } else {
            ApiError::Network(err.to_string())
        }
    }

    fn classify_status(&self, status: StatusCode, message: String) -> ApiError {
        if status == StatusCode::BAD_REQUEST {
            ApiError::Validation(format!("Validation Error: {message}"))
        } else if status == StatusCode::NOT_FOUND {
            ApiError::not_found()
        } else if status == StatusCode::INTERNAL_SERVER_ERROR {
            ApiError::Server(format!("Server error: {message}"))
        } else if status.is_server_error() {
            ApiError::Server(format!(
                "Backend server error. Please ensure the backend is running at {}",
                self.config.base_url
            ))
        } else {
            ApiError::Request(message)
        }
    }
}

/// Unwrap the optional `{"data": ...}` success envelope
///
/// An object carrying a `data` key yields that value (even when it is
/// `null`); any other payload is returned verbatim.
fn unwrap_envelope(payload: Value) -> Value {
    match payload {
        Value::Object(mut object) if object.contains_key("data") => {
            object.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::Config(format!("Failed to serialize request body: {e}")))
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|_| ApiError::invalid_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_unwrap_returns_nested_value() {
        let payload = serde_json::json!({"data": {"id": 1}});
        assert_eq!(unwrap_envelope(payload), serde_json::json!({"id": 1}));
    }

    #[test]
    fn envelope_unwrap_keeps_null_data() {
        let payload = serde_json::json!({"data": null});
        assert_eq!(unwrap_envelope(payload), Value::Null);
    }

    #[test]
    fn bare_payload_passes_through() {
        let payload = serde_json::json!([{"id": 1}, {"id": 2}]);
        assert_eq!(unwrap_envelope(payload.clone()), payload);

        let object = serde_json::json!({"token": "abc"});
        assert_eq!(unwrap_envelope(object.clone()), object);
    }
}
