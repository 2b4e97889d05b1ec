//! Image upload client
//!
//! Uploads go to a standalone endpoint using multipart form encoding, a
//! separate code path from the JSON pipeline with no retry wrapper. The
//! server answers `{"url": ...}` on success or `{"error": ...}` on failure.

use mobistore_domain::{ApiError, Result};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, warn};

const GENERIC_FAILURE: &str = "Failed to upload image";
const UNPARSEABLE_FAILURE: &str = "Upload failed";

/// Client for the standalone image-upload endpoint
pub struct UploadClient {
    inner: reqwest::Client,
    url: String,
}

impl UploadClient {
    /// Create an upload client for the given endpoint URL
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the underlying client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { inner, url: url.into() })
    }

    /// Upload a file and return its stored URL
    ///
    /// # Arguments
    /// * `file_name` - Name reported in the multipart part
    /// * `bytes` - File content
    /// * `mime` - Content type of the file (e.g., "image/jpeg")
    ///
    /// # Errors
    /// Returns `ApiError::Upload` with the server-supplied `error` message,
    /// or a generic message when the server gives none.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>, mime: &str) -> Result<String> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|e| ApiError::Upload(format!("Invalid upload request: {e}")))?;
        let form = Form::new().part("file", part);

        debug!(url = %self.url, file_name, "Uploading image");

        let response = self
            .inner
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            let message = match response.json::<Value>().await {
                Ok(body) => body
                    .get("error")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
                Err(_) => UNPARSEABLE_FAILURE.to_string(),
            };
            warn!(url = %self.url, message, "Image upload rejected");
            return Err(ApiError::Upload(message));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|_| ApiError::Upload(GENERIC_FAILURE.to_string()))?;
        body.get("url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ApiError::Upload(GENERIC_FAILURE.to_string()))
    }
}
