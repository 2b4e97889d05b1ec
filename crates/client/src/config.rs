//! Client configuration
//!
//! Loads configuration from environment variables with per-key fallback to
//! defaults. There is no runtime reconfiguration; the config is fixed at
//! client construction.
//!
//! ## Environment Variables
//! - `MOBISTORE_API_URL`: Base URL of the backend API
//! - `MOBISTORE_UPLOAD_URL`: URL of the standalone image-upload endpoint
//! - `MOBISTORE_TIMEOUT_SECS`: Per-request deadline in seconds

use std::time::Duration;

use mobistore_domain::{ApiError, Result};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_UPLOAD_URL: &str = "http://localhost:3000/api/upload";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_RETRIES: usize = 3;
const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Configuration for the Mobistore client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the backend API (e.g., "http://localhost:8080/api")
    pub base_url: String,
    /// URL of the multipart image-upload endpoint
    pub upload_url: String,
    /// Deadline applied to each request attempt
    pub timeout: Duration,
    /// Retries after the first attempt (4 total attempts at the default)
    pub max_retries: usize,
    /// Base backoff; the delay before retry `n` is `retry_delay * n`
    pub retry_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// Missing variables fall back to their defaults individually.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("MOBISTORE_API_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(upload_url) = std::env::var("MOBISTORE_UPLOAD_URL") {
            config.upload_url = upload_url;
        }
        if let Ok(raw) = std::env::var("MOBISTORE_TIMEOUT_SECS") {
            let secs = raw
                .parse::<u64>()
                .map_err(|e| ApiError::Config(format!("Invalid timeout: {e}")))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
