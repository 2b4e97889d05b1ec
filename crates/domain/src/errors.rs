//! Error taxonomy for client operations
//!
//! Every failure the client surfaces is one of these variants, carrying a
//! complete human-readable message. Retry decisions are made from variant
//! identity via [`ApiError::is_retryable`], never from message text.

use thiserror::Error;

/// Errors raised by the Mobistore client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Local pre-flight check failed, or the server returned HTTP 400
    #[error("{0}")]
    Validation(String),

    /// HTTP 401; the session is cleared as a side effect
    #[error("{0}")]
    Auth(String),

    /// HTTP 404
    #[error("{0}")]
    NotFound(String),

    /// HTTP 500 or any other 5xx status
    #[error("{0}")]
    Server(String),

    /// Any other non-2xx status
    #[error("{0}")]
    Request(String),

    /// The client-side deadline fired before a response arrived
    #[error("{0}")]
    Timeout(String),

    /// The network layer could not reach the server at all
    #[error("{0}")]
    Connectivity(String),

    /// Other network-layer failure
    #[error("{0}")]
    Network(String),

    /// Success status but the body was not valid JSON (or did not decode)
    #[error("{0}")]
    Protocol(String),

    /// The upload endpoint rejected the file
    #[error("{0}")]
    Upload(String),

    /// Invalid configuration or client construction failure
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Timeout with the standard user-facing message.
    pub fn timeout() -> Self {
        Self::Timeout("Request timeout. Please check your connection and try again.".into())
    }

    /// 401 with the standard user-facing message.
    pub fn unauthorized() -> Self {
        Self::Auth("Unauthorized. Please login again.".into())
    }

    /// 404 with the standard user-facing message.
    pub fn not_found() -> Self {
        Self::NotFound("Resource not found. Please check the server is running.".into())
    }

    /// Non-JSON success body.
    pub fn invalid_response() -> Self {
        Self::Protocol("Invalid response from server. Expected JSON format.".into())
    }

    /// Unreachable server, pointing the user at the configured address.
    pub fn unreachable(base_url: &str) -> Self {
        Self::Connectivity(format!(
            "Cannot connect to the server. Please ensure the backend is running at {base_url}"
        ))
    }

    /// Check if this error should be retried
    ///
    /// Auth failures already reset the session, timeouts already waited the
    /// full budget, and a malformed body will not improve on a second read.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Validation(_)
            | Self::NotFound(_)
            | Self::Server(_)
            | Self::Request(_)
            | Self::Connectivity(_)
            | Self::Network(_) => true,
            Self::Auth(_)
            | Self::Timeout(_)
            | Self::Protocol(_)
            | Self::Upload(_)
            | Self::Config(_) => false,
        }
    }
}

/// Result type alias for Mobistore client operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable() {
        assert!(ApiError::Server("boom".into()).is_retryable());
        assert!(ApiError::NotFound("gone".into()).is_retryable());
        assert!(ApiError::Validation("bad".into()).is_retryable());
        assert!(ApiError::Connectivity("down".into()).is_retryable());
        assert!(ApiError::Network("reset".into()).is_retryable());
        assert!(ApiError::Request("teapot".into()).is_retryable());
    }

    #[test]
    fn terminal_errors_are_not_retryable() {
        assert!(!ApiError::unauthorized().is_retryable());
        assert!(!ApiError::timeout().is_retryable());
        assert!(!ApiError::invalid_response().is_retryable());
        assert!(!ApiError::Upload("file too large".into()).is_retryable());
        assert!(!ApiError::Config("missing base url".into()).is_retryable());
    }

    #[test]
    fn standard_messages_match_contract() {
        assert_eq!(
            ApiError::timeout().to_string(),
            "Request timeout. Please check your connection and try again."
        );
        assert_eq!(ApiError::unauthorized().to_string(), "Unauthorized. Please login again.");
        assert_eq!(
            ApiError::not_found().to_string(),
            "Resource not found. Please check the server is running."
        );
        assert_eq!(
            ApiError::invalid_response().to_string(),
            "Invalid response from server. Expected JSON format."
        );
        assert!(ApiError::unreachable("http://localhost:8080/api")
            .to_string()
            .contains("http://localhost:8080/api"));
    }
}
