//! Data service error types.

use thiserror::Error;

/// Errors that can occur while talking to the data service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("Data service request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("Data service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The addressed record does not exist (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body did not decode into the expected shape.
    #[error("Failed to parse data service response: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("Data service request timed out after {0}ms")]
    Timeout(u64),

    /// The service could not be reached.
    #[error("Data service unavailable: {0}")]
    Unavailable(String),

    /// Configuration error.
    #[error("Data service configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(0)
        } else if err.is_connect() {
            ApiError::Unavailable(err.to_string())
        } else if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}
