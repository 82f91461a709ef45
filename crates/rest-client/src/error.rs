//! REST client error types.

use thiserror::Error;

/// Errors that can occur during REST API calls.
#[derive(Debug, Error)]
pub enum RestError {
    /// Non-success HTTP status from the server.
    #[error("HTTP error: {status} - {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        body: String,
    },

    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection error (network issue).
    #[error("Connection error: {0}")]
    Connect(String),

    /// Failed to decode the response body as JSON.
    #[error("JSON decode error: {0}")]
    Decode(String),

    /// Rate limited by the server.
    #[error("Rate limited by server")]
    RateLimited,

    /// Failed to build the HTTP client or request.
    #[error("Request build error: {0}")]
    Build(String),
}

impl RestError {
    /// Check if this error is worth retrying.
    ///
    /// Only transient transport conditions qualify; decode failures and
    /// definitive HTTP errors repeat deterministically.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RestError::Timeout | RestError::Connect(_) | RestError::RateLimited
        )
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout
        } else if err.is_connect() {
            RestError::Connect(err.to_string())
        } else if err.is_decode() {
            RestError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            RestError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            RestError::Connect(err.to_string())
        }
    }
}
