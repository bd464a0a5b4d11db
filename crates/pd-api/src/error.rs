//! Error types for pd-api

use thiserror::Error;

/// Data API errors
///
/// `Clone` so that one failed in-flight request can be handed to every
/// caller waiting on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request could not be sent or timed out (A001)
    #[error("[A001] Request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// Non-success HTTP status (A002)
    #[error("[A002] {url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// Reply did not have the expected shape (A003)
    #[error("[A003] Failed to decode {what}: {message}")]
    Decode { what: String, message: String },

    /// Invalid client configuration (A004)
    #[error("[A004] Invalid API configuration: {0}")]
    InvalidConfig(String),

    /// Internal error (A005)
    #[error("[A005] Internal API error: {0}")]
    Internal(String),
}

/// Result type alias for ApiError
pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        let message = if err.is_timeout() {
            format!("timed out: {}", err)
        } else if err.is_connect() {
            format!("could not connect: {}", err)
        } else {
            err.to_string()
        };
        ApiError::Request { url, message }
    }
}
