//! API error types for the Redmine client.

use thiserror::Error;

/// Errors that can occur when interacting with the Redmine API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed - invalid API key or credentials.
    #[error("Authentication failed: check your API key")]
    Unauthorized,

    /// Permission denied - user lacks access to the resource.
    #[error("Permission denied: you don't have access to this resource")]
    Forbidden,

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The server rejected the request as invalid.
    #[error("Request rejected by server: {0}")]
    Validation(String),

    /// Rate limited by the server.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// Redmine server error.
    #[error("Redmine server error: {0}")]
    ServerError(String),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Keyring error when storing/retrieving the API key.
    #[error("Keyring error: {0}")]
    Keyring(String),

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Connection validation failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(context.to_string()),
            422 => ApiError::Validation(context.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::ServerError(format!("Unexpected HTTP {}: {}", status, context)),
        }
    }
}
