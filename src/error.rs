//! Centralized error types for rmine.
//!
//! This module provides a unified error hierarchy for the application
//! with user-friendly error messages. All error types use `thiserror`
//! for ergonomic error handling.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
///
/// This enum aggregates all error types that can occur in rmine,
/// providing user-friendly error messages while preserving the
/// underlying error context for debugging.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, browser launch, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    ///
    /// This returns a message suitable for printing to stderr, without
    /// technical jargon or stack traces.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create configuration directory. Check file permissions.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Invalid value: {}", msg),
                ConfigError::NotLoggedIn => "Not logged in.".to_string(),
                ConfigError::UnknownAlias(input) => {
                    format!("'{}' is not a number or a known alias.", input)
                }
            },
            AppError::Api(e) => match e {
                ApiError::Unauthorized => {
                    "Authentication failed. Please check your API key.".to_string()
                }
                ApiError::Forbidden => {
                    "Access denied. You don't have permission to access this resource.".to_string()
                }
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::Validation(msg) => format!("The server rejected the request: {}", msg),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => {
                    "Redmine server error. Please try again later.".to_string()
                }
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::Keyring(_) => {
                    "Could not access secure storage. Please log in again.".to_string()
                }
                ApiError::InvalidResponse(msg) => {
                    format!("Unexpected response from the server: {}", msg)
                }
                ApiError::ConnectionFailed(_) => {
                    "Could not connect to the Redmine server. Please check your URL and network."
                        .to_string()
                }
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::NotLoggedIn) => {
                Some("Run 'rmine login' to connect to a server.")
            }
            AppError::Config(ConfigError::UnknownAlias(_)) => {
                Some("List known aliases with 'rmine aliases list'.")
            }
            AppError::Api(ApiError::Unauthorized) | AppError::Api(ApiError::Keyring(_)) => {
                Some("Your API key is shown on your Redmine account page under 'My account'. Run 'rmine login' to store a new one.")
            }
            AppError::Api(ApiError::Network(_)) | AppError::Api(ApiError::ConnectionFailed(_)) => {
                Some("Check your internet connection and the configured server URL.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let config_err = ConfigError::NotLoggedIn;
        let app_err: AppError = config_err.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NotLoggedIn)));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let api_err = ApiError::Unauthorized;
        let app_err: AppError = api_err.into();
        assert!(matches!(app_err, AppError::Api(ApiError::Unauthorized)));
    }

    #[test]
    fn test_user_message_unauthorized() {
        let err = AppError::Api(ApiError::Unauthorized);
        let msg = err.user_message();
        assert!(msg.contains("Authentication failed"));
        assert!(msg.contains("API key"));
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Api(ApiError::NotFound("issue #9999".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("issue #9999"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_user_message_unknown_alias() {
        let err = AppError::Config(ConfigError::UnknownAlias("infra".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("infra"));
    }

    #[test]
    fn test_suggested_action_not_logged_in() {
        let err = AppError::Config(ConfigError::NotLoggedIn);
        let action = err.suggested_action();
        assert!(action.is_some());
        assert!(action.unwrap().contains("rmine login"));
    }

    #[test]
    fn test_suggested_action_unauthorized() {
        let err = AppError::Api(ApiError::Unauthorized);
        let action = err.suggested_action();
        assert!(action.is_some());
        assert!(action.unwrap().contains("My account"));
    }

    #[test]
    fn test_other_error() {
        let err = AppError::other("something went wrong");
        assert!(matches!(err, AppError::Other(_)));
        assert_eq!(err.user_message(), "something went wrong");
    }
}
