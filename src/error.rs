//! Centralized error types for ClientDesk.
//!
//! All error types use `thiserror`. `AppError` aggregates the module errors
//! and knows how to phrase them for the UI.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check it is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                ConfigError::MissingBaseUrl => {
                    "No API base URL configured. Set API_BASE_URL and restart.".to_string()
                }
            },
            AppError::Api(e) => match e {
                ApiError::Unauthorized | ApiError::Forbidden => {
                    "Access denied by the server.".to_string()
                }
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::Conflict(_) => {
                    "This record was changed elsewhere. Refresh and try again.".to_string()
                }
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => "Server error. Please try again later.".to_string(),
                ApiError::Network(_) => {
                    "Connection failed. Please check your network.".to_string()
                }
                ApiError::InvalidUrl(_) => "Invalid API base URL.".to_string(),
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from the server.".to_string()
                }
                ApiError::UpdateFailed(msg) => format!("Update rejected: {}", msg),
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Check if this error is critical and requires user acknowledgment.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_)
                | AppError::Api(ApiError::Unauthorized)
                | AppError::Api(ApiError::Forbidden)
                | AppError::Api(ApiError::InvalidUrl(_))
                | AppError::Terminal(_)
        )
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::MissingBaseUrl.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::MissingBaseUrl)));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let app_err: AppError = ApiError::RateLimited.into();
        assert!(matches!(app_err, AppError::Api(ApiError::RateLimited)));
    }

    #[test]
    fn test_user_message_missing_base_url() {
        let err = AppError::Config(ConfigError::MissingBaseUrl);
        assert!(err.user_message().contains("API_BASE_URL"));
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Api(ApiError::NotFound("a1".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("a1"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_user_message_validation() {
        let err = AppError::Config(ConfigError::ValidationError("bad url".to_string()));
        assert!(err.user_message().contains("bad url"));
    }

    #[test]
    fn test_is_critical() {
        assert!(AppError::Config(ConfigError::NoConfigDir).is_critical());
        assert!(AppError::Api(ApiError::Forbidden).is_critical());
        assert!(!AppError::Api(ApiError::RateLimited).is_critical());
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("raw mode");
        assert_eq!(err.user_message(), "Terminal error: raw mode");
    }

    #[test]
    fn test_io_error_message() {
        let err: AppError = std::io::Error::other("disk").into();
        assert!(err.user_message().contains("file operation"));
        assert!(!err.is_critical());
    }
}
