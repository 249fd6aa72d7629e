//! Error types for the API client

use eventmanager_core::error::exit_codes;
use std::fmt;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before sending
    #[error("Invalid input: {0}")]
    Validation(String),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// 2xx response whose envelope reported `success: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// No usable login session
    #[error("Not logged in - run `eventmanager auth login` first")]
    NotAuthenticated,

    /// Circuit breaker is open
    #[error("Circuit breaker is open - service temporarily unavailable")]
    CircuitOpen,

    /// The current user's role does not allow the action
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Request timeout
    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// All retry attempts exhausted
    #[error("All {attempts} retry attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Session file could not be read or written
    #[error("Session error: {0}")]
    Session(#[from] eventmanager_core::Error),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::ApiResponse { status, .. } => *status >= 500 || *status == 429,
            Self::Timeout(_) => true,
            Self::Json(_)
            | Self::Config(_)
            | Self::Validation(_)
            | Self::Rejected(_)
            | Self::NotAuthenticated
            | Self::CircuitOpen
            | Self::PermissionDenied(_)
            | Self::RetriesExhausted { .. }
            | Self::InvalidUrl(_)
            | Self::Session(_) => false,
        }
    }

    /// HTTP status for response errors
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiResponse { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }

    /// 401, or no session at all
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::NotAuthenticated) || self.status() == Some(401)
    }

    /// 403, or refused locally for the current role
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::PermissionDenied(_)) || self.status() == Some(403)
    }

    /// 404
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Process exit code for a CLI command that failed with this error
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Session(e) => e.code.exit_code(),
            Self::Validation(_) => exit_codes::VALIDATION_ERROR,
            Self::Config(_) | Self::InvalidUrl(_) => exit_codes::CONFIG_ERROR,
            Self::Timeout(_) => exit_codes::TIMEOUT,
            _ if self.is_unauthorized() => exit_codes::NOT_AUTHENTICATED,
            _ if self.is_forbidden() => exit_codes::FORBIDDEN,
            Self::ApiResponse { status: 400, .. } => exit_codes::VALIDATION_ERROR,
            _ => exit_codes::FAILURE,
        }
    }
}

/// Error context for better debugging
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Request ID for correlation
    pub request_id: Option<String>,
    /// Endpoint that was called
    pub endpoint: String,
    /// HTTP method used
    pub method: String,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.endpoint)?;
        if let Some(ref id) = self.request_id {
            write!(f, " (request_id: {id})")?;
        }
        Ok(())
    }
}
