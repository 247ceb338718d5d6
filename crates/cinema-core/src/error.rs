//! Error types for the Cinema client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when the server returned an error without a readable body.
pub const GENERIC_REQUEST_FAILURE: &str = "request failed";

/// Message used when no HTTP response was received at all.
pub const NETWORK_FAILURE: &str = "network error";

/// A failed REST call, normalized from either an HTTP error status or a
/// transport failure.
///
/// `status` is `None` when the request never produced a response.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct RequestError {
    pub status: Option<u16>,
    pub message: String,
}

impl RequestError {
    /// Creates an error for an HTTP status with a server-provided message.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates the generic fallback for an HTTP status whose body was unreadable.
    pub fn generic(status: u16) -> Self {
        Self::http(status, GENERIC_REQUEST_FAILURE)
    }

    /// Creates the connectivity error (no response).
    pub fn network() -> Self {
        Self {
            status: None,
            message: NETWORK_FAILURE.to_string(),
        }
    }

    /// Check if the request never reached the server
    pub fn is_network(&self) -> bool {
        self.status.is_none()
    }

    /// Check if the server answered 404
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

/// Input rejected before any request is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("search query must not be empty")]
    EmptyQuery,

    #[error("search query must be at least {min} characters")]
    QueryTooShort { min: usize },

    #[error("rating must be an even number between 2 and 10 (got {0})")]
    RatingOutOfRange(u8),

    #[error("review text must not be empty")]
    EmptyReviewText,

    #[error("review text must be at most {max} characters (got {actual})")]
    ReviewTextTooLong { max: usize, actual: usize },

    #[error("required field is empty: {0}")]
    MissingField(String),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("passwords do not match")]
    PasswordMismatch,
}

impl ValidationError {
    pub fn missing(field: &str) -> Self {
        Self::MissingField(field.to_string())
    }
}

/// A shared error type for the entire Cinema client.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CinemaError {
    /// REST call failed
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Input validation failed before any request
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Operation needs a logged-in session
    #[error("Login required")]
    NotAuthenticated,

    /// Review edits and deletes are limited to the author
    #[error("Only the author can modify this review")]
    NotReviewAuthor,

    /// Local storage could not be read or written
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CinemaError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }

    /// Returns the underlying request error, if this came from the REST layer.
    pub fn as_request(&self) -> Option<&RequestError> {
        match self {
            Self::Request(err) => Some(err),
            _ => None,
        }
    }

    /// Message suitable for showing to the user.
    ///
    /// Request failures show the server message verbatim; everything else
    /// uses the display form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Request(err) => err.message.clone(),
            Self::Validation(err) => err.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for CinemaError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CinemaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CinemaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CinemaError>`.
pub type Result<T> = std::result::Result<T, CinemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_constructors() {
        let err = RequestError::http(404, "not found");
        assert_eq!(err.status, Some(404));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found");

        let err = RequestError::generic(500);
        assert_eq!(err.message, GENERIC_REQUEST_FAILURE);

        let err = RequestError::network();
        assert!(err.is_network());
        assert_eq!(err.message, NETWORK_FAILURE);
    }

    #[test]
    fn test_user_message_uses_server_text() {
        let err: CinemaError = RequestError::http(400, "already bookmarked").into();
        assert_eq!(err.user_message(), "already bookmarked");
        assert!(err.as_request().is_some());
    }

    #[test]
    fn test_errors_survive_json() {
        let err: CinemaError = ValidationError::missing("phone").into();
        let json = serde_json::to_string(&err).unwrap();
        let back: CinemaError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_message(), "required field is empty: phone");
    }

    #[test]
    fn test_validation_conversion() {
        let err: CinemaError = ValidationError::PasswordMismatch.into();
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "passwords do not match");
    }
}
