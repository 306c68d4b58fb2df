//! Client error types

use edupredict_core::CoreError;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Credential store failure
    #[error("Credential store failure: {0}")]
    Credential(#[from] CoreError),

    /// The backend rejected the credential
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The backend rejected the submitted fields
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            422 => Self::Validation(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// True when the backend rejected the credential (HTTP 401)
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// True when no response was received at all
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Request(err) if err.is_connect() || err.is_timeout())
    }

    /// Backend-provided message, when the failure carries one
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::AuthenticationFailed(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::BadRequest(message)
            | Self::Validation(message)
            | Self::Configuration(message) => Some(message),
            Self::ServerError { message, .. } => Some(message),
            Self::Request(_) | Self::Credential(_) | Self::Serialization(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn maps_statuses_to_variants() {
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_REQUEST, "x".into()),
            ClientError::BadRequest(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, "x".into()),
            ClientError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "x".into()),
            ClientError::Validation(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "x".into()),
            ClientError::ServerError { status: 500, .. }
        ));
    }

    #[test]
    fn only_unauthorized_counts_as_auth_expired() {
        let unauthorized = ClientError::from_status(StatusCode::UNAUTHORIZED, "expired".into());
        assert!(unauthorized.is_auth_expired());
        assert_eq!(unauthorized.message(), Some("expired"));

        let forbidden = ClientError::from_status(StatusCode::FORBIDDEN, "no".into());
        assert!(!forbidden.is_auth_expired());
        assert!(!forbidden.is_network());
    }
}
