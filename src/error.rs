//! Client Errors
//!
//! One error type for every operation the client exposes.

use thiserror::Error;

/// Common result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Coarse classification of a [`ClientError`], handy for UI branching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Service,
    SessionExpired,
    InvalidCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Malformed input caught before any request was sent
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The backend could not be reached or the request timed out
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status or an unusable body
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// A 401 was received; the session has been cleared
    #[error("Session expired, please sign in again")]
    SessionExpired,

    /// Login rejected by the auth endpoint
    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl ClientError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ClientError::Validation(msg.into())
    }

    pub fn service(status: u16, message: impl Into<String>) -> Self {
        ClientError::Service {
            status,
            message: message.into(),
        }
    }

    /// Body received but could not be decoded into the expected shape.
    /// Status 0 is never sent on the wire, so it marks decode failures.
    pub fn decode(message: impl Into<String>) -> Self {
        ClientError::Service {
            status: 0,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::Service { .. } => ErrorKind::Service,
            ClientError::SessionExpired => ErrorKind::SessionExpired,
            ClientError::InvalidCredentials => ErrorKind::InvalidCredentials,
        }
    }

    /// Only transport failures are worth a manual retry
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }
}
