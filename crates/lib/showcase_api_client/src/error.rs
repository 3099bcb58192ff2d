//! Client error types.

use reqwest::StatusCode;
use showcase_core::models::ValidationError;
use showcase_core::session::{AccessError, SessionError};
use thiserror::Error;

/// Failure talking to the showcase API.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API unreachable: {0}")]
    Unreachable(String),

    #[error("Unexpected API response: {0}")]
    Unknown(String),
}

impl RemoteError {
    /// Classify a non-success status. `message` is the server's explanation.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Unauthorized(message),
            StatusCode::NOT_FOUND => RemoteError::NotFound(message),
            StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => RemoteError::Unreachable(format!("{status}: {message}")),
            _ => RemoteError::Unknown(format!("{status}: {message}")),
        }
    }

    /// Text suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            RemoteError::Unauthorized(_) => "Your session is no longer valid. Please log in again.",
            RemoteError::NotFound(_) => "The requested item could not be found.",
            RemoteError::Unreachable(_) => {
                "The showcase service is unreachable. Please try again later."
            }
            RemoteError::Unknown(_) => "Something went wrong. Please try again later.",
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            RemoteError::Unreachable(e.to_string())
        } else if let Some(status) = e.status() {
            RemoteError::from_status(status, e.to_string())
        } else {
            RemoteError::Unknown(e.to_string())
        }
    }
}

/// Errors from session-aware calls.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Document error: {0}")]
    Document(String),

    /// Login refused by the auth service. The session is left as it was.
    #[error("Login rejected: {0}")]
    CredentialsRejected(String),

    /// Registration refused by the auth service.
    #[error("Registration refused: {0}")]
    RegistrationRefused(String),
}

impl ClientError {
    /// Whether the API rejected the stored credential, which clears the session.
    ///
    /// A refused login or registration is reported by its own variant and is
    /// not counted here.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Remote(RemoteError::Unauthorized(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(
            RemoteError::from_status(StatusCode::UNAUTHORIZED, "x".into()),
            RemoteError::Unauthorized(_)
        ));
        assert!(matches!(
            RemoteError::from_status(StatusCode::FORBIDDEN, "x".into()),
            RemoteError::Unauthorized(_)
        ));
        assert!(matches!(
            RemoteError::from_status(StatusCode::NOT_FOUND, "x".into()),
            RemoteError::NotFound(_)
        ));
        assert!(matches!(
            RemoteError::from_status(StatusCode::SERVICE_UNAVAILABLE, "x".into()),
            RemoteError::Unreachable(_)
        ));
        assert!(matches!(
            RemoteError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "x".into()),
            RemoteError::Unknown(_)
        ));
    }

    #[test]
    fn refused_login_is_not_a_rejected_session() {
        let login = ClientError::CredentialsRejected("Invalid credentials".into());
        assert!(!login.is_unauthorized());
        assert!(!ClientError::RegistrationRefused("Forbidden".into()).is_unauthorized());
        let stored = ClientError::from(RemoteError::Unauthorized("jwt expired".into()));
        assert!(stored.is_unauthorized());
    }

    #[test]
    fn user_messages_hide_details() {
        let err = RemoteError::Unknown("500: stack trace at line 12".into());
        assert!(!err.user_message().contains("stack"));
    }
}
