use showcase_api_client::{ClientError, RemoteError};
use showcase_core::session::{AccessError, SessionError};
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("{}", describe(.0))]
    Client(#[from] ClientError),

    #[error("Invalid SHOWCASE_API_URL: {0}")]
    ApiUrl(#[from] url::ParseError),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("Fmt::{:?}: {}", .0, .0)]
    Fmt(#[from] std::fmt::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),
}

impl From<RemoteError> for Error {
    fn from(e: RemoteError) -> Self {
        Error::Client(e.into())
    }
}

impl From<AccessError> for Error {
    fn from(e: AccessError) -> Self {
        Error::Client(e.into())
    }
}

impl From<SessionError> for Error {
    fn from(e: SessionError) -> Self {
        Error::Client(e.into())
    }
}

/// Message shown to the user. Credential decode details stay in the debug log.
fn describe(e: &ClientError) -> String {
    match e {
        ClientError::Access(AccessError::LoginRequired) => {
            "Please log in to continue (showcase login).".into()
        }
        ClientError::Access(AccessError::Forbidden(_)) => {
            "You do not have access to this page.".into()
        }
        ClientError::CredentialsRejected(_) => {
            "Login failed. Please check your credentials.".into()
        }
        ClientError::RegistrationRefused(_) => {
            "Registration was refused. Check the details and try again.".into()
        }
        ClientError::Remote(remote @ RemoteError::Unauthorized(_)) => format!(
            "{} Your saved session has been cleared.",
            remote.user_message()
        ),
        ClientError::Remote(remote) => {
            log::debug!("{remote}");
            remote.user_message().into()
        }
        ClientError::Session(SessionError::Decode(decode)) => {
            log::debug!("{decode}");
            "The server issued a credential this client cannot read.".into()
        }
        other => other.to_string(),
    }
}
