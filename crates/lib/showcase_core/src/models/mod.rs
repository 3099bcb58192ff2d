//! Domain models shared by the session, catalog and API client.
//!
//! Wire names follow the external showcase API (snake_case project fields,
//! camelCase analytics fields).

pub mod analytics;
pub mod auth;
mod de;
pub mod project;

pub use analytics::{Analytics, FacultyCount, StatusCount};
pub use auth::{CredentialClaims, Identity, LoginResponse, Registration, Role};
pub use project::{Adjudication, Category, ProjectRecord, ProjectStatus, Submission};

use thiserror::Error;

/// A required form field was left blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

/// Fail with [`ValidationError::MissingField`] for the first blank field.
pub(crate) fn require_fields(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(ValidationError::MissingField(name)),
        None => Ok(()),
    }
}
