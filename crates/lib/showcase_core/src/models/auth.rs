//! Authentication domain models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ValidationError, de, require_fields};

/// Access tier of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Supervisor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Supervisor, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Supervisor => "supervisor",
            Role::Admin => "admin",
        }
    }

    /// Whether this role may adjudicate pending submissions.
    pub fn can_review(&self) -> bool {
        matches!(self, Role::Supervisor | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "supervisor" => Ok(Role::Supervisor),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Claims embedded in a credential issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialClaims {
    /// Subject (user ID). The auth service names it `id`.
    #[serde(alias = "id", alias = "userId", deserialize_with = "de::id")]
    pub sub: String,
    /// Display name at issue time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub role: Role,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

/// Who the current user claims to be, decoded from the stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub username: String,
    pub role: Role,
}

impl From<CredentialClaims> for Identity {
    fn from(claims: CredentialClaims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username.unwrap_or_default(),
            role: claims.role,
        }
    }
}

/// Successful `POST /login` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
    pub role: Role,
}

/// Account registration form.
#[derive(Clone, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub faculty: String,
}

impl Registration {
    /// Check every field is filled in and the email looks like one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_fields(&[
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
            ("faculty", &self.faculty),
        ])?;
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidField {
                field: "email",
                reason: "missing '@'".into(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("faculty", &self.faculty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            username: "amina".into(),
            email: "amina@ucu.ac.ug".into(),
            password: "secret".into(),
            role: Role::Student,
            faculty: "Engineering".into(),
        }
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" supervisor ".parse::<Role>(), Ok(Role::Supervisor));
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"student\"");
        assert!(serde_json::from_str::<Role>("\"dean\"").is_err());
    }

    #[test]
    fn only_supervisor_and_admin_review() {
        assert!(!Role::Student.can_review());
        assert!(Role::Supervisor.can_review());
        assert!(Role::Admin.can_review());
    }

    #[test]
    fn claims_accept_numeric_id_field() {
        let claims: CredentialClaims = serde_json::from_value(serde_json::json!({
            "id": 42,
            "username": "amina",
            "role": "student",
            "exp": 1_900_000_000_i64
        }))
        .unwrap();
        let identity = Identity::from(claims);
        assert_eq!(identity.user_id, "42");
        assert_eq!(identity.username, "amina");
        assert_eq!(identity.role, Role::Student);
    }

    #[test]
    fn claims_without_username_yield_empty_name() {
        let claims: CredentialClaims = serde_json::from_value(serde_json::json!({
            "sub": "u-1",
            "role": "admin",
            "exp": 1_900_000_000_i64
        }))
        .unwrap();
        assert_eq!(Identity::from(claims).username, "");
    }

    #[test]
    fn registration_requires_every_field() {
        assert!(registration().validate().is_ok());

        let mut missing = registration();
        missing.faculty = "  ".into();
        assert_eq!(
            missing.validate(),
            Err(ValidationError::MissingField("faculty"))
        );
    }

    #[test]
    fn registration_rejects_email_without_at() {
        let mut bad = registration();
        bad.email = "amina.ucu.ac.ug".into();
        assert!(matches!(
            bad.validate(),
            Err(ValidationError::InvalidField { field: "email", .. })
        ));
    }

    #[test]
    fn registration_debug_hides_password() {
        let rendered = format!("{:?}", registration());
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
