//! Credential decoding.
//!
//! The auth service signs credentials with a key the client never sees, so
//! by default the signature is not checked here. When a shared secret is
//! configured the decoder verifies HS256 signatures as well.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use super::DecodeError;
use crate::models::{CredentialClaims, Identity};

/// Decodes stored credentials into an [`Identity`].
#[derive(Clone)]
pub struct TokenDecoder {
    key: DecodingKey,
    validation: Validation,
    verifies_signature: bool,
}

impl TokenDecoder {
    /// Decode without checking the signature.
    pub fn unverified() -> Self {
        let mut validation = base_validation();
        validation.insecure_disable_signature_validation();
        Self {
            key: DecodingKey::from_secret(&[]),
            validation,
            verifies_signature: false,
        }
    }

    /// Decode and verify an HS256 signature made with `secret`.
    pub fn verifying(secret: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(secret),
            validation: base_validation(),
            verifies_signature: true,
        }
    }

    /// Build from an optional shared secret.
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret {
            Some(s) if !s.is_empty() => Self::verifying(s.as_bytes()),
            _ => Self::unverified(),
        }
    }

    /// Decode `token`, rejecting malformed and expired credentials.
    pub fn decode(&self, token: &str) -> Result<Identity, DecodeError> {
        decode::<CredentialClaims>(token.trim(), &self.key, &self.validation)
            .map(|data| Identity::from(data.claims))
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DecodeError::Expired,
                _ => DecodeError::Malformed(e.to_string()),
            })
    }
}

impl Default for TokenDecoder {
    fn default() -> Self {
        Self::unverified()
    }
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("verifies_signature", &self.verifies_signature)
            .finish()
    }
}

fn base_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.validate_aud = false;
    validation
}

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    use crate::models::{CredentialClaims, Role};

    pub const SECRET: &[u8] = b"test-secret";

    fn mint(role: Role, username: Option<&str>, ttl: Duration) -> String {
        let claims = CredentialClaims {
            sub: "u-1".into(),
            username: username.map(str::to_string),
            role,
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
    }

    /// Mint a credential that expires `ttl` from now (negative = already expired).
    pub fn token(role: Role, ttl: Duration) -> String {
        mint(role, Some("amina"), ttl)
    }

    pub fn nameless(role: Role) -> String {
        mint(role, None, Duration::hours(1))
    }

    pub fn valid(role: Role) -> String {
        token(role, Duration::hours(1))
    }

    pub fn expired(role: Role) -> String {
        token(role, Duration::hours(-1))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::testing::*;
    use super::*;
    use crate::models::Role;

    #[test]
    fn decodes_role_exactly() {
        let decoder = TokenDecoder::unverified();
        for role in Role::ALL {
            let identity = decoder.decode(&valid(role)).unwrap();
            assert_eq!(identity.role, role);
            assert_eq!(identity.user_id, "u-1");
            assert_eq!(identity.username, "amina");
        }
    }

    #[test]
    fn expired_credential_is_rejected() {
        let decoder = TokenDecoder::unverified();
        assert_eq!(
            decoder.decode(&expired(Role::Admin)),
            Err(DecodeError::Expired)
        );
    }

    #[test]
    fn garbage_is_malformed() {
        let decoder = TokenDecoder::unverified();
        for bad in ["", "not-a-token", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30"] {
            assert!(
                matches!(decoder.decode(bad), Err(DecodeError::Malformed(_))),
                "{bad:?} should be malformed"
            );
        }
    }

    #[test]
    fn unknown_role_is_malformed() {
        let claims = serde_json::json!({
            "sub": "u-2",
            "role": "dean",
            "exp": Utc::now().timestamp() + 3600,
        });
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap();
        assert!(matches!(
            TokenDecoder::unverified().decode(&token),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn missing_expiry_is_malformed() {
        let claims = serde_json::json!({ "sub": "u-2", "role": "student" });
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap();
        assert!(matches!(
            TokenDecoder::unverified().decode(&token),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn verifying_decoder_checks_signature() {
        let token = valid(Role::Supervisor);
        assert!(TokenDecoder::verifying(SECRET).decode(&token).is_ok());
        assert!(matches!(
            TokenDecoder::verifying(b"other-secret").decode(&token),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn blank_secret_means_unverified() {
        let token = valid(Role::Student);
        assert!(TokenDecoder::from_secret(Some("")).decode(&token).is_ok());
        assert!(TokenDecoder::from_secret(None).decode(&token).is_ok());
    }
}
