// @zen-component: SES-AccessControl
//
//! Session and access control.
//!
//! Owns the stored credential, derives the current [`Identity`] from it and
//! decides which routes and navigation links the user gets. Any credential
//! that fails to decode is purged on sight, so the session degrades to
//! anonymous instead of failing the render path.
//!
//! These checks only shape the user interface. The remote API validates the
//! credential again on every protected call.

pub mod nav;
pub mod routes;
pub mod store;
pub mod token;

pub use nav::{NavLink, current_nav_links};
pub use routes::{Access, GuardOutcome, Route};
pub use store::{CredentialStore, FileStore, MemoryStore, StoredCredential};
pub use token::TokenDecoder;

use log::{debug, error, info, warn};
use thiserror::Error;

use crate::models::{Identity, LoginResponse, Role};

/// Display name shown when neither the login call nor the credential named the user.
pub const FALLBACK_DISPLAY_NAME: &str = "User";

/// Why a stored credential could not be turned into an identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Malformed credential: {0}")]
    Malformed(String),

    #[error("Credential expired")]
    Expired,
}

/// Signed in, but with a role the view does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Role '{actual}' is not permitted here")]
pub struct AuthorizationError {
    pub actual: Role,
    pub required: Vec<Role>,
}

/// Why a protected view or call was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Please log in to continue")]
    LoginRequired,

    #[error(transparent)]
    Forbidden(#[from] AuthorizationError),
}

impl AccessError {
    /// Where the guard sends the user.
    pub fn outcome(&self) -> GuardOutcome {
        match self {
            AccessError::LoginRequired => GuardOutcome::RedirectToLogin,
            AccessError::Forbidden(_) => GuardOutcome::RedirectToHome,
        }
    }
}

/// Session storage errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Credential rejected: {0}")]
    Decode(#[from] DecodeError),

    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Session store lock poisoned")]
    Poisoned,
}

/// Whether `identity` satisfies `required`.
///
/// Anonymous never qualifies. An empty `required` set admits any signed-in
/// identity.
pub fn has_capability(identity: Option<&Identity>, required: &[Role]) -> bool {
    match identity {
        None => false,
        Some(identity) => required.is_empty() || required.contains(&identity.role),
    }
}

/// A signed-in identity together with the credential that proves it.
#[derive(Debug, Clone)]
pub struct Authorized {
    pub identity: Identity,
    pub token: String,
}

/// The client's session: one credential store plus the decoder for it.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    decoder: TokenDecoder,
}

impl<S: CredentialStore> Session<S> {
    pub fn new(store: S, decoder: TokenDecoder) -> Self {
        Self { store, decoder }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current identity; `None` when anonymous.
    ///
    /// Expiry is checked here and nowhere else. A credential that no longer
    /// decodes is purged before returning.
    pub fn identity(&self) -> Option<Identity> {
        self.current().map(|(identity, _)| identity)
    }

    /// Name for the navigation bar: cached login name, then the credential's.
    pub fn display_name(&self) -> Option<String> {
        let (identity, stored) = self.current()?;
        let name = stored
            .username
            .filter(|n| !n.trim().is_empty())
            .or_else(|| Some(identity.username).filter(|n| !n.trim().is_empty()))
            .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string());
        Some(name)
    }

    /// Store the credential from a successful login.
    ///
    /// A credential that does not decode is never stored.
    pub fn sign_in(&self, response: &LoginResponse) -> Result<Identity, SessionError> {
        let identity = self.decoder.decode(&response.token)?;
        if identity.role != response.role {
            warn!(
                "login response role '{}' differs from credential role '{}'; using the credential",
                response.role, identity.role
            );
        }
        self.store.save(&StoredCredential {
            token: response.token.clone(),
            username: response.username.clone(),
        })?;
        info!("signed in as {} ({})", identity.user_id, identity.role);
        Ok(identity)
    }

    /// Forget the credential and cached display name.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        info!("signed out");
        Ok(())
    }

    /// The API rejected the credential: drop it as if it had failed to decode.
    pub fn purge_unauthorized(&self) {
        warn!("credential rejected by the API; clearing session");
        self.purge();
    }

    /// Check `required` (empty = any signed-in identity) and hand back the
    /// credential for the call that follows.
    pub fn require(&self, required: &[Role]) -> Result<Authorized, AccessError> {
        let Some((identity, stored)) = self.current() else {
            return Err(AccessError::LoginRequired);
        };
        if !has_capability(Some(&identity), required) {
            debug!("role {} not in {:?}", identity.role, required);
            return Err(AuthorizationError {
                actual: identity.role,
                required: required.to_vec(),
            }
            .into());
        }
        Ok(Authorized {
            identity,
            token: stored.token,
        })
    }

    pub fn guard_roles(&self, required: &[Role]) -> GuardOutcome {
        match self.require(required) {
            Ok(_) => GuardOutcome::Admit,
            Err(e) => e.outcome(),
        }
    }

    /// Decide whether `route` may render.
    pub fn guard(&self, route: &Route) -> GuardOutcome {
        match route.required_roles() {
            None => GuardOutcome::Admit,
            Some(required) => self.guard_roles(required),
        }
    }

    pub fn nav_links(&self) -> Vec<NavLink> {
        current_nav_links(self.identity().as_ref())
    }

    fn current(&self) -> Option<(Identity, StoredCredential)> {
        let stored = self.store.load()?;
        match self.decoder.decode(&stored.token) {
            Ok(identity) => Some((identity, stored)),
            Err(e) => {
                warn!("discarding stored credential: {e}");
                self.purge();
                None
            }
        }
    }

    fn purge(&self) {
        if let Err(e) = self.store.clear() {
            error!("failed to clear session: {e}");
        }
    }
}
