//! Session-aware calls.
//!
//! Protected calls run the route guard first, attach the stored credential
//! and clear the session when the API rejects it.

use log::{debug, info};
use showcase_core::catalog::Catalog;
use showcase_core::dashboard::DashboardStats;
use showcase_core::models::{Adjudication, Identity, ProjectRecord, Registration, Submission};
use showcase_core::session::{Authorized, CredentialStore, Route, Session};

use crate::client::{ApiClient, Document};
use crate::error::{ClientError, RemoteError};

/// [`ApiClient`] bound to a [`Session`].
#[derive(Debug)]
pub struct SessionClient<S> {
    api: ApiClient,
    session: Session<S>,
}

impl<S: CredentialStore> SessionClient<S> {
    pub fn new(api: ApiClient, session: Session<S>) -> Self {
        Self { api, session }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Authenticate and store the issued credential.
    ///
    /// A failed login leaves any existing session untouched; a 401/403 is
    /// reported as [`ClientError::CredentialsRejected`].
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, ClientError> {
        let response = self
            .api
            .login(email.trim(), password)
            .await
            .map_err(|e| match e {
                RemoteError::Unauthorized(message) => ClientError::CredentialsRejected(message),
                other => other.into(),
            })?;
        Ok(self.session.sign_in(&response)?)
    }

    /// Create an account. Does not sign in or touch the session.
    pub async fn register(&self, registration: &Registration) -> Result<(), ClientError> {
        registration.validate()?;
        self.api
            .register(registration)
            .await
            .map_err(|e| match e {
                RemoteError::Unauthorized(message) => ClientError::RegistrationRefused(message),
                other => other.into(),
            })?;
        info!("registered {} as {}", registration.email, registration.role);
        Ok(())
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        Ok(self.session.logout()?)
    }

    /// Approved projects and category options, ready for filtering.
    pub async fn gallery(&self) -> Result<Catalog, ClientError> {
        let result = futures::try_join!(self.api.list_approved(), self.api.list_categories());
        let (records, categories) = self.settle(result)?;
        debug!(
            "gallery loaded: {} projects, {} categories",
            records.len(),
            categories.len()
        );
        let mut catalog = Catalog::new();
        catalog.load(records);
        catalog.load_categories(categories);
        Ok(catalog)
    }

    pub async fn project(&self, id: &str) -> Result<ProjectRecord, ClientError> {
        let result = self.api.get_project(id).await;
        self.settle(result)
    }

    /// Submissions awaiting review (supervisor, admin).
    pub async fn pending(&self) -> Result<Vec<ProjectRecord>, ClientError> {
        let auth = self.authorize(&Route::Pending)?;
        let result = self.api.list_pending(&auth.token).await;
        self.settle(result)
    }

    /// Approve or reject a pending project (supervisor, admin).
    pub async fn adjudicate(&self, id: &str, verdict: &Adjudication) -> Result<(), ClientError> {
        let auth = self.authorize(&Route::Pending)?;
        verdict.validate()?;
        let result = self.api.adjudicate(&auth.token, id, verdict).await;
        self.settle(result)?;
        info!("project {id} marked {}", verdict.status);
        Ok(())
    }

    /// Submit a new project for review (student).
    pub async fn submit(
        &self,
        submission: &Submission,
        document: Document,
    ) -> Result<(), ClientError> {
        let auth = self.authorize(&Route::Submit)?;
        submission.validate()?;
        document.validate()?;
        let result = self
            .api
            .create_project(&auth.token, submission, document)
            .await;
        self.settle(result)?;
        info!("submitted '{}'", submission.title);
        Ok(())
    }

    /// Admin statistics.
    pub async fn dashboard(&self) -> Result<DashboardStats, ClientError> {
        let auth = self.authorize(&Route::Dashboard)?;
        let result = futures::try_join!(
            self.api.get_analytics(&auth.token),
            self.api.list_approved()
        );
        let (analytics, approved) = self.settle(result)?;
        Ok(DashboardStats::build(&analytics, &approved))
    }

    fn authorize(&self, route: &Route) -> Result<Authorized, ClientError> {
        let required = route.required_roles().unwrap_or(&[]);
        Ok(self.session.require(required)?)
    }

    /// Every `Unauthorized` leaving this client has gone through the purge.
    fn settle<T>(&self, result: Result<T, RemoteError>) -> Result<T, ClientError> {
        if let Err(RemoteError::Unauthorized(_)) = &result {
            self.session.purge_unauthorized();
        }
        Ok(result?)
    }
}
