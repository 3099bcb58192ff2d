// @zen-component: API-ShowcaseClient
//
//! Typed calls against the showcase REST API.
//!
//! Every method maps one endpoint; protected endpoints take the bearer
//! credential explicitly. Session handling lives in [`crate::SessionClient`].

use std::path::Path;

use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use showcase_core::models::{
    Adjudication, Analytics, Category, LoginResponse, ProjectRecord, Registration, Submission,
};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, RemoteError};

/// Uploaded project documents must be PDFs.
pub const DOCUMENT_MIME: &str = "application/pdf";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// A project document ready for upload.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    /// Read a document from disk.
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::Document(format!("invalid path {}", path.display())))?
            .to_string();
        let bytes = std::fs::read(path)
            .map_err(|e| ClientError::Document(format!("cannot read {}: {e}", path.display())))?;
        let document = Self { file_name, bytes };
        document.validate()?;
        Ok(document)
    }

    /// Documents must be non-empty `.pdf` files.
    pub fn validate(&self) -> Result<(), ClientError> {
        if !self.file_name.to_ascii_lowercase().ends_with(".pdf") {
            return Err(ClientError::Document(format!(
                "{} is not a PDF",
                self.file_name
            )));
        }
        if self.bytes.is_empty() {
            return Err(ClientError::Document(format!("{} is empty", self.file_name)));
        }
        Ok(())
    }
}

/// HTTP client for the showcase API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::Unknown(format!("http client setup: {e}")))?;
        Ok(Self::with_client(http, config.api_url.clone()))
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /login`
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, RemoteError> {
        let req = self
            .http
            .post(self.url("login")?)
            .json(&LoginRequest { email, password });
        self.send_json(req).await
    }

    /// `POST /register`
    pub async fn register(&self, registration: &Registration) -> Result<(), RemoteError> {
        let req = self.http.post(self.url("register")?).json(registration);
        self.send_empty(req).await
    }

    /// `GET /projects/approved`
    pub async fn list_approved(&self) -> Result<Vec<ProjectRecord>, RemoteError> {
        let req = self.http.get(self.url("projects/approved")?);
        self.send_json(req).await
    }

    /// `GET /projects/pending` (supervisor, admin)
    pub async fn list_pending(&self, token: &str) -> Result<Vec<ProjectRecord>, RemoteError> {
        let req = self
            .http
            .get(self.url("projects/pending")?)
            .bearer_auth(token);
        self.send_json(req).await
    }

    /// `GET /projects/{id}`
    pub async fn get_project(&self, id: &str) -> Result<ProjectRecord, RemoteError> {
        let req = self.http.get(self.project_url(id)?);
        self.send_json(req).await
    }

    /// `POST /projects` as multipart form data (student).
    pub async fn create_project(
        &self,
        token: &str,
        submission: &Submission,
        document: Document,
    ) -> Result<(), RemoteError> {
        let mut form = Form::new();
        for (name, value) in submission.form_fields() {
            form = form.text(name, value.to_string());
        }
        let part = Part::bytes(document.bytes)
            .file_name(document.file_name)
            .mime_str(DOCUMENT_MIME)?;
        form = form.part("document", part);

        let req = self
            .http
            .post(self.url("projects")?)
            .bearer_auth(token)
            .multipart(form);
        self.send_empty(req).await
    }

    /// `PUT /projects/{id}` (supervisor, admin)
    pub async fn adjudicate(
        &self,
        token: &str,
        id: &str,
        verdict: &Adjudication,
    ) -> Result<(), RemoteError> {
        let req = self
            .http
            .put(self.project_url(id)?)
            .bearer_auth(token)
            .json(verdict);
        self.send_empty(req).await
    }

    /// `GET /categories`
    pub async fn list_categories(&self) -> Result<Vec<Category>, RemoteError> {
        let req = self.http.get(self.url("categories")?);
        self.send_json(req).await
    }

    /// `GET /analytics` (admin)
    pub async fn get_analytics(&self, token: &str) -> Result<Analytics, RemoteError> {
        let req = self.http.get(self.url("analytics")?).bearer_auth(token);
        self.send_json(req).await
    }

    /// Where the API serves a project's uploaded document.
    pub fn document_url(&self, record: &ProjectRecord) -> Option<Url> {
        let path = record.document_path.as_deref()?.trim_start_matches('/');
        self.base_url.join(path).ok()
    }

    fn url(&self, path: &str) -> Result<Url, RemoteError> {
        self.base_url
            .join(path)
            .map_err(|e| RemoteError::Unknown(format!("invalid URL for {path}: {e}")))
    }

    fn project_url(&self, id: &str) -> Result<Url, RemoteError> {
        let mut url = self.url("projects/")?;
        url.path_segments_mut()
            .map_err(|_| RemoteError::Unknown("API URL cannot hold a path".into()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, RemoteError> {
        let resp = self.send(req).await?;
        resp.json()
            .await
            .map_err(|e| RemoteError::Unknown(format!("response parse error: {e}")))
    }

    async fn send_empty(&self, req: RequestBuilder) -> Result<(), RemoteError> {
        self.send(req).await.map(|_| ())
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, RemoteError> {
        let resp = req.send().await?;
        let status = resp.status();
        debug!("{} {}", status.as_u16(), resp.url());
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(RemoteError::from_status(status, error_message(&body)))
    }
}

/// Pull a human message out of an error body (`{"message": ..}` or `{"error": ..}`).
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(str::to_string))
        });
    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => "<no body>".to_string(),
        None => body.trim().chars().take(200).collect(),
    }
}
