//! HTTP client for the project showcase API.
//!
//! [`ApiClient`] maps the REST endpoints one to one. [`SessionClient`] layers
//! the stored session on top: it gates protected calls by role and clears the
//! credential when the API rejects it.

pub mod client;
pub mod config;
pub mod error;
pub mod session_client;

pub use client::{ApiClient, Document};
pub use config::ClientConfig;
pub use error::{ClientError, RemoteError};
pub use session_client::SessionClient;
