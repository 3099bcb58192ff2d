//! # showcase_core
//!
//! Core domain logic for the project showcase client.
//!
//! - [`session`]: credential storage, identity decoding, route guards and
//!   navigation visibility.
//! - [`catalog`]: client-side filtering of the published project gallery.
//! - [`dashboard`]: aggregate figures for the admin dashboard.
//!
//! Client-side gating is a convenience for the user interface only. The
//! remote API re-validates every protected call.

pub mod catalog;
pub mod dashboard;
pub mod models;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
