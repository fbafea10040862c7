//! Adapter for the external backend-as-a-service.
//!
//! The portal owns no persistent state. Credential checks, session issuance,
//! row-level access control and file storage all live in the backend; this
//! crate is the only place that knows how to talk to it.
//!
//! - [`backend::Backend`] is the seam: auth operations plus owner-filtered
//!   row queries.
//! - [`client::RestBackend`] is the live implementation (GoTrue-style auth
//!   API and PostgREST-style row API over HTTP).
//! - [`repositories`] turn row queries into typed [`models`].

pub mod backend;
pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod repositories;

pub use backend::{Backend, BackendSession, BackendUser, SignUpParams};
pub use client::RestBackend;
pub use error::BackendError;
pub use query::RowQuery;

/// Check that the backend is reachable.
pub async fn health_check(backend: &dyn Backend) -> Result<(), BackendError> {
    backend.health_check().await
}
