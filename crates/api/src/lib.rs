//! ClientHub portal service library.
//!
//! A backend-for-frontend in front of the backend-as-a-service: it resolves
//! client sessions, serves cached, owner-scoped project and deliverable
//! reads, and computes every page's view state. Exposed as a library so
//! integration tests and the binary entrypoint share the same router.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;
