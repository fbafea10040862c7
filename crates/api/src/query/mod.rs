//! Data access layer: keyed, cached, cancellable reads.
//!
//! - [`key`] -- query keys.
//! - [`client`] -- the generic keyed cache ([`QueryClient`]).
//! - [`data`] -- typed reads for projects and deliverables ([`DataAccess`]).

pub mod client;
pub mod data;
pub mod key;

pub use client::{QueryClient, QueryError};
pub use data::{DataAccess, ProjectLookup, Queries};
pub use key::QueryKey;
