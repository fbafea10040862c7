//! ClientHub domain core.
//!
//! Pure types and functions shared by the backend adapter and the API
//! service. Nothing in this crate performs I/O; callers pass in data that
//! has already been loaded from the backend.

pub mod deliverable;
pub mod download;
pub mod error;
pub mod project;
pub mod signup;
pub mod stats;
pub mod timeline;
pub mod types;
