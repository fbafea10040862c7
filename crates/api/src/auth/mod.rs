//! Authentication primitives.
//!
//! - [`jwt`] -- access-token validation and fingerprinting.
//! - [`cookie`] -- session cookie building and credential extraction.

pub mod cookie;
pub mod jwt;
