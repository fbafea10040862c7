//! Typed rows read from the backend tables.
//!
//! Rows are read-only from the portal's perspective. Each struct matches
//! the column names of its table and is serialized back out unchanged.

pub mod deliverable;
pub mod profile;
pub mod project;
