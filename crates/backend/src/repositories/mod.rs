//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async read methods that
//! accept `&dyn Backend` and the caller's access token as the first
//! arguments. Queries always filter on the owning foreign key and sort by
//! `created_at` descending.

pub mod deliverable_repo;
pub mod profile_repo;
pub mod project_repo;

pub use deliverable_repo::DeliverableRepo;
pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;

use serde::de::DeserializeOwned;

use crate::backend::Backend;
use crate::error::BackendError;
use crate::query::RowQuery;

/// Run `query` and decode every row into `T`.
///
/// A single malformed row fails the whole query.
pub(crate) async fn fetch_rows<T: DeserializeOwned>(
    backend: &dyn Backend,
    access_token: &str,
    query: &RowQuery,
) -> Result<Vec<T>, BackendError> {
    backend
        .select(access_token, query)
        .await?
        .into_iter()
        .map(|row| {
            serde_json::from_value(row)
                .map_err(|e| BackendError::Decode(format!("{} row: {e}", query.table)))
        })
        .collect()
}

/// Run `query` limited to one row and decode it, if present.
pub(crate) async fn fetch_optional<T: DeserializeOwned>(
    backend: &dyn Backend,
    access_token: &str,
    query: RowQuery,
) -> Result<Option<T>, BackendError> {
    let rows = fetch_rows(backend, access_token, &query.limit(1)).await?;
    Ok(rows.into_iter().next())
}
