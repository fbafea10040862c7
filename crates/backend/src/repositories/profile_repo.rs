//! Repository for the `profiles` table.

use clienthub_core::types::EntityId;

use crate::backend::Backend;
use crate::error::BackendError;
use crate::models::profile::Profile;
use crate::query::RowQuery;

/// Reads client profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find the profile of identity `id`.
    pub async fn find_by_id(
        backend: &dyn Backend,
        access_token: &str,
        id: EntityId,
    ) -> Result<Option<Profile>, BackendError> {
        super::fetch_optional(backend, access_token, RowQuery::from("profiles").eq("id", id)).await
    }
}
