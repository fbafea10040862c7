//! Shared response envelope types for API handlers.
//!
//! Data responses use a `{ "data": ... }` envelope. Auth token responses and
//! errors are the exceptions.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: projects }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
