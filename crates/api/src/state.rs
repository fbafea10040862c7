use std::sync::Arc;

use clienthub_backend::Backend;

use crate::config::ServerConfig;
use crate::session::SessionRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Backend-as-a-service client.
    pub backend: Arc<dyn Backend>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Live sessions keyed by access-token fingerprint.
    pub sessions: Arc<SessionRegistry>,
}
